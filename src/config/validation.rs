use crate::config::types::{Config, OutputConfig, ScraperConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates pagination settings
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.seed_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use http or https",
            config.seed_url
        )));
    }

    if config.target_posts < 1 {
        return Err(ConfigError::Validation(
            "target_posts must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    let mut chars = config.delimiter.chars();
    let delimiter = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(ConfigError::Validation(format!(
                "delimiter must be exactly one character, got '{}'",
                config.delimiter
            )))
        }
    };

    if matches!(delimiter, '"' | '\r' | '\n') {
        return Err(ConfigError::Validation(format!(
            "delimiter cannot be {:?}",
            delimiter
        )));
    }

    if config.report_rows < 1 {
        return Err(ConfigError::Validation(
            "report_rows must be >= 1".to_string(),
        ));
    }

    Ok(())
}
