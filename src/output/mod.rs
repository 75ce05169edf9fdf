//! Output module for scraped posts
//!
//! This module handles:
//! - Writing collected posts to a delimited table
//! - Reading that table back
//! - Rendering the read-back table as a report

mod report;
mod table;

pub use report::{format_report, load_report, parse_post_date, print_report, ReportRow};
pub use table::{parse_table, read_table, write_records, write_table, TableRow};
