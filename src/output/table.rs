//! Delimited table writer and reader
//!
//! Layout: a header row whose first cell is empty, then one row per record
//! whose first cell is the 0-based row index. Fields containing the
//! delimiter, a double quote, CR or LF are quoted with inner quotes doubled.

use crate::model::{PostRecord, COLUMNS};
use crate::ScrapeError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::mem::take;
use std::path::Path;

/// One row read back from a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Value of the leading row-index column
    pub index: usize,
    pub record: PostRecord,
}

/// Writes records to `path`, replacing any existing file
pub fn write_table(records: &[PostRecord], path: &Path, delimiter: char) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut out = BufWriter::new(File::create(path)?);
    write_records(&mut out, records, delimiter)?;
    out.flush()?;

    tracing::info!("Wrote {} posts to {}", records.len(), path.display());
    Ok(())
}

/// Writes the header and every record to any writer
pub fn write_records<W: Write>(mut w: W, records: &[PostRecord], delimiter: char) -> io::Result<()> {
    let mut header = vec![String::new()];
    header.extend(COLUMNS.iter().map(|c| c.to_string()));
    write_row(&mut w, &header, delimiter)?;

    for (index, record) in records.iter().enumerate() {
        let mut row = vec![index.to_string()];
        row.extend(record.to_row());
        write_row(&mut w, &row, delimiter)?;
    }

    Ok(())
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Reads a table written by `write_table`
pub fn read_table(path: &Path, delimiter: char) -> Result<Vec<TableRow>, ScrapeError> {
    let text = std::fs::read_to_string(path)?;
    parse_table(&text, delimiter)
}

/// Parses table text, checking the header and every row's shape
pub fn parse_table(text: &str, delimiter: char) -> Result<Vec<TableRow>, ScrapeError> {
    let mut rows = split_rows(text, delimiter).into_iter();

    let header = rows.next().ok_or_else(|| ScrapeError::Table {
        row: 1,
        message: "missing header".to_string(),
    })?;
    let header_ok = header.len() == COLUMNS.len() + 1
        && header[1..].iter().zip(COLUMNS.iter()).all(|(h, c)| h == c);
    if !header_ok {
        return Err(ScrapeError::Table {
            row: 1,
            message: format!("unexpected header {:?}", header),
        });
    }

    rows.enumerate()
        .map(|(i, cells)| parse_row(cells, i + 2))
        .collect()
}

fn parse_row(cells: Vec<String>, row: usize) -> Result<TableRow, ScrapeError> {
    let bad = |message: String| ScrapeError::Table { row, message };

    let [index, title, username, date, comments, upvotes, link]: [String; 7] = cells
        .try_into()
        .map_err(|cells: Vec<String>| bad(format!("expected 7 fields, got {}", cells.len())))?;

    Ok(TableRow {
        index: index
            .parse()
            .map_err(|_| bad(format!("invalid row index '{}'", index)))?,
        record: PostRecord {
            comments: comments
                .parse()
                .map_err(|_| bad(format!("invalid comment count '{}'", comments)))?,
            title,
            username,
            date,
            upvotes,
            link,
        },
    })
}

/// Splits delimited text into rows of fields (quotes and CRLF tolerant)
fn split_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // doubled quote
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                push_row(&mut rows, take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    // Last line without a trailing newline
    row.push(field);
    push_row(&mut rows, row);

    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }
}
