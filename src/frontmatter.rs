//! Front-matter header block.
//!
//! Every post file is a small YAML-style header followed by a blank line and
//! the body:
//!
//! ```text
//! ---
//! date: 2024-03-15
//! title: "Hello World!"
//! ---
//!
//! Some text.
//! ```
//!
//! The title goes between double quotes verbatim. Embedded `"` characters are
//! not escaped, so a title containing quotes produces a header that strict
//! YAML parsers may reject. [`parse`] strips only the outermost pair of quotes
//! and therefore still recovers such titles.

use crate::validate::ValidatedRecord;
use thiserror::Error;

pub const DELIMITER: &str = "---";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterError {
    #[error("file does not start with a front-matter delimiter")]
    MissingOpening,
    #[error("front matter is not terminated by a closing delimiter")]
    Unterminated,
    #[error("front matter has no {0:?} key")]
    MissingKey(&'static str),
}

/// Header values recovered from a post file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub date: String,
    pub title: String,
    pub body: String,
}

/// Compose the full file contents for a record.
pub fn render(record: &ValidatedRecord) -> String {
    format!(
        "{DELIMITER}\ndate: {}\ntitle: \"{}\"\n{DELIMITER}\n\n{}",
        record.date_string(),
        record.title,
        record.content.trim()
    )
}

/// Parse a file produced by [`render`] back into its header values and body.
pub fn parse(text: &str) -> Result<FrontMatter, FrontMatterError> {
    let mut lines = text.split_inclusive('\n');
    let mut consumed = match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => first.len(),
        _ => return Err(FrontMatterError::MissingOpening),
    };

    let mut date = None;
    let mut title = None;
    let mut closed = false;
    for line in lines {
        consumed += line.len();
        let line = line.trim_end_matches(['\n', '\r']);
        if line == DELIMITER {
            closed = true;
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim();
            match key.trim() {
                "date" => date = Some(value.to_string()),
                "title" => title = Some(unquote(value).to_string()),
                _ => {}
            }
        }
    }
    if !closed {
        return Err(FrontMatterError::Unterminated);
    }

    let rest = text.get(consumed..).unwrap_or_default();
    let body = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest)
        .to_string();

    Ok(FrontMatter {
        date: date.ok_or(FrontMatterError::MissingKey("date"))?,
        title: title.ok_or(FrontMatterError::MissingKey("title"))?,
        body,
    })
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
