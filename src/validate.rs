//! Per-row field validation.
//!
//! [`validate`] is a pure function from a raw [`Record`] to a
//! [`ValidatedRecord`]. Rules, in order:
//!
//! 1. Trim `date`, `title`, `content`, and `slug`.
//! 2. Any of `date`, `title`, `content` empty → [`ValidationError::MissingField`].
//! 3. `date` must be exactly `YYYY-MM-DD` and name a real calendar day
//!    (`2024-02-30` and `2024-13-01` are rejected) →
//!    [`ValidationError::InvalidDateFormat`].
//! 4. An empty slug is treated as absent, not as an error.

use crate::record::Record;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// `chrono` format used both to parse and to print dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// chrono alone accepts unpadded months/days and signed years.
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingField(Vec<&'static str>),
    #[error("Invalid date format (expected YYYY-MM-DD): {0}")]
    InvalidDateFormat(String),
}

impl ValidationError {
    /// Stable reason tag for logs and reports.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing-field",
            ValidationError::InvalidDateFormat(_) => "invalid-date-format",
        }
    }
}

/// A record whose required fields are present and whose date is real.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub date: NaiveDate,
    /// Trimmed title, written verbatim into the header block.
    pub title: String,
    /// Trimmed body text.
    pub content: String,
    /// Explicit slug, `None` when the row left it blank or had no slug column.
    pub slug: Option<String>,
}

impl ValidatedRecord {
    /// The date as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Parse a strict `YYYY-MM-DD` date. Returns `None` for the wrong shape or an
/// impossible calendar day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(value) {
        return None;
    }
    // Year 0 exists in chrono's proleptic calendar but not in ours.
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() >= 1)
}

pub fn validate(record: &Record) -> Result<ValidatedRecord, ValidationError> {
    let date = record.date.trim();
    let title = record.title.trim();
    let content = record.content.trim();
    let slug = record
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let missing: Vec<&'static str> = [("date", date), ("title", title), ("content", content)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingField(missing));
    }

    let date = parse_date(date).ok_or_else(|| ValidationError::InvalidDateFormat(date.to_string()))?;

    Ok(ValidatedRecord {
        date,
        title: title.to_string(),
        content: content.to_string(),
        slug: slug.map(str::to_string),
    })
}
