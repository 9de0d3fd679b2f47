//! CSV record reading.
//!
//! The input is a comma-separated file with a header row. The header must
//! name `date`, `title`, and `content`; `slug` is optional and any other
//! column is ignored. Column positions are resolved once from the header, so
//! every row is read into a typed [`Record`] instead of an open-ended map.
//!
//! ```text
//! date,title,content,slug
//! 2024-03-15,Hello World!,"Some text.
//! Spanning lines.",
//! ```
//!
//! Rows are yielded lazily together with their 1-based line-of-record number
//! (the header is row 1, so the first data row is row 2).

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const REQUIRED_COLUMNS: [&str; 3] = ["date", "title", "content"];
pub const SLUG_COLUMN: &str = "slug";

/// Number of the first data row; row 1 is the header.
pub const FIRST_DATA_ROW: usize = 2;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("CSV file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error(
        "CSV must contain columns: {} (missing: {}). Found columns: {}",
        REQUIRED_COLUMNS.join(", "),
        .missing.join(", "),
        .found.join(", ")
    )]
    Schema {
        missing: Vec<&'static str>,
        found: Vec<String>,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One parsed input row, prior to validation. Values are untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub date: String,
    pub title: String,
    pub content: String,
    /// `None` when the input has no `slug` column.
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    title: usize,
    content: usize,
    slug: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, RecordError> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let missing: Vec<&'static str> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|name| position(name).is_none())
            .collect();

        match (position("date"), position("title"), position("content")) {
            (Some(date), Some(title), Some(content)) => Ok(Columns {
                date,
                title,
                content,
                slug: position(SLUG_COLUMN),
            }),
            _ => Err(RecordError::Schema {
                missing,
                found: headers.iter().map(str::to_string).collect(),
            }),
        }
    }

    // Short rows read missing cells as empty; validation reports them.
    fn extract(&self, row: &StringRecord) -> Record {
        let cell = |idx: usize| row.get(idx).unwrap_or_default().to_string();
        Record {
            date: cell(self.date),
            title: cell(self.title),
            content: cell(self.content),
            slug: self.slug.map(cell),
        }
    }
}

/// Lazily reads [`Record`]s from a CSV source after checking its header.
pub struct RecordReader<R> {
    reader: csv::Reader<R>,
    columns: Columns,
}

impl RecordReader<File> {
    /// Open a CSV file.
    ///
    /// Fails with [`RecordError::SourceNotFound`] before any parsing when the
    /// path does not exist, and with [`RecordError::Schema`] when the header
    /// lacks a required column.
    pub fn open(path: &Path) -> Result<Self, RecordError> {
        if !path.exists() {
            return Err(RecordError::SourceNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: io::Read> RecordReader<R> {
    pub fn from_reader(source: R) -> Result<Self, RecordError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(source);
        let columns = Columns::locate(reader.headers()?)?;
        Ok(Self { reader, columns })
    }

    /// Header names as they appear in the input.
    pub fn headers(&mut self) -> Result<Vec<String>, RecordError> {
        Ok(self.reader.headers()?.iter().map(str::to_string).collect())
    }

    /// Iterate `(row_number, record)` pairs in input order.
    ///
    /// A row that cannot be decoded yields an error for that row only; the
    /// iterator keeps going.
    pub fn records(&mut self) -> impl Iterator<Item = (usize, Result<Record, RecordError>)> + '_ {
        let columns = self.columns;
        self.reader
            .records()
            .enumerate()
            .map(move |(idx, result)| {
                let row = idx + FIRST_DATA_ROW;
                (row, result.map(|r| columns.extract(&r)).map_err(RecordError::from))
            })
    }
}
