//! Import orchestration.
//!
//! Drives every input row through the pipeline:
//!
//! ```text
//! read → validate → resolve slug → write
//! ```
//!
//! Per-row state machine:
//!
//! ```text
//! Parsed ──► Rejected                         (validation failed)
//!        └─► Validated ──► Written | Skipped | Failed
//!                      └─► Planned | Conflict   (dry run)
//! ```
//!
//! Every terminal state is reported as a [`RowEvent`] and the run moves on to
//! the next row; a bad row never stops the batch. Only a missing input file or
//! a header without the required columns aborts, and both do so before any
//! row is touched.
//!
//! Skipped rows (overwrite declined) are tallied with the errors, so the
//! summary carries exactly two counters.

use crate::config::{ConflictPolicy, ImportConfig};
use crate::record::{Record, RecordError, RecordReader};
use crate::slug::{self, SlugError};
use crate::validate::{self, ValidationError};
use crate::writer::{OverwritePrompt, PostWriter, WriteError, WriteOutcome};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conditions that abort the whole run before any row is processed.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Failure of a single row after it passed validation (or failed to decode).
#[derive(Error, Debug)]
pub enum RowError {
    #[error("{0}")]
    Read(RecordError),
    #[error("{0}")]
    Slug(#[from] SlugError),
    #[error("{0}")]
    Write(#[from] WriteError),
}

/// Terminal state of one row, in the order rows were read.
#[derive(Debug)]
pub enum RowEvent {
    Written { row: usize, path: PathBuf },
    /// Dry run: the file that would have been written.
    Planned { row: usize, path: PathBuf },
    /// Dry run: the target exists already, or an earlier row claims it, and
    /// the conflict policy would not overwrite it.
    Conflict { row: usize, path: PathBuf },
    Skipped { row: usize, path: PathBuf },
    Rejected { row: usize, error: ValidationError },
    Failed { row: usize, error: RowError },
}

impl RowEvent {
    pub fn row(&self) -> usize {
        match self {
            RowEvent::Written { row, .. }
            | RowEvent::Planned { row, .. }
            | RowEvent::Conflict { row, .. }
            | RowEvent::Skipped { row, .. }
            | RowEvent::Rejected { row, .. }
            | RowEvent::Failed { row, .. } => *row,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RowEvent::Written { .. } | RowEvent::Planned { .. })
    }
}

/// Final tally of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub succeeded: usize,
    /// Rejected, failed, skipped, and conflicting rows.
    pub failed: usize,
}

impl ImportSummary {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, event: &RowEvent) {
        if event.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// How rows are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Write,
    /// Validate and resolve paths only; never touch the filesystem or prompt.
    DryRun,
}

/// Runs imports with one configuration.
pub struct Importer<'a> {
    config: &'a ImportConfig,
    writer: PostWriter,
    mode: RunMode,
}

impl<'a> Importer<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self {
            config,
            writer: PostWriter::from_config(config),
            mode: RunMode::Write,
        }
    }

    pub fn mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Import every row of the CSV file at `input`.
    ///
    /// `on_event` sees each row's terminal state as soon as it is reached,
    /// before the next row is read.
    pub fn import_file<P, F>(
        &self,
        input: &Path,
        prompt: &mut P,
        on_event: F,
    ) -> Result<ImportSummary, ImportError>
    where
        P: OverwritePrompt + ?Sized,
        F: FnMut(&RowEvent),
    {
        let reader = RecordReader::open(input)?;
        tracing::info!(
            input = %input.display(),
            output_dir = %self.writer.output_dir().display(),
            mode = ?self.mode,
            "starting import"
        );
        Ok(self.import_records(reader, prompt, on_event))
    }

    /// Import from an already-opened reader.
    pub fn import_records<R, P, F>(
        &self,
        mut reader: RecordReader<R>,
        prompt: &mut P,
        mut on_event: F,
    ) -> ImportSummary
    where
        R: io::Read,
        P: OverwritePrompt + ?Sized,
        F: FnMut(&RowEvent),
    {
        let mut summary = ImportSummary::default();
        let mut planned = HashSet::new();
        for (row, record) in reader.records() {
            let event = self.process_row(row, record, prompt, &mut planned);
            log_event(&event);
            summary.record(&event);
            on_event(&event);
        }
        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "import finished"
        );
        summary
    }

    fn process_row<P>(
        &self,
        row: usize,
        record: Result<Record, RecordError>,
        prompt: &mut P,
        planned: &mut HashSet<PathBuf>,
    ) -> RowEvent
    where
        P: OverwritePrompt + ?Sized,
    {
        let record = match record {
            Ok(record) => record,
            Err(e) => return RowEvent::Failed { row, error: RowError::Read(e) },
        };
        let validated = match validate::validate(&record) {
            Ok(v) => v,
            Err(error) => return RowEvent::Rejected { row, error },
        };
        let slug = match slug::resolve_slug(&validated, row, self.config.empty_slug) {
            Ok(s) => s,
            Err(e) => return RowEvent::Failed { row, error: e.into() },
        };

        if self.mode == RunMode::DryRun {
            let path = self.writer.path_for(&slug);
            let taken = !planned.insert(path.clone()) || path.exists();
            if taken && self.config.on_conflict != ConflictPolicy::Overwrite {
                return RowEvent::Conflict { row, path };
            }
            return RowEvent::Planned { row, path };
        }

        match self.writer.write(&validated, &slug, prompt) {
            Ok(WriteOutcome::Written(path)) => RowEvent::Written { row, path },
            Ok(WriteOutcome::Skipped(path)) => RowEvent::Skipped { row, path },
            Err(e) => RowEvent::Failed { row, error: e.into() },
        }
    }
}

fn log_event(event: &RowEvent) {
    match event {
        RowEvent::Written { row, path } | RowEvent::Planned { row, path } => {
            tracing::debug!(row, path = %path.display(), "row imported");
        }
        RowEvent::Conflict { row, path } => {
            tracing::debug!(row, path = %path.display(), "row would conflict");
        }
        RowEvent::Skipped { row, path } => {
            tracing::debug!(row, path = %path.display(), "row skipped, file exists");
        }
        RowEvent::Rejected { row, error } => {
            tracing::debug!(row, reason = error.reason(), "{error}");
        }
        RowEvent::Failed { row, error } => {
            tracing::debug!(row, "{error}");
        }
    }
}
