//! Shared test utilities for the post-import test suite.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let input = write_csv(tmp.path(), "date,title,content\n2024-01-01,Hi,Body\n");
//! let mut prompt = ScriptedPrompt::new(&[false]);
//! ```

use crate::validate::ValidatedRecord;
use crate::writer::OverwritePrompt;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `content` to `<dir>/posts.csv` and return its path.
pub fn write_csv(dir: &Path, content: &str) -> PathBuf {
    crate::logging::init_test();
    let path = dir.join("posts.csv");
    std::fs::write(&path, content).unwrap();
    path
}

/// A valid record dated 2024-03-15 with body `Some text.`.
pub fn sample_record(title: &str) -> ValidatedRecord {
    ValidatedRecord {
        date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        title: title.to_string(),
        content: "Some text.".to_string(),
        slug: None,
    }
}

// =========================================================================
// Prompt double
// =========================================================================

/// Answers overwrite prompts from a fixed script and records every path it
/// was asked about. Panics when asked more often than scripted.
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    pub asked: Vec<PathBuf>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl OverwritePrompt for ScriptedPrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool> {
        self.asked.push(path.to_path_buf());
        let answer = self
            .answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected overwrite prompt for {}", path.display()));
        Ok(answer)
    }
}
