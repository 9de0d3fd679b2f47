//! Post file writing.
//!
//! [`PostWriter`] turns a validated record plus its slug into
//! `<output_dir>/<slug>.<extension>`. The output directory (and any missing
//! parents) is created before each write, so a failure there is reported
//! against the row being written rather than aborting the run.
//!
//! When the target already exists the configured [`ConflictPolicy`] decides:
//!
//! | Policy | Result |
//! |--------|--------|
//! | `prompt` | ask the [`OverwritePrompt`]; yes overwrites, no skips |
//! | `overwrite` | overwrite without asking |
//! | `skip` | [`WriteOutcome::Skipped`] |
//! | `fail` | [`WriteError::Exists`] |

use crate::config::{ConflictPolicy, ImportConfig};
use crate::frontmatter;
use crate::validate::ValidatedRecord;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Cannot create output directory {}: {source}", .path.display())]
    DirectoryCreate { path: PathBuf, source: io::Error },
    #[error("Cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("File already exists: {}", .0.display())]
    Exists(PathBuf),
    #[error("Overwrite prompt failed: {0}")]
    Prompt(#[source] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// The target existed and the overwrite was declined.
    Skipped(PathBuf),
}

/// Asks whether an existing file may be overwritten.
///
/// Blocking by nature; the whole batch waits on the answer.
pub trait OverwritePrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool>;
}

impl<F> OverwritePrompt for F
where
    F: FnMut(&Path) -> io::Result<bool>,
{
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool> {
        self(path)
    }
}

/// Terminal prompt: warns on stdout and reads a `y`/`yes` answer from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl OverwritePrompt for StdinPrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "⚠️  Warning: File already exists: {}", path.display())?;
        write!(stdout, "Overwrite? (y/n): ")?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Writes post files into one output directory.
#[derive(Debug, Clone)]
pub struct PostWriter {
    output_dir: PathBuf,
    extension: String,
    on_conflict: ConflictPolicy,
}

impl PostWriter {
    pub fn new(output_dir: impl Into<PathBuf>, extension: &str, on_conflict: ConflictPolicy) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: extension.to_string(),
            on_conflict,
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(&config.output_dir, &config.extension, config.on_conflict)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Destination for a slug: `<output_dir>/<slug>.<extension>`.
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.output_dir.join(format!("{slug}.{}", self.extension))
    }

    /// Write one post, consulting `prompt` only under [`ConflictPolicy::Prompt`].
    pub fn write<P>(
        &self,
        record: &ValidatedRecord,
        slug: &str,
        prompt: &mut P,
    ) -> Result<WriteOutcome, WriteError>
    where
        P: OverwritePrompt + ?Sized,
    {
        fs::create_dir_all(&self.output_dir).map_err(|source| WriteError::DirectoryCreate {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.path_for(slug);
        if path.exists() {
            let overwrite = match self.on_conflict {
                ConflictPolicy::Overwrite => true,
                ConflictPolicy::Skip => false,
                ConflictPolicy::Fail => return Err(WriteError::Exists(path)),
                ConflictPolicy::Prompt => prompt
                    .confirm_overwrite(&path)
                    .map_err(WriteError::Prompt)?,
            };
            if !overwrite {
                tracing::debug!(path = %path.display(), "overwrite declined");
                return Ok(WriteOutcome::Skipped(path));
            }
            tracing::debug!(path = %path.display(), "overwriting existing file");
        }

        fs::write(&path, frontmatter::render(record)).map_err(|source| WriteError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(WriteOutcome::Written(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ScriptedPrompt, sample_record};
    use tempfile::TempDir;

    fn never_asked(path: &Path) -> io::Result<bool> {
        panic!("prompt should not be consulted for {}", path.display())
    }

    // =========================================================================
    // Fresh writes
    // =========================================================================

    #[test]
    fn writes_file_named_after_slug() {
        let tmp = TempDir::new().unwrap();
        let writer = PostWriter::new(tmp.path(), "md", ConflictPolicy::Prompt);

        let outcome = writer
            .write(&sample_record("Hello World!"), "hello-world", &mut never_asked)
            .unwrap();

        let expected = tmp.path().join("hello-world.md");
        assert_eq!(outcome, WriteOutcome::Written(expected.clone()));
        assert_eq!(
            fs::read_to_string(expected).unwrap(),
            "---\ndate: 2024-03-15\ntitle: \"Hello World!\"\n---\n\nSome text."
        );
    }

    #[test]
    fn creates_missing_output_directories() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("content").join("posts");
        let writer = PostWriter::new(&nested, "md", ConflictPolicy::Prompt);

        writer
            .write(&sample_record("T"), "t", &mut never_asked)
            .unwrap();
        assert!(nested.join("t.md").is_file());
    }

    #[test]
    fn custom_extension() {
        let tmp = TempDir::new().unwrap();
        let writer = PostWriter::new(tmp.path(), "markdown", ConflictPolicy::Prompt);
        assert_eq!(writer.path_for("a"), tmp.path().join("a.markdown"));
    }

    #[test]
    fn directory_blocked_by_file_is_directory_create_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("posts");
        fs::write(&blocker, "not a directory").unwrap();
        let writer = PostWriter::new(blocker.join("nested"), "md", ConflictPolicy::Prompt);

        let result = writer.write(&sample_record("T"), "t", &mut never_asked);
        assert!(matches!(result, Err(WriteError::DirectoryCreate { .. })));
    }

    #[test]
    fn target_is_directory_is_write_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("t.md")).unwrap();
        let writer = PostWriter::new(tmp.path(), "md", ConflictPolicy::Overwrite);

        let result = writer.write(&sample_record("T"), "t", &mut never_asked);
        assert!(matches!(result, Err(WriteError::Write { .. })));
    }

    // =========================================================================
    // Conflict handling
    // =========================================================================

    #[test]
    fn prompt_declined_skips_without_writing() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("t.md");
        fs::write(&target, "original").unwrap();
        let writer = PostWriter::new(tmp.path(), "md", ConflictPolicy::Prompt);
        let mut prompt = ScriptedPrompt::new(&[false]);

        let outcome = writer.write(&sample_record("T"), "t", &mut prompt).unwrap();

        assert_eq!(outcome, WriteOutcome::Skipped(target.clone()));
        assert_eq!(prompt.asked, vec![target.clone()]);
        assert_eq!(fs::read_to_string(target).unwrap(), "original");
    }

    #[test]
    fn prompt_accepted_overwrites() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("t.md");
        fs::write(&target, "original").unwrap();
        let writer = PostWriter::new(tmp.path(), "md", ConflictPolicy::Prompt);
        let mut prompt = ScriptedPrompt::new(&[true]);

        let outcome = writer.write(&sample_record("T"), "t", &mut prompt).unwrap();

        assert_eq!(outcome, WriteOutcome::Written(target.clone()));
        assert!(fs::read_to_string(target).unwrap().contains("title: \"T\""));
    }

    #[test]
    fn overwrite_policy_never_prompts() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("t.md"), "original").unwrap();
        let writer = PostWriter::new(tmp.path(), "md", ConflictPolicy::Overwrite);

        let outcome = writer.write(&sample_record("T"), "t", &mut never_asked).unwrap();
        assert!(matches!(outcome, WriteOutcome::Written(_)));
    }

    #[test]
    fn skip_policy_never_prompts() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("t.md"), "original").unwrap();
        let writer = PostWriter::new(tmp.path(), "md", ConflictPolicy::Skip);

        let outcome = writer.write(&sample_record("T"), "t", &mut never_asked).unwrap();
        assert!(matches!(outcome, WriteOutcome::Skipped(_)));
        assert_eq!(fs::read_to_string(tmp.path().join("t.md")).unwrap(), "original");
    }

    #[test]
    fn fail_policy_is_exists_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("t.md"), "original").unwrap();
        let writer = PostWriter::new(tmp.path(), "md", ConflictPolicy::Fail);

        let result = writer.write(&sample_record("T"), "t", &mut never_asked);
        assert!(matches!(result, Err(WriteError::Exists(p)) if p == tmp.path().join("t.md")));
    }

    #[test]
    fn prompt_io_failure_is_prompt_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("t.md"), "original").unwrap();
        let writer = PostWriter::new(tmp.path(), "md", ConflictPolicy::Prompt);
        let mut broken =
            |_: &Path| -> io::Result<bool> { Err(io::Error::new(io::ErrorKind::UnexpectedEof, "closed")) };

        let result = writer.write(&sample_record("T"), "t", &mut broken);
        assert!(matches!(result, Err(WriteError::Prompt(_))));
    }

    // =========================================================================
    // Answer parsing
    // =========================================================================

    #[test]
    fn yes_answers() {
        for answer in ["y\n", "Y", " yes ", "YES\r\n"] {
            assert!(is_yes(answer), "{answer:?} should accept");
        }
    }

    #[test]
    fn other_answers_decline() {
        for answer in ["n\n", "", "\n", "no", "yep", "overwrite"] {
            assert!(!is_yes(answer), "{answer:?} should decline");
        }
    }
}
