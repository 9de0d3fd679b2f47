//! # post-import
//!
//! Turns a CSV of posts (`date`, `title`, `content`, optional `slug`) into one
//! markdown file per post with a front-matter header, ready for static site
//! generators that read the "metadata header + content" convention.
//!
//! # Pipeline
//!
//! Every row goes through the same four steps, one row at a time:
//!
//! ```text
//! 1. Read       posts.csv  →  Record           (header checked once up front)
//! 2. Validate   Record     →  ValidatedRecord  (required fields, strict date)
//! 3. Slug       title      →  hello-world      (unless the row names one)
//! 4. Write      record     →  content/posts/hello-world.md
//! ```
//!
//! A row that fails any step is reported and counted, and the run continues.
//! Only a missing input file or a header without the required columns stops
//! the run, before anything is written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`record`] | CSV reading, header check, typed [`record::Record`] rows |
//! | [`validate`] | Required-field and `YYYY-MM-DD` date validation |
//! | [`slug`] | Title → slug normalization and the empty-slug policy |
//! | [`frontmatter`] | Header block rendering and parsing |
//! | [`writer`] | Output directory creation, conflict policy, overwrite prompt |
//! | [`import`] | Row-by-row orchestration, events, success/error tally |
//! | [`config`] | `post-import.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Conflict Policy Instead of a Hard-Wired Prompt
//!
//! Re-importing the same CSV, or two posts sharing a title, targets an
//! existing file. Interactively the user is asked whether to overwrite; for
//! scripted runs `on_conflict` can be `overwrite`, `skip`, or `fail`. The
//! prompt sits behind the [`writer::OverwritePrompt`] trait so tests script
//! the answers.
//!
//! ## Two Counters
//!
//! A declined overwrite is not a failure in the strict sense, but the summary
//! counts it with the errors so that a run with any unwritten row exits
//! non-zero.
//!
//! ## Unescaped Titles
//!
//! Titles are written between double quotes exactly as given. A title that
//! itself contains `"` yields a header strict YAML parsers may reject; this
//! is a known limitation rather than something silently rewritten.
//!
//! ## Explicit Slugs
//!
//! A `slug` cell is used as written, case and punctuation included. It must
//! still name a file directly inside the output directory, so a slug with a
//! path separator (or `.`/`..`) fails its row instead of escaping.

pub mod config;
pub mod frontmatter;
pub mod import;
pub mod logging;
pub mod output;
pub mod record;
pub mod slug;
pub mod validate;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_helpers;
