//! Slug derivation for output filenames.
//!
//! Every post is written to `<slug>.md`. When a row carries an explicit slug
//! it is used as given; otherwise one is derived from the title with
//! [`slugify`]. The normalization runs in a fixed order because the order
//! changes the result on mixed input:
//!
//! 1. Lowercase the whole string.
//! 2. Replace each run of whitespace or underscores with a single `-`.
//! 3. Delete everything outside `[a-z0-9_-]`.
//! 4. Collapse runs of `-` into one.
//! 5. Strip leading and trailing `-`.
//!
//! - `"Hello World!"` → `"hello-world"`
//! - `"snake_case  title"` → `"snake-case-title"`
//! - `"Café -- Crème"` → `"caf-crme"`
//! - `"!!!"` → `""`
//!
//! An all-symbol title yields an empty slug. [`resolve_slug`] applies the
//! configured [`EmptySlugPolicy`] to that case.

use crate::config::EmptySlugPolicy;
use crate::validate::ValidatedRecord;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_]+").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_\-]").unwrap());
static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    #[error("derived slug is empty for title {0:?}")]
    Empty(String),
    #[error("slug {0:?} must be a plain file name")]
    NotAFileName(String),
}

/// Normalize arbitrary text into a filesystem- and URL-safe identifier.
///
/// Total over every input: symbol-only or empty text returns an empty string
/// rather than failing.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let hyphenated = SEPARATOR_RUN.replace_all(&lowered, "-");
    let stripped = DISALLOWED.replace_all(&hyphenated, "");
    let collapsed = HYPHEN_RUN.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Pick the slug a validated record is written under.
///
/// An explicit slug wins as long as it names a file directly inside the
/// output directory: no path separators, not `.` or `..`. Otherwise the title is slugified, and an empty
/// result falls back according to `policy`:
/// - `Error` → [`SlugError::Empty`]
/// - `Row` → `post-<row>`
/// - `Date` → the ISO date (`2024-03-15`)
pub fn resolve_slug(
    record: &ValidatedRecord,
    row: usize,
    policy: EmptySlugPolicy,
) -> Result<String, SlugError> {
    if let Some(explicit) = &record.slug {
        if explicit.contains(['/', '\\']) || matches!(explicit.as_str(), "." | "..") {
            return Err(SlugError::NotAFileName(explicit.clone()));
        }
        return Ok(explicit.clone());
    }
    let derived = slugify(&record.title);
    if !derived.is_empty() {
        return Ok(derived);
    }
    match policy {
        EmptySlugPolicy::Error => Err(SlugError::Empty(record.title.clone())),
        EmptySlugPolicy::Row => Ok(format!("post-{row}")),
        EmptySlugPolicy::Date => Ok(record.date_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(title: &str, slug: Option<&str>) -> ValidatedRecord {
        ValidatedRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            title: title.to_string(),
            content: "Body".to_string(),
            slug: slug.map(str::to_string),
        }
    }

    // =========================================================================
    // slugify
    // =========================================================================

    #[test]
    fn simple_title() {
        assert_eq!(slugify("Hello World!"), "hello-world");
    }

    #[test]
    fn whitespace_runs_become_one_hyphen() {
        assert_eq!(slugify("a   b\t\nc"), "a-b-c");
    }

    #[test]
    fn underscores_become_hyphens() {
        assert_eq!(slugify("snake_case__title"), "snake-case-title");
    }

    #[test]
    fn mixed_whitespace_and_underscore_run() {
        assert_eq!(slugify("one _ two"), "one-two");
    }

    #[test]
    fn punctuation_removed() {
        assert_eq!(slugify("What's new? (2024 edition)"), "whats-new-2024-edition");
    }

    #[test]
    fn hyphen_runs_collapse() {
        assert_eq!(slugify("rust -- is -- fun"), "rust-is-fun");
    }

    #[test]
    fn leading_and_trailing_hyphens_stripped() {
        assert_eq!(slugify("  --Intro--  "), "intro");
    }

    #[test]
    fn non_ascii_letters_dropped() {
        assert_eq!(slugify("Café Crème"), "caf-crme");
    }

    #[test]
    fn digits_preserved() {
        assert_eq!(slugify("Top 10 Tips"), "top-10-tips");
    }

    #[test]
    fn empty_input_gives_empty_slug() {
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn symbol_only_input_gives_empty_slug() {
        assert_eq!(slugify("!!! ??? ***"), "");
    }

    #[test]
    fn removal_before_collapse_joins_hyphens() {
        // "a - ! - b": separators first, then "!" removed, then "---" collapsed
        assert_eq!(slugify("a - ! - b"), "a-b");
    }

    #[test]
    fn unicode_whitespace_is_a_separator() {
        assert_eq!(slugify("a\u{00A0}b"), "a-b");
        assert_eq!(slugify("wide\u{3000}space"), "wide-space");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "Hello World!",
            "  --Intro--  ",
            "snake_case__title",
            "Café Crème",
            "a - ! - b",
            "ALL CAPS_AND_UNDERSCORES",
            "",
            "!!!",
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn output_only_contains_allowed_characters() {
        let slug = slugify("Ünïcödé & <html> \"quotes\" / back\\slash");
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
            "unexpected character in {slug:?}"
        );
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
    }

    // =========================================================================
    // resolve_slug
    // =========================================================================

    #[test]
    fn explicit_slug_wins() {
        let r = record("Hello World", Some("custom-slug"));
        assert_eq!(resolve_slug(&r, 2, EmptySlugPolicy::Error).unwrap(), "custom-slug");
    }

    #[test]
    fn explicit_slug_kept_verbatim() {
        let r = record("Hello", Some("Mixed_Case.v2"));
        assert_eq!(resolve_slug(&r, 2, EmptySlugPolicy::Error).unwrap(), "Mixed_Case.v2");
    }

    #[test]
    fn explicit_slug_with_path_components_rejected() {
        for slug in ["../escaped", "nested/post", "back\\slash", "..", "."] {
            let r = record("Hello", Some(slug));
            assert_eq!(
                resolve_slug(&r, 2, EmptySlugPolicy::Error),
                Err(SlugError::NotAFileName(slug.to_string())),
                "{slug:?} should be rejected"
            );
        }
    }

    #[test]
    fn derived_from_title_when_absent() {
        let r = record("Hello World!", None);
        assert_eq!(resolve_slug(&r, 2, EmptySlugPolicy::Error).unwrap(), "hello-world");
    }

    #[test]
    fn empty_slug_errors_by_default_policy() {
        let r = record("???", None);
        let result = resolve_slug(&r, 7, EmptySlugPolicy::Error);
        assert_eq!(result, Err(SlugError::Empty("???".to_string())));
    }

    #[test]
    fn empty_slug_falls_back_to_row_number() {
        let r = record("???", None);
        assert_eq!(resolve_slug(&r, 7, EmptySlugPolicy::Row).unwrap(), "post-7");
    }

    #[test]
    fn empty_slug_falls_back_to_date() {
        let r = record("???", None);
        assert_eq!(resolve_slug(&r, 7, EmptySlugPolicy::Date).unwrap(), "2024-03-15");
    }
}
