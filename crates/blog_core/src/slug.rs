//! Slug derivation for categories and posts.
//!
//! # Responsibility
//! - Derive stable URL identifiers from user-entered display text.
//!
//! # Invariants
//! - A slug is computed exactly once, at creation time; renames never
//!   recompute it.
//! - Category and post slugs use different rules and must stay separate
//!   functions: category slugs keep punctuation, post slugs strip it.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid non-word regex"));

/// Derives a category slug: lowercase, each whitespace run becomes one hyphen.
///
/// Punctuation is kept as-is, so `"Hello   World!"` yields `"hello-world!"`.
/// Input is not trimmed; leading/trailing whitespace becomes hyphens.
pub fn category_slug(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Derives a post slug: lowercase, punctuation removed, whitespace runs
/// become hyphens.
///
/// `"Hello   World!"` yields `"hello-world"`.
pub fn post_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    WHITESPACE_RE.replace_all(&stripped, "-").into_owned()
}
