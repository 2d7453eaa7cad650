//! Text normalization applied to extracted document text.
//!
//! Extracted PDF text is noisy: text objects contribute uneven spacing,
//! OCR output arrives with ragged line breaks, and page-break markers add
//! their own newlines. Normalizing both documents with the same rules keeps
//! the diff focused on content instead of layout accidents.
//!
//! ## Rule Order
//!
//! The rules must run in this specific order: whitespace collapse first
//! (which also folds newlines into spaces), then newline collapse, then
//! trimming. Each rule is a pure `&str → String` pass with no shared state.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// Normalize extracted text for stable comparison.
///
/// 1. Collapse every run of whitespace to a single space
/// 2. Collapse every run of newlines to a single newline
/// 3. Trim leading/trailing whitespace
///
/// Idempotent: normalizing twice yields the same string as normalizing once.
pub fn normalize_text(input: &str) -> String {
    let s = RE_WHITESPACE_RUN.replace_all(input, " ");
    let s = RE_NEWLINE_RUN.replace_all(&s, "\n");
    s.trim().to_string()
}
