//! Semantic text diffing and HTML span rendering.
//!
//! The diff itself is delegated to [`dissimilar`], the Rust port of the
//! diff-match-patch algorithm. Its `diff` entry point includes the
//! semantic-cleanup pass, which merges the fine-grained character edits the
//! raw Myers algorithm produces into human-readable chunks.
//!
//! The numeric `1 / -1 / 0` operation codes of diff-match-patch are modelled
//! as [`DiffKind`]; a diff result is an ordered `Vec<DiffSegment>` whose
//! unchanged+removed concatenation reconstructs the left text and whose
//! unchanged+added concatenation reconstructs the right text.

use dissimilar::Chunk;
use serde::{Deserialize, Serialize};

/// Classification of one diff segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Present in both texts.
    Unchanged,
    /// Present only in the right (B) text.
    Added,
    /// Present only in the left (A) text.
    Removed,
}

impl DiffKind {
    /// True for [`DiffKind::Unchanged`].
    pub fn is_unchanged(self) -> bool {
        matches!(self, DiffKind::Unchanged)
    }
}

/// One `(kind, text)` unit of a diff result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Diff two texts into an ordered segment list.
///
/// Semantic cleanup is already applied by [`dissimilar::diff`], so adjacent
/// trivial fragments arrive pre-merged.
pub fn diff_texts(left: &str, right: &str) -> Vec<DiffSegment> {
    dissimilar::diff(left, right)
        .into_iter()
        .map(|chunk| match chunk {
            Chunk::Equal(s) => DiffSegment::new(DiffKind::Unchanged, s),
            Chunk::Insert(s) => DiffSegment::new(DiffKind::Added, s),
            Chunk::Delete(s) => DiffSegment::new(DiffKind::Removed, s),
        })
        .collect()
}

/// Render diff segments as HTML spans.
///
/// Each segment's text is HTML-escaped (`&` first, then `<` and `>`, so
/// entities are never double-escaped — `html_escape::encode_text` performs
/// exactly these three substitutions) and wrapped in a span whose class is
/// selected by kind: added is checked before removed, unchanged spans carry
/// no class. Escaping happens only here, never on the text handed to the
/// diff algorithm.
pub fn render_spans(segments: &[DiffSegment]) -> String {
    let mut html = String::new();
    for seg in segments {
        let escaped = html_escape::encode_text(&seg.text);
        if seg.kind == DiffKind::Added {
            html.push_str(&format!("<span class=\"diff-added\">{escaped}</span>"));
        } else if seg.kind == DiffKind::Removed {
            html.push_str(&format!("<span class=\"diff-removed\">{escaped}</span>"));
        } else {
            html.push_str(&format!("<span>{escaped}</span>"));
        }
    }
    html
}
