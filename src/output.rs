//! Output types returned by [`crate::compare::compare`].
//!
//! Everything here derives `Serialize` so the CLI can emit the full
//! structured result with `--json` instead of the HTML report.

use crate::diff::DiffSegment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which of the two compared documents a page, path, or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocSide {
    /// The first (left / "removed") document.
    A,
    /// The second (right / "added") document.
    B,
}

impl DocSide {
    /// Subdirectory name under the output directory for this side's
    /// rendered page images.
    pub fn dir_name(self) -> &'static str {
        match self {
            DocSide::A => "doc-a",
            DocSide::B => "doc-b",
        }
    }
}

impl fmt::Display for DocSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocSide::A => f.write_str("A"),
            DocSide::B => f.write_str("B"),
        }
    }
}

/// Terminal state of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompareOutcome {
    /// Both documents were extracted and diffed.
    Diff { segments: Vec<DiffSegment> },
    /// Neither document yielded any text (after OCR fallback and
    /// normalization); the diff engine was never invoked.
    NoReadableText,
}

impl CompareOutcome {
    /// The diff segments, if the comparison produced any.
    pub fn segments(&self) -> Option<&[DiffSegment]> {
        match self {
            CompareOutcome::Diff { segments } => Some(segments),
            CompareOutcome::NoReadableText => None,
        }
    }
}

/// One document's extraction result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentText {
    /// Which input this came from.
    pub side: DocSide,
    /// Number of pages in the document.
    pub page_count: usize,
    /// 1-based page numbers whose text came from the OCR fallback rather
    /// than the embedded text layer.
    pub ocr_pages: Vec<usize>,
    /// The full normalized text, pages joined in page order.
    pub text: String,
    /// Paths of the rendered page images, in page order.
    pub page_images: Vec<PathBuf>,
}

/// Timing and volume statistics for one comparison run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareStats {
    /// Pages rendered for document A.
    pub pages_a: usize,
    /// Pages rendered for document B.
    pub pages_b: usize,
    /// Pages of document A that needed OCR.
    pub ocr_pages_a: usize,
    /// Pages of document B that needed OCR.
    pub ocr_pages_b: usize,
    /// Wall-clock milliseconds spent rasterising pages (both documents).
    pub render_duration_ms: u64,
    /// Wall-clock milliseconds spent extracting text (both documents,
    /// including OCR).
    pub extract_duration_ms: u64,
    /// Wall-clock milliseconds spent in the diff algorithm.
    pub diff_duration_ms: u64,
    /// Total wall-clock milliseconds for the whole comparison.
    pub total_duration_ms: u64,
}

/// The complete result of comparing two documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareOutput {
    /// Extraction result for document A.
    pub doc_a: DocumentText,
    /// Extraction result for document B.
    pub doc_b: DocumentText,
    /// Diff segments, or the no-readable-text terminal state.
    pub outcome: CompareOutcome,
    /// The diff markup for the result area: one escaped, class-wrapped
    /// `<span>` per segment, in segment order. For
    /// [`CompareOutcome::NoReadableText`] this holds the dedicated
    /// terminal message instead.
    pub diff_html: String,
    /// Timing statistics.
    pub stats: CompareStats,
}

impl CompareOutput {
    /// True when the diff contains at least one added or removed segment.
    pub fn has_changes(&self) -> bool {
        self.outcome
            .segments()
            .map(|segs| segs.iter().any(|s| !s.kind.is_unchanged()))
            .unwrap_or(false)
    }
}
