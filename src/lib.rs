//! # pdfdiff
//!
//! Compare two PDF documents visually and textually.
//!
//! ## What it does
//!
//! Every page of both documents is rasterised to a PNG (visual proof of
//! what was compared), each document's text is extracted page by page —
//! directly from the embedded text layer when one exists, via Tesseract
//! OCR when a page is image-only — and the two normalized texts are run
//! through a semantic character diff. The result is an HTML report with
//! additions and removals highlighted span by span.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF A, PDF B
//!  │
//!  ├─ 1. Input    read each path/URL once into a byte buffer
//!  ├─ 2. Render   rasterise pages via pdfium (CPU-bound, spawn_blocking)
//!  ├─ 3. Extract  text layer per page, OCR fallback for image-only pages
//!  ├─ 4. Diff     diff-match-patch with semantic cleanup (dissimilar)
//!  └─ 5. Report   escaped, class-tagged spans + page image containers
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfdiff::{compare, CompareConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CompareConfig::default();
//!     let output = compare("old.pdf", "new.pdf", "out", &config).await?;
//!     if output.has_changes() {
//!         println!("{}", output.diff_html);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfdiff` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdfdiff = { version = "0.3", default-features = false }
//! ```
//!
//! ## Requirements
//!
//! A pdfium shared library must be loadable (`PDFIUM_DYNAMIC_LIB_PATH`
//! points at a copy, or it is on the default library search path). The
//! `tesseract` binary is only needed when a page has no embedded text
//! layer; fully digital PDFs never invoke it.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod text;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use compare::{compare, compare_sync, compare_to_dir, NO_READABLE_TEXT_HTML};
pub use config::{CompareConfig, CompareConfigBuilder, DEFAULT_OCR_SCALE, DEFAULT_RENDER_SCALE};
pub use diff::{diff_texts, render_spans, DiffKind, DiffSegment};
pub use error::PdfDiffError;
pub use output::{CompareOutcome, CompareOutput, CompareStats, DocSide, DocumentText};
pub use progress::{CompareProgressCallback, NoopProgressCallback};
pub use report::render_report;
pub use text::normalize_text;
