//! The comparison orchestrator.
//!
//! Control flow is linear: resolve both inputs, render document A's pages,
//! render document B's pages, extract text A, extract text B, diff, render
//! the diff markup. Every external call happens exactly once per
//! invocation; there are no retries and no partial-result recovery.
//!
//! The two documents are independent, so [`CompareConfig::concurrent`]
//! may run each stage for A and B in parallel. The visible results are
//! identical either way: each side owns its image directory, and the diff
//! only runs once both texts are complete.

use crate::config::CompareConfig;
use crate::diff;
use crate::error::PdfDiffError;
use crate::output::{CompareOutcome, CompareOutput, CompareStats, DocSide, DocumentText};
use crate::pipeline::{extract, input, render};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Markup shown in the result area when neither document yields text.
pub const NO_READABLE_TEXT_HTML: &str = "<b>No readable text found in PDFs.</b>";

/// Compare two PDF documents.
///
/// `input_a` / `input_b` are local paths or HTTP(S) URLs. Rendered page
/// images are written beneath `out_dir` (`doc-a/`, `doc-b/`), replacing any
/// prior contents, so re-running a comparison is idempotent in its visible
/// side effects.
///
/// # Errors
/// Both inputs are resolved and validated before anything is rendered; a
/// missing or non-PDF input aborts with no side effects. Later failures
/// (decode, render, extraction, OCR) abort the comparison at the failing
/// page.
pub async fn compare(
    input_a: impl AsRef<str>,
    input_b: impl AsRef<str>,
    out_dir: impl AsRef<Path>,
    config: &CompareConfig,
) -> Result<CompareOutput, PdfDiffError> {
    let total_start = Instant::now();
    let input_a = input_a.as_ref();
    let input_b = input_b.as_ref();
    let out_dir = out_dir.as_ref();
    info!("Comparing '{}' against '{}'", input_a, input_b);

    // ── Step 1: Resolve both inputs (no side effects yet) ────────────────
    let timeout = config.download_timeout_secs;
    let bytes_a = Arc::new(input::resolve_input(input_a, DocSide::A, timeout).await?);
    let bytes_b = Arc::new(input::resolve_input(input_b, DocSide::B, timeout).await?);

    if let Some(ref cb) = config.progress_callback {
        cb.on_compare_start();
    }

    let dir_a = out_dir.join(DocSide::A.dir_name());
    let dir_b = out_dir.join(DocSide::B.dir_name());

    // ── Step 2: Render both documents' pages ─────────────────────────────
    let render_start = Instant::now();
    let (pages_a, pages_b) = if config.concurrent {
        futures::future::try_join(
            render::render_document(Arc::clone(&bytes_a), DocSide::A, &dir_a, config),
            render::render_document(Arc::clone(&bytes_b), DocSide::B, &dir_b, config),
        )
        .await?
    } else {
        let a = render::render_document(Arc::clone(&bytes_a), DocSide::A, &dir_a, config).await?;
        let b = render::render_document(Arc::clone(&bytes_b), DocSide::B, &dir_b, config).await?;
        (a, b)
    };
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    info!(
        "Rendered {} + {} pages in {}ms",
        pages_a.len(),
        pages_b.len(),
        render_duration_ms
    );

    // ── Step 3: Extract text from both documents ─────────────────────────
    let extract_start = Instant::now();
    let (extract_a, extract_b) = if config.concurrent {
        futures::future::try_join(
            extract::extract_text(Arc::clone(&bytes_a), DocSide::A, config),
            extract::extract_text(Arc::clone(&bytes_b), DocSide::B, config),
        )
        .await?
    } else {
        let a = extract::extract_text(Arc::clone(&bytes_a), DocSide::A, config).await?;
        let b = extract::extract_text(Arc::clone(&bytes_b), DocSide::B, config).await?;
        (a, b)
    };
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;

    // ── Step 4: Diff (or the no-readable-text terminal state) ────────────
    let diff_start = Instant::now();
    let outcome = diff_outcome(&extract_a.text, &extract_b.text);
    let diff_duration_ms = diff_start.elapsed().as_millis() as u64;

    let diff_html = match &outcome {
        CompareOutcome::NoReadableText => {
            info!("Neither document yielded readable text");
            NO_READABLE_TEXT_HTML.to_string()
        }
        CompareOutcome::Diff { segments } => {
            debug!("Diff produced {} segments", segments.len());
            diff::render_spans(segments)
        }
    };

    if let Some(ref cb) = config.progress_callback {
        cb.on_compare_complete(outcome.segments().map_or(0, |segs| segs.len()));
    }

    let stats = CompareStats {
        pages_a: extract_a.page_count,
        pages_b: extract_b.page_count,
        ocr_pages_a: extract_a.ocr_pages.len(),
        ocr_pages_b: extract_b.ocr_pages.len(),
        render_duration_ms,
        extract_duration_ms,
        diff_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Comparison complete in {}ms ({} OCR pages)",
        stats.total_duration_ms,
        stats.ocr_pages_a + stats.ocr_pages_b
    );

    Ok(CompareOutput {
        doc_a: document_text(DocSide::A, extract_a, pages_a),
        doc_b: document_text(DocSide::B, extract_b, pages_b),
        outcome,
        diff_html,
        stats,
    })
}

/// Synchronous wrapper around [`compare`].
///
/// Creates a temporary tokio runtime internally.
pub fn compare_sync(
    input_a: impl AsRef<str>,
    input_b: impl AsRef<str>,
    out_dir: impl AsRef<Path>,
    config: &CompareConfig,
) -> Result<CompareOutput, PdfDiffError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| PdfDiffError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(compare(input_a, input_b, out_dir, config))
}

/// Compare two documents and write the HTML report to
/// `<out_dir>/report.html`.
///
/// Uses atomic write (temp file + rename) to prevent partial reports.
///
/// # Returns
/// The comparison output and the path of the written report.
pub async fn compare_to_dir(
    input_a: impl AsRef<str>,
    input_b: impl AsRef<str>,
    out_dir: impl AsRef<Path>,
    config: &CompareConfig,
) -> Result<(CompareOutput, PathBuf), PdfDiffError> {
    let out_dir = out_dir.as_ref();
    let output = compare(input_a, input_b, out_dir, config).await?;

    let html = crate::report::render_report(&output, out_dir);
    let report_path = out_dir.join("report.html");

    let tmp_path = report_path.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, &html)
        .await
        .map_err(|e| PdfDiffError::OutputWriteFailed {
            path: report_path.clone(),
            source: e,
        })?;
    tokio::fs::rename(&tmp_path, &report_path)
        .await
        .map_err(|e| PdfDiffError::OutputWriteFailed {
            path: report_path.clone(),
            source: e,
        })?;

    Ok((output, report_path))
}

/// Diff two normalized texts, or report the no-readable-text terminal
/// state when both are empty. The diff engine is never invoked in that
/// case.
fn diff_outcome(text_a: &str, text_b: &str) -> CompareOutcome {
    if text_a.is_empty() && text_b.is_empty() {
        CompareOutcome::NoReadableText
    } else {
        CompareOutcome::Diff {
            segments: diff::diff_texts(text_a, text_b),
        }
    }
}

fn document_text(
    side: DocSide,
    extracted: extract::ExtractResult,
    page_images: Vec<PathBuf>,
) -> DocumentText {
    DocumentText {
        side,
        page_count: extracted.page_count,
        ocr_pages: extracted.ocr_pages,
        text: extracted.text,
        page_images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffKind;

    #[test]
    fn both_empty_is_terminal_without_diffing() {
        assert_eq!(diff_outcome("", ""), CompareOutcome::NoReadableText);
    }

    #[test]
    fn one_sided_text_still_diffs() {
        let outcome = diff_outcome("only left", "");
        let segs = outcome.segments().expect("diff must run");
        assert!(segs.iter().all(|s| s.kind == DiffKind::Removed));
    }

    #[test]
    fn identical_texts_diff_to_unchanged() {
        let outcome = diff_outcome("Hello world", "Hello world");
        let segs = outcome.segments().unwrap();
        assert!(segs.iter().all(|s| s.kind == DiffKind::Unchanged));
    }

    #[tokio::test]
    async fn missing_input_aborts_before_rendering() {
        let tmp = tempfile::tempdir().unwrap();
        let config = CompareConfig::default();
        let err = compare(
            "/no/such/a.pdf",
            "/no/such/b.pdf",
            tmp.path(),
            &config,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PdfDiffError::FileNotFound { .. }));
        // No side effects: the page-image directories were never created.
        assert!(!tmp.path().join("doc-a").exists());
        assert!(!tmp.path().join("doc-b").exists());
    }

    #[tokio::test]
    async fn non_pdf_second_input_aborts_before_rendering() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.pdf");
        let b = tmp.path().join("b.bin");
        std::fs::write(&a, b"%PDF-1.4 stub").unwrap();
        std::fs::write(&b, b"GIF89a").unwrap();

        let config = CompareConfig::default();
        let err = compare(
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            tmp.path(),
            &config,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            PdfDiffError::NotAPdf {
                side: DocSide::B,
                ..
            }
        ));
        assert!(!tmp.path().join("doc-a").exists());
    }
}
