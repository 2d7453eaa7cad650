//! Text extraction: per-page direct extraction with OCR fallback.
//!
//! For each page the embedded text layer is tried first: the page's text
//! object fragments are concatenated with single spaces. Only when that
//! yields nothing (an image-only page, typically a scan) is the page
//! rendered off-screen at the OCR scale factor and handed to Tesseract.
//! Page texts accumulate in page order, each followed by a newline as the
//! explicit page-break marker, and the whole accumulator is normalized
//! once at the end.
//!
//! There is no partial-result recovery: a failure on any page aborts
//! extraction for the whole document.

use crate::config::CompareConfig;
use crate::error::PdfDiffError;
use crate::output::DocSide;
use crate::pipeline::{ocr, render};
use crate::text::normalize_text;
use pdfium_render::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// One document's extracted text plus the pages that needed OCR.
#[derive(Debug, Clone)]
pub struct ExtractResult {
    /// Full normalized document text, pages in order.
    pub text: String,
    /// Number of pages in the document.
    pub page_count: usize,
    /// 1-based page numbers whose text came from OCR.
    pub ocr_pages: Vec<usize>,
}

/// Extract all readable text from a document, in page order.
pub async fn extract_text(
    bytes: Arc<Vec<u8>>,
    side: DocSide,
    config: &CompareConfig,
) -> Result<ExtractResult, PdfDiffError> {
    let config = config.clone();

    tokio::task::spawn_blocking(move || extract_text_blocking(&bytes, side, &config))
        .await
        .map_err(|e| PdfDiffError::Internal(format!("Extraction task panicked: {}", e)))?
}

/// Blocking implementation of whole-document extraction.
fn extract_text_blocking(
    bytes: &[u8],
    side: DocSide,
    config: &CompareConfig,
) -> Result<ExtractResult, PdfDiffError> {
    let pdfium = render::bind_pdfium()?;
    let document = render::open_document(&pdfium, bytes, side, config.password.as_deref())?;

    let pages = document.pages();
    let page_count = pages.len() as usize;

    let mut full_text = String::new();
    let mut ocr_pages = Vec::new();

    for (idx, page) in pages.iter().enumerate() {
        let page_num = idx + 1;
        let direct = direct_page_text(&page);

        let (page_text, used_ocr) = if config.ocr_enabled {
            resolve_page_text(direct, || {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_ocr_start(side, page_num);
                }
                let image = render::render_page_image(&page, side, page_num, config.ocr_scale)?;
                let recognized =
                    ocr::recognize_blocking(&image, &config.ocr_language, side, page_num)?;
                if let Some(ref cb) = config.progress_callback {
                    cb.on_ocr_complete(side, page_num, recognized.len());
                }
                Ok(recognized)
            })?
        } else {
            // OCR disabled: image-only pages contribute empty text.
            (direct, false)
        };

        if used_ocr {
            ocr_pages.push(page_num);
        }
        debug!(
            "Extracted {} page {}: {} bytes{}",
            side,
            page_num,
            page_text.len(),
            if used_ocr { " (OCR)" } else { "" }
        );

        // Page-break marker.
        full_text.push_str(&page_text);
        full_text.push('\n');
    }

    let text = normalize_text(&full_text);
    info!(
        "Document {}: {} pages extracted, {} via OCR, {} chars",
        side,
        page_count,
        ocr_pages.len(),
        text.chars().count()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_extract_complete(side, text.len(), ocr_pages.len());
    }

    Ok(ExtractResult {
        text,
        page_count,
        ocr_pages,
    })
}

/// Direct text-layer extraction: the page's text fragments joined with
/// single spaces.
fn direct_page_text(page: &PdfPage<'_>) -> String {
    let fragments: Vec<String> = page
        .objects()
        .iter()
        .filter_map(|object| object.as_text_object().map(|t| t.text()))
        .collect();
    fragments.join(" ")
}

/// Decide a page's text: keep non-empty direct text, otherwise invoke the
/// OCR fallback exactly once.
///
/// Returns the chosen text and whether OCR ran. Separated from the pdfium
/// plumbing so the fallback policy is testable without a document.
fn resolve_page_text<F>(direct: String, ocr: F) -> Result<(String, bool), PdfDiffError>
where
    F: FnOnce() -> Result<String, PdfDiffError>,
{
    if direct.trim().is_empty() {
        Ok((ocr()?, true))
    } else {
        Ok((direct, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn direct_text_skips_ocr() {
        let calls = Cell::new(0);
        let (text, used_ocr) = resolve_page_text("Hello world".to_string(), || {
            calls.set(calls.get() + 1);
            Ok("from ocr".to_string())
        })
        .unwrap();
        assert_eq!(text, "Hello world");
        assert!(!used_ocr);
        assert_eq!(calls.get(), 0, "OCR must not be invoked");
    }

    #[test]
    fn empty_direct_text_invokes_ocr_exactly_once() {
        let calls = Cell::new(0);
        let (text, used_ocr) = resolve_page_text("   \n\t ".to_string(), || {
            calls.set(calls.get() + 1);
            Ok("Scanned page text".to_string())
        })
        .unwrap();
        assert_eq!(text, "Scanned page text");
        assert!(used_ocr);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn ocr_failure_propagates() {
        let result = resolve_page_text(String::new(), || {
            Err(PdfDiffError::OcrUnavailable {
                detail: "missing binary".into(),
            })
        });
        assert!(matches!(result, Err(PdfDiffError::OcrUnavailable { .. })));
    }
}
