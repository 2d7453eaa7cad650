//! OCR fallback: recognize text on a rendered page image via Tesseract.
//!
//! Tesseract is invoked as a subprocess rather than linked as a native
//! library: the binary is what distributions package, and a subprocess
//! keeps the crate free of libtesseract build requirements. The rendered
//! page is written to a scratch PNG in a [`tempfile::TempDir`], which
//! cleans itself up when dropped, even on error paths.
//!
//! Recognition is attempted exactly once per page; failures propagate to
//! the extraction stage and abort the document.

use crate::error::PdfDiffError;
use crate::output::DocSide;
use image::DynamicImage;
use std::process::Command;
use tracing::debug;

/// Check whether the tesseract binary can be executed at all.
pub fn is_available() -> bool {
    Command::new("tesseract")
        .arg("--version")
        .output()
        .is_ok()
}

/// Run Tesseract over a rendered page image.
///
/// `language` is a Tesseract language code (e.g. `eng`). Blocking; callers
/// already run inside `spawn_blocking` alongside the pdfium work.
pub fn recognize_blocking(
    image: &DynamicImage,
    language: &str,
    side: DocSide,
    page_num: usize,
) -> Result<String, PdfDiffError> {
    let scratch = tempfile::tempdir().map_err(|e| {
        PdfDiffError::Internal(format!("Failed to create OCR scratch dir: {}", e))
    })?;

    let input_path = scratch.path().join("page.png");
    let output_base = scratch.path().join("out");

    image
        .save_with_format(&input_path, image::ImageFormat::Png)
        .map_err(|e| PdfDiffError::OcrFailed {
            side,
            page: page_num,
            detail: format!("Failed to write scratch image: {}", e),
        })?;

    debug!(
        "OCR {} page {}: {}x{} px, language '{}'",
        side,
        page_num,
        image.width(),
        image.height(),
        language
    );

    let output = Command::new("tesseract")
        .arg(&input_path)
        .arg(&output_base)
        .arg("-l")
        .arg(language)
        .arg("--oem")
        .arg("3")
        .arg("--psm")
        .arg("3")
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PdfDiffError::OcrUnavailable {
                    detail: e.to_string(),
                }
            } else {
                PdfDiffError::OcrFailed {
                    side,
                    page: page_num,
                    detail: format!("Failed to run tesseract: {}", e),
                }
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PdfDiffError::OcrFailed {
            side,
            page: page_num,
            detail: format!("tesseract exited with {}: {}", output.status, stderr.trim()),
        });
    }

    // Tesseract appends ".txt" to the output base it was given.
    let output_file = output_base.with_extension("txt");
    let text = std::fs::read_to_string(&output_file).map_err(|e| PdfDiffError::OcrFailed {
        side,
        page: page_num,
        detail: format!("Failed to read tesseract output: {}", e),
    })?;

    debug!("OCR {} page {}: {} bytes recognized", side, page_num, text.len());
    Ok(text)
}
