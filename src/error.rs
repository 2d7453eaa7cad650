//! Error types for the pdfdiff library.
//!
//! A single fatal error enum: the comparison pipeline makes every external
//! call exactly once and has no per-page recovery, so any failure during
//! input resolution, rendering, extraction, or OCR aborts the whole
//! comparison and surfaces here. The only non-error terminal state — both
//! documents yielding no readable text — is modelled as
//! [`crate::output::CompareOutcome::NoReadableText`], not as an error.

use crate::output::DocSide;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdfdiff library.
#[derive(Debug, Error)]
pub enum PdfDiffError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The input was read, but it is not a PDF.
    #[error("Input for document {side} is not a valid PDF\nFirst bytes: {magic:?}")]
    NotAPdf { side: DocSide, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("Document {side} is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { side: DocSide, detail: String },

    /// PDF requires a password but none was provided.
    #[error("Document {side} is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { side: DocSide },

    /// A password was provided but it is wrong.
    #[error("Wrong password for document {side}")]
    WrongPassword { side: DocSide },

    /// pdfium returned an error while rasterising a specific page.
    #[error("Rendering failed for document {side} page {page}: {detail}")]
    RenderFailed {
        side: DocSide,
        page: usize,
        detail: String,
    },

    /// Direct text-layer extraction failed on a specific page.
    #[error("Text extraction failed for document {side} page {page}: {detail}")]
    TextExtractionFailed {
        side: DocSide,
        page: usize,
        detail: String,
    },

    // ── OCR errors ────────────────────────────────────────────────────────
    /// The tesseract binary could not be found or executed.
    #[error(
        "OCR engine unavailable: {detail}\n\n\
Pages with no embedded text layer need Tesseract to be read.\n\
Install it with your package manager (e.g. `apt install tesseract-ocr`,\n\
`brew install tesseract`) or disable OCR with --no-ocr."
    )]
    OcrUnavailable { detail: String },

    /// Tesseract ran but failed on a specific page.
    #[error("OCR failed for document {side} page {page}: {detail}")]
    OcrFailed {
        side: DocSide,
        page: usize,
        detail: String,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file (page image or report).
    #[error("Failed to write output '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Install pdfium or point PDFIUM_DYNAMIC_LIB_PATH at an existing copy of\n\
libpdfium for your platform (https://github.com/bblanchon/pdfium-binaries)."
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_failed_display_names_side_and_page() {
        let e = PdfDiffError::RenderFailed {
            side: DocSide::B,
            page: 4,
            detail: "bitmap allocation".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("document B"), "got: {msg}");
        assert!(msg.contains("page 4"), "got: {msg}");
    }

    #[test]
    fn not_a_pdf_display_includes_magic() {
        let e = PdfDiffError::NotAPdf {
            side: DocSide::A,
            magic: *b"PK\x03\x04",
        };
        assert!(e.to_string().contains("not a valid PDF"));
    }

    #[test]
    fn ocr_unavailable_mentions_tesseract() {
        let e = PdfDiffError::OcrUnavailable {
            detail: "No such file or directory".into(),
        };
        assert!(e.to_string().contains("Tesseract"));
    }
}
