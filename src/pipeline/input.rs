//! Input resolution: read a user-supplied path or URL into memory.
//!
//! Each document is read exactly once into a byte buffer before any use;
//! every later stage (page rendering, text extraction, OCR renders) opens
//! the document from that buffer. URL inputs download straight to memory —
//! pdfium opens byte buffers here, so no temp file is needed. The `%PDF`
//! magic bytes are validated up front so callers get a meaningful error
//! rather than a pdfium parse failure.

use crate::error::PdfDiffError;
use crate::output::DocSide;
use std::path::PathBuf;
use tracing::{debug, info};

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve one input slot to an in-memory PDF byte buffer.
///
/// If the input is a URL, download it. If it is a local file, validate it
/// exists and is readable. Either way the `%PDF` magic is checked before
/// returning.
pub async fn resolve_input(
    input: &str,
    side: DocSide,
    timeout_secs: u64,
) -> Result<Vec<u8>, PdfDiffError> {
    let bytes = if is_url(input) {
        download_url(input, timeout_secs).await?
    } else {
        read_local(input).await?
    };
    validate_magic(&bytes, side)?;
    debug!("Resolved document {}: {} bytes", side, bytes.len());
    Ok(bytes)
}

/// Reject buffers that do not start with the PDF magic bytes.
fn validate_magic(bytes: &[u8], side: DocSide) -> Result<(), PdfDiffError> {
    let mut magic = [0u8; 4];
    let n = bytes.len().min(4);
    magic[..n].copy_from_slice(&bytes[..n]);
    if &magic != b"%PDF" {
        return Err(PdfDiffError::NotAPdf { side, magic });
    }
    Ok(())
}

/// Read a local file into memory, mapping I/O errors to input errors.
async fn read_local(path_str: &str) -> Result<Vec<u8>, PdfDiffError> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(PdfDiffError::FileNotFound { path });
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(PdfDiffError::PermissionDenied { path })
        }
        Err(_) => Err(PdfDiffError::FileNotFound { path }),
    }
}

/// Download a URL into memory.
async fn download_url(url: &str, timeout_secs: u64) -> Result<Vec<u8>, PdfDiffError> {
    info!("Downloading PDF from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| PdfDiffError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            PdfDiffError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            PdfDiffError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(PdfDiffError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| PdfDiffError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    info!("Downloaded {} bytes", bytes.len());
    Ok(bytes.to_vec())
}
