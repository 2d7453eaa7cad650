//! PDF rasterisation: draw every page into a PNG via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async
//! contexts. `tokio::task::spawn_blocking` moves the work onto a dedicated
//! thread pool thread designed for blocking operations, preventing the
//! Tokio worker threads from stalling during CPU-heavy rendering.
//!
//! ## Scale factors, not DPI
//!
//! The comparison view renders at a fixed scale factor relative to the
//! page's own viewport (1.2 by default), the same way the visual surfaces
//! are sized in the result UI. OCR renders use a higher factor (2.0) since
//! recognition accuracy improves with pixel density.

use crate::config::CompareConfig;
use crate::error::PdfDiffError;
use crate::output::DocSide;
use crate::progress::CompareProgressCallback;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Rasterise every page of a document into `<out_dir>/page-NNN.png`.
///
/// The target directory is cleared first, so re-running a comparison
/// replaces any prior contents. Pages are rendered in ascending order and
/// all of them are written before this returns. Decode or render failures
/// propagate; nothing is caught here.
///
/// # Returns
/// The written image paths, in page order.
pub async fn render_document(
    bytes: Arc<Vec<u8>>,
    side: DocSide,
    out_dir: &Path,
    config: &CompareConfig,
) -> Result<Vec<PathBuf>, PdfDiffError> {
    let out_dir = out_dir.to_path_buf();
    let scale = config.render_scale;
    let password = config.password.clone();
    let progress = config.progress_callback.clone();

    tokio::task::spawn_blocking(move || {
        render_document_blocking(&bytes, side, &out_dir, scale, password.as_deref(), progress)
    })
    .await
    .map_err(|e| PdfDiffError::Internal(format!("Render task panicked: {}", e)))?
}

/// Blocking implementation of full-document rendering.
fn render_document_blocking(
    bytes: &[u8],
    side: DocSide,
    out_dir: &Path,
    scale: f32,
    password: Option<&str>,
    progress: Option<Arc<dyn CompareProgressCallback>>,
) -> Result<Vec<PathBuf>, PdfDiffError> {
    clear_dir(out_dir)?;

    let pdfium = bind_pdfium()?;
    let document = open_document(&pdfium, bytes, side, password)?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("Document {} loaded: {} pages", side, total_pages);

    if let Some(ref cb) = progress {
        cb.on_render_start(side, total_pages);
    }

    let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);
    let mut written = Vec::with_capacity(total_pages);

    for (idx, page) in pages.iter().enumerate() {
        let page_num = idx + 1;
        let bitmap =
            page.render_with_config(&render_config)
                .map_err(|e| PdfDiffError::RenderFailed {
                    side,
                    page: page_num,
                    detail: format!("{:?}", e),
                })?;

        let image = bitmap.as_image();
        let path = out_dir.join(format!("page-{:03}.png", page_num));
        image
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| PdfDiffError::OutputWriteFailed {
                path: path.clone(),
                source: std::io::Error::other(e),
            })?;

        debug!(
            "Rendered {} page {} → {}x{} px",
            side,
            page_num,
            image.width(),
            image.height()
        );

        if let Some(ref cb) = progress {
            cb.on_page_rendered(side, page_num, total_pages);
        }

        written.push(path);
    }

    Ok(written)
}

/// Render a single page off-screen at the given scale factor.
///
/// Used by the extraction stage to produce the image handed to OCR; nothing
/// is written to disk here.
pub(crate) fn render_page_image(
    page: &PdfPage<'_>,
    side: DocSide,
    page_num: usize,
    scale: f32,
) -> Result<DynamicImage, PdfDiffError> {
    let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);
    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| PdfDiffError::RenderFailed {
            side,
            page: page_num,
            detail: format!("{:?}", e),
        })?;
    Ok(bitmap.as_image())
}

/// Bind to a pdfium library: `PDFIUM_DYNAMIC_LIB_PATH` when set, the
/// system library search path otherwise.
pub(crate) fn bind_pdfium() -> Result<Pdfium, PdfDiffError> {
    let bindings = match std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        Ok(dir) if !dir.is_empty() => {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir))
        }
        _ => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| PdfDiffError::PdfiumBindingFailed(format!("{:?}", e)))?;
    Ok(Pdfium::new(bindings))
}

/// Open a document from its byte buffer, mapping pdfium's errors to ours.
pub(crate) fn open_document<'a>(
    pdfium: &'a Pdfium,
    bytes: &'a [u8],
    side: DocSide,
    password: Option<&str>,
) -> Result<PdfDocument<'a>, PdfDiffError> {
    pdfium.load_pdf_from_byte_slice(bytes, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                PdfDiffError::WrongPassword { side }
            } else {
                PdfDiffError::PasswordRequired { side }
            }
        } else {
            PdfDiffError::CorruptPdf {
                side,
                detail: err_str,
            }
        }
    })
}

/// Remove and recreate the page-image directory for one document.
fn clear_dir(dir: &Path) -> Result<(), PdfDiffError> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(PdfDiffError::OutputWriteFailed {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    }
    std::fs::create_dir_all(dir).map_err(|e| PdfDiffError::OutputWriteFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_dir_replaces_existing_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("doc-a");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("stale.png"), b"old").unwrap();

        clear_dir(&target).unwrap();

        assert!(target.exists());
        assert_eq!(std::fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn clear_dir_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested").join("doc-b");
        clear_dir(&target).unwrap();
        assert!(target.exists());
    }
}
