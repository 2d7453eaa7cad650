//! Progress-callback trait for comparison events.
//!
//! Inject an `Arc<dyn CompareProgressCallback>` via
//! [`crate::config::CompareConfigBuilder::progress_callback`] to receive
//! events as the pipeline renders pages, runs OCR, and finishes each stage.
//!
//! Progress is an observer channel only: implementations cannot influence
//! control flow, and the pipeline ignores anything they do. The trait is
//! `Send + Sync` so it works when the two documents are processed
//! concurrently.

use crate::output::DocSide;

/// Called by the comparison pipeline as it advances.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. With `concurrent = true` the per-document methods
/// may be called from two tasks at once; implementations must synchronise
/// shared mutable state.
pub trait CompareProgressCallback: Send + Sync {
    /// Called once after both inputs have been resolved, before any
    /// rendering.
    fn on_compare_start(&self) {}

    /// Called when a document's page rendering begins.
    fn on_render_start(&self, side: DocSide, total_pages: usize) {
        let _ = (side, total_pages);
    }

    /// Called after each page image is written.
    fn on_page_rendered(&self, side: DocSide, page_num: usize, total_pages: usize) {
        let _ = (side, page_num, total_pages);
    }

    /// Called when a page has no embedded text layer and OCR begins.
    fn on_ocr_start(&self, side: DocSide, page_num: usize) {
        let _ = (side, page_num);
    }

    /// Called when OCR for a page completes.
    ///
    /// # Arguments
    /// * `text_len` — byte length of the recognized text
    fn on_ocr_complete(&self, side: DocSide, page_num: usize, text_len: usize) {
        let _ = (side, page_num, text_len);
    }

    /// Called when a document's text extraction completes.
    fn on_extract_complete(&self, side: DocSide, text_len: usize, ocr_pages: usize) {
        let _ = (side, text_len, ocr_pages);
    }

    /// Called once after the diff has been computed (or the no-readable-text
    /// outcome was reached, in which case `segment_count` is 0).
    fn on_compare_complete(&self, segment_count: usize) {
        let _ = segment_count;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl CompareProgressCallback for NoopProgressCallback {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct TrackingCallback {
        rendered: AtomicUsize,
        ocr_started: AtomicUsize,
        ocr_completed: AtomicUsize,
    }

    impl CompareProgressCallback for TrackingCallback {
        fn on_page_rendered(&self, _side: DocSide, _page_num: usize, _total: usize) {
            self.rendered.fetch_add(1, Ordering::SeqCst);
        }

        fn on_ocr_start(&self, _side: DocSide, _page_num: usize) {
            self.ocr_started.fetch_add(1, Ordering::SeqCst);
        }

        fn on_ocr_complete(&self, _side: DocSide, _page_num: usize, _len: usize) {
            self.ocr_completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_compare_start();
        cb.on_render_start(DocSide::A, 3);
        cb.on_page_rendered(DocSide::A, 1, 3);
        cb.on_ocr_start(DocSide::B, 2);
        cb.on_ocr_complete(DocSide::B, 2, 120);
        cb.on_extract_complete(DocSide::B, 4096, 1);
        cb.on_compare_complete(7);
    }

    #[test]
    fn tracking_callback_counts_events() {
        let cb = Arc::new(TrackingCallback {
            rendered: AtomicUsize::new(0),
            ocr_started: AtomicUsize::new(0),
            ocr_completed: AtomicUsize::new(0),
        });

        cb.on_page_rendered(DocSide::A, 1, 2);
        cb.on_page_rendered(DocSide::A, 2, 2);
        cb.on_ocr_start(DocSide::A, 2);
        cb.on_ocr_complete(DocSide::A, 2, 33);

        assert_eq!(cb.rendered.load(Ordering::SeqCst), 2);
        assert_eq!(cb.ocr_started.load(Ordering::SeqCst), 1);
        assert_eq!(cb.ocr_completed.load(Ordering::SeqCst), 1);
    }
}
