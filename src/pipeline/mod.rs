//! Pipeline stages for document comparison.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different OCR backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ extract ──▶ diff
//! (path/URL)  (pdfium)   (text layer   (dissimilar,
//!             page PNGs   + OCR)        in crate::diff)
//! ```
//!
//! 1. [`input`]   — read the user-supplied path or URL once into an
//!    in-memory byte buffer, validating the `%PDF` magic
//! 2. [`render`]  — rasterise pages; runs in `spawn_blocking` because
//!    pdfium is not async-safe
//! 3. [`extract`] — per-page direct text extraction with per-page OCR
//!    fallback, then whole-document normalization
//! 4. [`ocr`]     — Tesseract subprocess recognition of a rendered page

pub mod extract;
pub mod input;
pub mod ocr;
pub mod render;
