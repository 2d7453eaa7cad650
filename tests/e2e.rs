//! End-to-end integration tests for pdfdiff.
//!
//! These tests open real PDF files in `./test_cases/` through pdfium and,
//! for scanned fixtures, shell out to Tesseract. They are gated behind the
//! `PDFDIFF_E2E` environment variable so they do not run in CI unless a
//! pdfium library (and tesseract) are installed and fixtures are present.
//!
//! Run with:
//!   PDFDIFF_E2E=1 cargo test --test e2e -- --nocapture

use pdfdiff::{compare, CompareConfig, CompareOutcome, DiffKind};
use std::path::PathBuf;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases")
}

/// Skip this test unless PDFDIFF_E2E is set *and* the fixture exists.
macro_rules! e2e_skip_unless_ready {
    ($name:expr) => {{
        if std::env::var("PDFDIFF_E2E").is_err() {
            println!("SKIP — set PDFDIFF_E2E=1 to run e2e tests");
            return;
        }
        let p: PathBuf = test_cases_dir().join($name);
        if !p.exists() {
            println!("SKIP — test fixture not found: {}", p.display());
            return;
        }
        p
    }};
}

fn output_dir(name: &str) -> PathBuf {
    let d = std::env::temp_dir().join("pdfdiff-e2e").join(name);
    std::fs::create_dir_all(&d).ok();
    d
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn identical_documents_diff_to_unchanged_only() {
    let pdf = e2e_skip_unless_ready!("digital.pdf");
    let out = output_dir("identical");

    let config = CompareConfig::default();
    let result = compare(
        pdf.to_str().unwrap(),
        pdf.to_str().unwrap(),
        &out,
        &config,
    )
    .await
    .expect("comparison should succeed");

    match &result.outcome {
        CompareOutcome::Diff { segments } => {
            assert!(
                segments.iter().all(|s| s.kind == DiffKind::Unchanged),
                "identical inputs must produce only unchanged segments"
            );
        }
        CompareOutcome::NoReadableText => panic!("digital fixture must contain text"),
    }

    // A digital PDF must never trigger the OCR fallback.
    assert_eq!(result.stats.ocr_pages_a, 0);
    assert_eq!(result.stats.ocr_pages_b, 0);
    assert!(!result.has_changes());

    // Page images were written for both sides.
    assert_eq!(result.doc_a.page_images.len(), result.doc_a.page_count);
    assert!(result.doc_a.page_images[0].exists());
}

#[tokio::test]
async fn differing_documents_produce_added_and_removed() {
    let pdf_a = e2e_skip_unless_ready!("digital.pdf");
    let pdf_b = e2e_skip_unless_ready!("digital-edited.pdf");
    let out = output_dir("differing");

    let config = CompareConfig::default();
    let result = compare(
        pdf_a.to_str().unwrap(),
        pdf_b.to_str().unwrap(),
        &out,
        &config,
    )
    .await
    .expect("comparison should succeed");

    let segments = result.outcome.segments().expect("diff must run");
    assert!(segments.iter().any(|s| s.kind == DiffKind::Added));
    assert!(segments.iter().any(|s| s.kind == DiffKind::Removed));
    assert!(result.has_changes());
    assert!(result.diff_html.contains("diff-added"));
    assert!(result.diff_html.contains("diff-removed"));
}

#[tokio::test]
async fn scanned_page_goes_through_ocr() {
    let scanned = e2e_skip_unless_ready!("scanned.pdf");
    let out = output_dir("scanned");

    let config = CompareConfig::default();
    let result = compare(
        scanned.to_str().unwrap(),
        scanned.to_str().unwrap(),
        &out,
        &config,
    )
    .await
    .expect("comparison should succeed");

    assert!(
        result.stats.ocr_pages_a > 0,
        "image-only fixture must use the OCR fallback"
    );
    assert_eq!(result.stats.ocr_pages_a, result.stats.ocr_pages_b);
}

#[tokio::test]
async fn rerunning_replaces_page_images() {
    let pdf = e2e_skip_unless_ready!("digital.pdf");
    let out = output_dir("rerun");

    // Plant a stale file where document A's images go; the renderer must
    // clear it.
    let dir_a = out.join("doc-a");
    std::fs::create_dir_all(&dir_a).unwrap();
    std::fs::write(dir_a.join("stale.png"), b"old run").unwrap();

    let config = CompareConfig::default();
    let result = compare(
        pdf.to_str().unwrap(),
        pdf.to_str().unwrap(),
        &out,
        &config,
    )
    .await
    .expect("comparison should succeed");

    assert!(!dir_a.join("stale.png").exists());
    assert_eq!(
        std::fs::read_dir(&dir_a).unwrap().count(),
        result.doc_a.page_count
    );
}

#[tokio::test]
async fn concurrent_mode_matches_sequential_output() {
    let pdf_a = e2e_skip_unless_ready!("digital.pdf");
    let pdf_b = e2e_skip_unless_ready!("digital-edited.pdf");

    let sequential = compare(
        pdf_a.to_str().unwrap(),
        pdf_b.to_str().unwrap(),
        output_dir("seq"),
        &CompareConfig::default(),
    )
    .await
    .expect("sequential comparison should succeed");

    let concurrent = compare(
        pdf_a.to_str().unwrap(),
        pdf_b.to_str().unwrap(),
        output_dir("conc"),
        &CompareConfig::builder().concurrent(true).build().unwrap(),
    )
    .await
    .expect("concurrent comparison should succeed");

    assert_eq!(sequential.doc_a.text, concurrent.doc_a.text);
    assert_eq!(sequential.doc_b.text, concurrent.doc_b.text);
    assert_eq!(sequential.diff_html, concurrent.diff_html);
}
