//! Standalone HTML report assembly.
//!
//! The report mirrors the comparison view: two page containers showing
//! every rendered page of each document, and a result area holding the
//! diff markup. Additions and removals use the `diff-added` /
//! `diff-removed` classes; unchanged text is a plain span.
//!
//! Image references are relative to the report file, so the output
//! directory can be moved or zipped as a unit.

use crate::output::{CompareOutput, DocSide, DocumentText};
use std::path::Path;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 1.5rem; }
.pages { display: flex; gap: 1.5rem; }
.pages section { flex: 1; min-width: 0; }
.pages img { width: 100%; border: 1px solid #ccc; margin-bottom: .75rem; display: block; }
#diff-result { white-space: pre-wrap; border: 1px solid #ccc; padding: 1rem; line-height: 1.5; }
.diff-added { background: #d4fcbc; }
.diff-removed { background: #fbb6c2; text-decoration: line-through; }
";

/// Assemble the full report page for a comparison result.
///
/// `base_dir` is the directory the report will live in; page image paths
/// are rewritten relative to it.
pub fn render_report(output: &CompareOutput, base_dir: &Path) -> String {
    let mut html = String::with_capacity(4096 + output.diff_html.len());

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>PDF comparison</title>\n<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<h1>PDF comparison</h1>\n<div class=\"pages\">\n");
    push_page_container(&mut html, &output.doc_a, base_dir);
    push_page_container(&mut html, &output.doc_b, base_dir);
    html.push_str("</div>\n");

    html.push_str("<h2>Text differences</h2>\n<div id=\"diff-result\">");
    // Already span-wrapped and escaped (or the terminal message markup).
    html.push_str(&output.diff_html);
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

/// One document's page container: heading plus its page images in order.
fn push_page_container(html: &mut String, doc: &DocumentText, base_dir: &Path) {
    let id = match doc.side {
        DocSide::A => "pdf-a-view",
        DocSide::B => "pdf-b-view",
    };
    html.push_str(&format!(
        "<section id=\"{id}\">\n<h2>Document {} ({} pages{})</h2>\n",
        doc.side,
        doc.page_count,
        if doc.ocr_pages.is_empty() {
            String::new()
        } else {
            format!(", {} via OCR", doc.ocr_pages.len())
        }
    ));
    for (idx, image) in doc.page_images.iter().enumerate() {
        let src = image
            .strip_prefix(base_dir)
            .unwrap_or(image.as_path())
            .to_string_lossy()
            .replace('\\', "/");
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"Document {} page {}\">\n",
            html_escape::encode_double_quoted_attribute(&src),
            doc.side,
            idx + 1
        ));
    }
    html.push_str("</section>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffKind, DiffSegment};
    use crate::output::{CompareOutcome, CompareStats};
    use std::path::PathBuf;

    fn sample_output(base: &Path) -> CompareOutput {
        let segments = vec![
            DiffSegment::new(DiffKind::Unchanged, "foo "),
            DiffSegment::new(DiffKind::Removed, "bar"),
            DiffSegment::new(DiffKind::Added, "baz"),
        ];
        let diff_html = crate::diff::render_spans(&segments);
        CompareOutput {
            doc_a: DocumentText {
                side: DocSide::A,
                page_count: 2,
                ocr_pages: vec![2],
                text: "foo bar".into(),
                page_images: vec![
                    base.join("doc-a").join("page-001.png"),
                    base.join("doc-a").join("page-002.png"),
                ],
            },
            doc_b: DocumentText {
                side: DocSide::B,
                page_count: 1,
                ocr_pages: vec![],
                text: "foo baz".into(),
                page_images: vec![base.join("doc-b").join("page-001.png")],
            },
            outcome: CompareOutcome::Diff { segments },
            diff_html,
            stats: CompareStats::default(),
        }
    }

    #[test]
    fn report_contains_both_containers_and_diff_area() {
        let base = PathBuf::from("/tmp/out");
        let html = render_report(&sample_output(&base), &base);
        assert!(html.contains("id=\"pdf-a-view\""));
        assert!(html.contains("id=\"pdf-b-view\""));
        assert!(html.contains("id=\"diff-result\""));
        assert!(html.contains("class=\"diff-added\""));
        assert!(html.contains("class=\"diff-removed\""));
    }

    #[test]
    fn image_paths_are_relative_to_report() {
        let base = PathBuf::from("/tmp/out");
        let html = render_report(&sample_output(&base), &base);
        assert!(html.contains("src=\"doc-a/page-001.png\""), "got: {html}");
        assert!(html.contains("src=\"doc-b/page-001.png\""));
        assert!(!html.contains("/tmp/out/doc-a"));
    }

    #[test]
    fn no_readable_text_message_lands_in_result_area() {
        let base = PathBuf::from("/out");
        let mut output = sample_output(&base);
        output.outcome = CompareOutcome::NoReadableText;
        output.diff_html = crate::compare::NO_READABLE_TEXT_HTML.to_string();
        let html = render_report(&output, &base);
        assert!(html.contains("No readable text found in PDFs."));
    }
}
