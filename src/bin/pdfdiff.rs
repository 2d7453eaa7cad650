//! CLI binary for pdfdiff.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `CompareConfig`, drives the comparison, and writes the HTML report.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfdiff::{
    compare, compare_to_dir, CompareConfig, CompareProgressCallback, DocSide,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar covering both documents' pages,
/// with per-OCR-page log lines. Page totals arrive per document as each
/// render starts, so the bar grows twice.
struct CliProgressCallback {
    bar: ProgressBar,
    ocr_pages: AtomicUsize,
}

impl CliProgressCallback {
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length grows in on_render_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDFs…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            ocr_pages: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_style(progress_style);
        self.bar.set_prefix("Comparing");
    }
}

impl CompareProgressCallback for CliProgressCallback {
    fn on_compare_start(&self) {
        self.activate_bar();
    }

    fn on_render_start(&self, side: DocSide, total_pages: usize) {
        self.bar
            .set_length(self.bar.length().unwrap_or(0) + total_pages as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Rendering document {side}: {total_pages} pages"))
        ));
    }

    fn on_page_rendered(&self, side: DocSide, page_num: usize, _total_pages: usize) {
        self.bar.set_message(format!("doc {side} page {page_num}"));
        self.bar.inc(1);
    }

    fn on_ocr_start(&self, side: DocSide, page_num: usize) {
        self.bar
            .set_message(format!("OCR doc {side} page {page_num}"));
    }

    fn on_ocr_complete(&self, side: DocSide, page_num: usize, text_len: usize) {
        self.ocr_pages.fetch_add(1, Ordering::SeqCst);
        self.bar.println(format!(
            "  {} OCR doc {side} page {page_num}  {}",
            green("✓"),
            dim(&format!("{text_len:>5} chars")),
        ));
    }

    fn on_extract_complete(&self, side: DocSide, text_len: usize, ocr_pages: usize) {
        self.bar.println(format!(
            "  {} Document {side} text extracted  {}{}",
            green("✓"),
            dim(&format!("{text_len} chars")),
            if ocr_pages > 0 {
                dim(&format!("  ({ocr_pages} pages via OCR)"))
            } else {
                String::new()
            },
        ));
    }

    fn on_compare_complete(&self, segment_count: usize) {
        self.bar.finish_and_clear();
        if segment_count > 0 {
            eprintln!(
                "{} diff computed: {} segments",
                green("✔"),
                bold(&segment_count.to_string())
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic comparison (report + page images under ./pdfdiff-out/)
  pdfdiff old.pdf new.pdf

  # Choose the output directory
  pdfdiff old.pdf new.pdf -o /tmp/contract-diff

  # Compare a local file against a URL
  pdfdiff v1.pdf https://example.com/v2.pdf

  # German OCR for scanned pages, higher render scale
  pdfdiff --lang deu --scale 1.5 scan-a.pdf scan-b.pdf

  # Structured JSON instead of the HTML report
  pdfdiff --json old.pdf new.pdf > diff.json

  # Digital-only documents: fail fast instead of OCRing scans
  pdfdiff --no-ocr old.pdf new.pdf

EXIT STATUS:
  0  comparison ran (differences may or may not exist; check the report)
  1  comparison failed (bad input, corrupt PDF, OCR unavailable, ...)

ENVIRONMENT VARIABLES:
  PDFIUM_DYNAMIC_LIB_PATH  Path to an existing libpdfium copy
  RUST_LOG                 Tracing filter (overrides -v/-q)

SETUP:
  pdfium:    https://github.com/bblanchon/pdfium-binaries (shared library)
  tesseract: only needed for scanned pages, e.g. `apt install tesseract-ocr`
"#;

/// Compare two PDF documents: rendered pages plus a highlighted text diff.
#[derive(Parser, Debug)]
#[command(
    name = "pdfdiff",
    version,
    about = "Compare two PDF documents: rendered pages plus a highlighted text diff",
    long_about = "Compare two PDF documents (local files or URLs). Every page of both \
documents is rendered to a PNG, text is extracted per page with a Tesseract OCR fallback \
for image-only pages, and a semantic character diff of the two texts is written as an \
HTML report with additions and removals highlighted.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// First (old) PDF: local path or HTTP/HTTPS URL.
    input_a: String,

    /// Second (new) PDF: local path or HTTP/HTTPS URL.
    input_b: String,

    /// Output directory for page images and report.html.
    #[arg(short, long, env = "PDFDIFF_OUTPUT", default_value = "pdfdiff-out")]
    output: PathBuf,

    /// Scale factor for the visible page renders.
    #[arg(long, env = "PDFDIFF_SCALE", default_value_t = pdfdiff::DEFAULT_RENDER_SCALE)]
    scale: f32,

    /// Scale factor for the off-screen renders handed to OCR.
    #[arg(long, env = "PDFDIFF_OCR_SCALE", default_value_t = pdfdiff::DEFAULT_OCR_SCALE)]
    ocr_scale: f32,

    /// Tesseract language code for OCR.
    #[arg(long, env = "PDFDIFF_LANG", default_value = "eng")]
    lang: String,

    /// Disable the OCR fallback; image-only pages contribute no text.
    #[arg(long, env = "PDFDIFF_NO_OCR")]
    no_ocr: bool,

    /// Process the two documents in parallel.
    #[arg(long, env = "PDFDIFF_CONCURRENT")]
    concurrent: bool,

    /// PDF user password for encrypted documents (applied to both).
    #[arg(long, env = "PDFDIFF_PASSWORD")]
    password: Option<String>,

    /// Print the full comparison result as JSON instead of writing report.html.
    #[arg(long, env = "PDFDIFF_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDFDIFF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFDIFF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFDIFF_QUIET")]
    quiet: bool,

    /// HTTP download timeout in seconds for URL inputs.
    #[arg(long, env = "PDFDIFF_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // Early hint: OCR only matters for pages without a text layer, but a
    // missing binary mid-run aborts the whole comparison.
    if !cli.no_ocr && !pdfdiff::pipeline::ocr::is_available() {
        tracing::warn!(
            "tesseract binary not found; pages without an embedded text layer \
             will fail (install tesseract or pass --no-ocr)"
        );
    }

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = CompareConfig::builder()
        .render_scale(cli.scale)
        .ocr_scale(cli.ocr_scale)
        .ocr_language(cli.lang.clone())
        .ocr_enabled(!cli.no_ocr)
        .concurrent(cli.concurrent)
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if show_progress {
        builder = builder.progress_callback(CliProgressCallback::new_dynamic());
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run comparison ───────────────────────────────────────────────────
    if cli.json {
        let output = compare(&cli.input_a, &cli.input_b, &cli.output, &config)
            .await
            .context("Comparison failed")?;
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(json.as_bytes())
            .and_then(|_| handle.write_all(b"\n"))
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let (output, report_path) = compare_to_dir(&cli.input_a, &cli.input_b, &cli.output, &config)
        .await
        .context("Comparison failed")?;

    if !cli.quiet {
        let changed = output.has_changes();
        let verdict = match &output.outcome {
            pdfdiff::CompareOutcome::NoReadableText => red("no readable text in either PDF"),
            _ if changed => cyan("documents differ"),
            _ => green("documents match"),
        };
        eprintln!(
            "{}  {}  {}ms  →  {}",
            green("✔"),
            verdict,
            output.stats.total_duration_ms,
            bold(&report_path.display().to_string()),
        );
        eprintln!(
            "   {} + {} pages rendered  /  {} pages via OCR",
            dim(&output.stats.pages_a.to_string()),
            dim(&output.stats.pages_b.to_string()),
            dim(&(output.stats.ocr_pages_a + output.stats.ocr_pages_b).to_string()),
        );
    }

    Ok(())
}
