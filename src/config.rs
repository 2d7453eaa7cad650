//! Configuration for a document comparison.
//!
//! All behaviour is controlled through [`CompareConfig`], built via its
//! [`CompareConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across threads and to log exactly what a run
//! was asked to do.

use crate::error::PdfDiffError;
use crate::progress::CompareProgressCallback;
use std::fmt;
use std::sync::Arc;

/// Scale factor for the visible page renders, matching the comparison view.
pub const DEFAULT_RENDER_SCALE: f32 = 1.2;

/// Scale factor for the off-screen renders fed to OCR. Higher than the
/// visual scale because recognition accuracy improves with pixel density.
pub const DEFAULT_OCR_SCALE: f32 = 2.0;

/// Configuration for [`crate::compare::compare`].
///
/// # Example
/// ```rust
/// use pdfdiff::CompareConfig;
///
/// let config = CompareConfig::builder()
///     .render_scale(1.5)
///     .ocr_language("deu")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct CompareConfig {
    /// Scale factor applied when rasterising pages for the visual
    /// containers. Default: 1.2.
    pub render_scale: f32,

    /// Scale factor for the off-screen render handed to the OCR engine
    /// when a page has no embedded text layer. Default: 2.0.
    pub ocr_scale: f32,

    /// Tesseract language code requested for recognition. Default: "eng".
    pub ocr_language: String,

    /// Whether to fall back to OCR on pages with no text layer.
    /// When disabled such pages contribute empty text. Default: true.
    pub ocr_enabled: bool,

    /// Run the two documents' render+extract stages in parallel.
    ///
    /// The documents are independent, so parallelism changes latency but
    /// not output: each side owns its image directory and the diff waits
    /// for both texts. Default: false (strictly sequential, A then B).
    pub concurrent: bool,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// PDF user password, applied to either document when encrypted.
    pub password: Option<String>,

    /// Optional observer for per-page progress events. Progress is
    /// fire-and-forget: it never affects control flow.
    pub progress_callback: Option<Arc<dyn CompareProgressCallback>>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            render_scale: DEFAULT_RENDER_SCALE,
            ocr_scale: DEFAULT_OCR_SCALE,
            ocr_language: "eng".to_string(),
            ocr_enabled: true,
            concurrent: false,
            download_timeout_secs: 120,
            password: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for CompareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompareConfig")
            .field("render_scale", &self.render_scale)
            .field("ocr_scale", &self.ocr_scale)
            .field("ocr_language", &self.ocr_language)
            .field("ocr_enabled", &self.ocr_enabled)
            .field("concurrent", &self.concurrent)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl CompareConfig {
    /// Create a new builder for `CompareConfig`.
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`CompareConfig`].
#[derive(Debug)]
pub struct CompareConfigBuilder {
    config: CompareConfig,
}

impl CompareConfigBuilder {
    pub fn render_scale(mut self, scale: f32) -> Self {
        self.config.render_scale = scale;
        self
    }

    pub fn ocr_scale(mut self, scale: f32) -> Self {
        self.config.ocr_scale = scale;
        self
    }

    pub fn ocr_language(mut self, lang: impl Into<String>) -> Self {
        self.config.ocr_language = lang.into();
        self
    }

    pub fn ocr_enabled(mut self, v: bool) -> Self {
        self.config.ocr_enabled = v;
        self
    }

    pub fn concurrent(mut self, v: bool) -> Self {
        self.config.concurrent = v;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn CompareProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<CompareConfig, PdfDiffError> {
        let c = &self.config;
        if !c.render_scale.is_finite() || c.render_scale <= 0.0 {
            return Err(PdfDiffError::InvalidConfig(format!(
                "render scale must be a positive number, got {}",
                c.render_scale
            )));
        }
        if !c.ocr_scale.is_finite() || c.ocr_scale <= 0.0 {
            return Err(PdfDiffError::InvalidConfig(format!(
                "OCR scale must be a positive number, got {}",
                c.ocr_scale
            )));
        }
        if c.ocr_language.is_empty() {
            return Err(PdfDiffError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = CompareConfig::default();
        assert_eq!(c.render_scale, 1.2);
        assert_eq!(c.ocr_scale, 2.0);
        assert_eq!(c.ocr_language, "eng");
        assert!(c.ocr_enabled);
        assert!(!c.concurrent);
    }

    #[test]
    fn builder_rejects_nonpositive_scales() {
        assert!(CompareConfig::builder().render_scale(0.0).build().is_err());
        assert!(CompareConfig::builder().ocr_scale(-1.0).build().is_err());
        assert!(CompareConfig::builder()
            .render_scale(f32::NAN)
            .build()
            .is_err());
    }

    #[test]
    fn builder_rejects_empty_language() {
        assert!(CompareConfig::builder().ocr_language("").build().is_err());
    }

    #[test]
    fn debug_redacts_password() {
        let c = CompareConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"), "got: {dbg}");
    }
}
