//! Configuration types for document-to-Markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across tasks, serialise them for logging, and
//! diff two runs to understand why their outputs differ.

use crate::error::Doc2MdError;
use crate::format::SourceFormat;
use serde::{Deserialize, Serialize};

/// Default input size ceiling: 2 MiB, a comfortable bound for the upload
/// and API-payload sizes these converters see in practice.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 2 * 1024 * 1024;

/// Configuration for a document-to-Markdown conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use doc2md::{ConversionConfig, SourceFormat};
///
/// let config = ConversionConfig::builder()
///     .format(SourceFormat::Json)
///     .max_input_bytes(512 * 1024)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Explicit source format. `None` (the default) enables auto-detection
    /// from magic bytes, content-type, extension, and content sniffing.
    pub format: Option<SourceFormat>,

    /// Maximum input size in bytes. Default: 2 MiB.
    ///
    /// Enforced at the input boundary, before any parsing. The renderers
    /// themselves perform no bounds checking; resource limits are caller
    /// policy and this field is where the library caller states it.
    pub max_input_bytes: usize,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Run the Markdown cleanup passes on transpiler/extractor output.
    /// Default: true.
    ///
    /// Only applies to HTML, XML, and PDF conversions. JSON and sitemap
    /// output is byte-exact by contract and is never postprocessed.
    pub postprocess: bool,

    /// Prepend YAML front matter (source, format, input size) to the
    /// Markdown output. Default: false.
    pub include_metadata: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            format: None,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            download_timeout_secs: 120,
            postprocess: true,
            include_metadata: false,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn format(mut self, format: SourceFormat) -> Self {
        self.config.format = Some(format);
        self
    }

    pub fn max_input_bytes(mut self, bytes: usize) -> Self {
        self.config.max_input_bytes = bytes;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn postprocess(mut self, v: bool) -> Self {
        self.config.postprocess = v;
        self
    }

    pub fn include_metadata(mut self, v: bool) -> Self {
        self.config.include_metadata = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Doc2MdError> {
        let c = &self.config;
        if c.max_input_bytes == 0 {
            return Err(Doc2MdError::InvalidConfig(
                "max_input_bytes must be ≥ 1".into(),
            ));
        }
        if c.download_timeout_secs == 0 {
            return Err(Doc2MdError::InvalidConfig(
                "download_timeout_secs must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
