//! Conversion entry points.
//!
//! [`convert`] is the primary API: give it a path or URL and a config, get
//! back a Markdown document with stats. The byte- and string-level variants
//! ([`convert_bytes`], [`convert_str`]) skip input resolution for callers
//! that already hold the data — a request handler with an upload buffer, a
//! test with a literal. All variants funnel into one internal pipeline so
//! detection, dispatch, cleanup, and stats behave identically everywhere.

use crate::config::ConversionConfig;
use crate::error::Doc2MdError;
use crate::format::{self, SourceFormat};
use crate::output::{ConversionOutput, ConversionStats, SourceInfo};
use crate::pipeline::{html, input, json, pdf, postprocess, sitemap};
use crate::pipeline::input::RawInput;
use crate::pipeline::sitemap::ValidationReport;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert a document (local file path or HTTP/HTTPS URL) to Markdown.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_str` — Local file path or HTTP/HTTPS URL
/// * `config` — Conversion configuration
///
/// # Errors
/// Returns `Err(Doc2MdError)` for unreadable input, oversized input, an
/// undetectable format, or a converter failure. See [`Doc2MdError`].
pub async fn convert(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Doc2MdError> {
    let input_str = input_str.as_ref();
    info!("Starting conversion: {}", input_str);

    let raw = input::resolve_input(input_str, config).await?;
    convert_raw(raw, config).await
}

/// Convert an in-memory document to Markdown.
///
/// `source` in the output stats is reported as `<bytes>`; format detection
/// has only magic bytes and content sniffing to work with, so set
/// [`ConversionConfig::format`] when the format is already known.
pub async fn convert_bytes(
    bytes: Vec<u8>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Doc2MdError> {
    if bytes.len() > config.max_input_bytes {
        return Err(Doc2MdError::InputTooLarge {
            actual: bytes.len(),
            limit: config.max_input_bytes,
        });
    }
    let raw = RawInput {
        bytes,
        source: "<bytes>".to_string(),
        content_type: None,
        extension: None,
    };
    convert_raw(raw, config).await
}

/// Convert a document held as a string to Markdown.
pub async fn convert_str(
    text: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Doc2MdError> {
    convert_bytes(text.as_ref().as_bytes().to_vec(), config).await
}

/// Convert a document and write the Markdown directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn convert_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Doc2MdError> {
    let output = convert(input_str, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Doc2MdError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("md.tmp");
    tokio::fs::write(&tmp_path, &output.markdown)
        .await
        .map_err(|e| Doc2MdError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Doc2MdError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(output.stats)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Doc2MdError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Doc2MdError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(input_str, config))
}

/// Resolve an input and report its detected format without converting.
pub async fn inspect(input_str: impl AsRef<str>) -> Result<SourceInfo, Doc2MdError> {
    let config = ConversionConfig::default();
    let raw = input::resolve_input(input_str.as_ref(), &config).await?;
    let format = detect_format(&raw, &config)?;
    Ok(SourceInfo {
        source: raw.source,
        format,
        input_bytes: raw.bytes.len(),
    })
}

/// Resolve an input, parse it as a sitemap, and return the validation
/// report.
pub async fn validate_sitemap(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ValidationReport, Doc2MdError> {
    let raw = input::resolve_input(input_str.as_ref(), config).await?;
    let text = String::from_utf8_lossy(&raw.bytes);
    sitemap::validate(&text)
}

// ── Internal pipeline ────────────────────────────────────────────────────

fn detect_format(raw: &RawInput, config: &ConversionConfig) -> Result<SourceFormat, Doc2MdError> {
    if let Some(fmt) = config.format {
        return Ok(fmt);
    }
    format::detect(
        &raw.bytes,
        raw.extension.as_deref(),
        raw.content_type.as_deref(),
    )
    .ok_or_else(|| Doc2MdError::UnknownFormat {
        input: raw.source.clone(),
    })
}

async fn convert_raw(
    raw: RawInput,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Doc2MdError> {
    let total_start = Instant::now();
    let input_bytes = raw.bytes.len();

    // ── Step 1: Detect format ────────────────────────────────────────────
    let fmt = detect_format(&raw, config)?;
    debug!("detected format {} for {}", fmt, raw.source);

    // ── Step 2: Dispatch to the per-format stage ─────────────────────────
    let markdown = match fmt {
        SourceFormat::Pdf => pdf::to_markdown(raw.bytes).await?,
        SourceFormat::Json => {
            // Lossy decoding: a mangled byte sequence becomes U+FFFD and
            // simply fails JSON parsing with a position, which beats a bare
            // utf8 error for the caller.
            let text = String::from_utf8_lossy(&raw.bytes);
            let value: serde_json::Value =
                serde_json::from_str(&text).map_err(|e| Doc2MdError::InvalidJson {
                    detail: e.to_string(),
                })?;
            json::render(&value)
        }
        SourceFormat::Html => html::to_markdown(&String::from_utf8_lossy(&raw.bytes)),
        SourceFormat::Xml => html::xml_to_markdown(&String::from_utf8_lossy(&raw.bytes)),
        SourceFormat::Sitemap => {
            let text = String::from_utf8_lossy(&raw.bytes);
            let parsed = sitemap::parse(&text)?;
            for issue in sitemap::check(&parsed) {
                warn!("sitemap: {}", issue);
            }
            sitemap::to_markdown(&parsed)
        }
    };

    // ── Step 3: Clean up transpiler/extractor output ─────────────────────
    let markdown = if config.postprocess && fmt.needs_postprocess() {
        postprocess::clean_markdown(&markdown)
    } else {
        markdown
    };

    // ── Step 4: Optional front matter ────────────────────────────────────
    let markdown = if config.include_metadata {
        let mut doc = format_yaml_front_matter(&raw.source, fmt, input_bytes);
        doc.push_str(&markdown);
        doc
    } else {
        markdown
    };

    // ── Step 5: Stats ────────────────────────────────────────────────────
    let stats = ConversionStats {
        input_bytes,
        output_bytes: markdown.len(),
        output_lines: markdown.lines().count(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} -> {} bytes of Markdown in {}ms",
        fmt, stats.output_bytes, stats.total_duration_ms
    );

    Ok(ConversionOutput {
        markdown,
        format: fmt,
        stats,
    })
}

/// Format conversion provenance as YAML front matter.
fn format_yaml_front_matter(source: &str, fmt: SourceFormat, input_bytes: usize) -> String {
    let mut yaml = String::from("---\n");
    yaml.push_str(&format!("source: \"{}\"\n", source.replace('"', "\\\"")));
    yaml.push_str(&format!("format: {}\n", fmt));
    yaml.push_str(&format!("bytes: {}\n", input_bytes));
    yaml.push_str("---\n\n");
    yaml
}
