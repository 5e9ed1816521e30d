//! Source-format detection.
//!
//! A conversion needs to know what it is converting. Detection runs in
//! decreasing order of confidence: magic bytes first (a `%PDF-` header is
//! unambiguous), then the HTTP content-type when the input came from a URL,
//! then the file extension, and finally content sniffing. Callers can skip
//! all of it by setting [`crate::config::ConversionConfig::format`].
//!
//! Sitemaps are detected as a distinct format even though they are XML on
//! the wire: a `<urlset>` document deserves URL extraction, not a generic
//! markup transpile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The document formats doc2md can convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// JSON text; rendered by the built-in table/list renderer.
    Json,
    /// HTML markup; transpiled to Markdown.
    Html,
    /// Generic XML; fed through the same transpiler as HTML.
    Xml,
    /// XML sitemap (`<urlset>` or `<sitemapindex>`); URL extraction.
    Sitemap,
    /// PDF document; text extraction.
    Pdf,
}

impl SourceFormat {
    /// Canonical lowercase name, matching the CLI `--format` values.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
            SourceFormat::Html => "html",
            SourceFormat::Xml => "xml",
            SourceFormat::Sitemap => "sitemap",
            SourceFormat::Pdf => "pdf",
        }
    }

    /// Whether this format's output goes through the Markdown cleanup
    /// passes. JSON and sitemap output have a contractual byte shape and
    /// must be left untouched.
    pub(crate) fn needs_postprocess(&self) -> bool {
        matches!(
            self,
            SourceFormat::Html | SourceFormat::Xml | SourceFormat::Pdf
        )
    }

    /// Map a file extension (without the dot, any case) to a format.
    ///
    /// `.xml` maps to [`SourceFormat::Xml`]; content sniffing may later
    /// refine it to [`SourceFormat::Sitemap`].
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "html" | "htm" | "xhtml" => Some(SourceFormat::Html),
            "xml" => Some(SourceFormat::Xml),
            "pdf" => Some(SourceFormat::Pdf),
            _ => None,
        }
    }

    /// Map an HTTP `Content-Type` value (possibly with parameters) to a
    /// format. Substring match, case-insensitive.
    pub fn from_content_type(ct: &str) -> Option<Self> {
        let ct = ct.to_ascii_lowercase();
        if ct.contains("application/pdf") {
            Some(SourceFormat::Pdf)
        } else if ct.contains("application/json") {
            Some(SourceFormat::Json)
        } else if ct.contains("text/html") || ct.contains("application/xhtml") {
            Some(SourceFormat::Html)
        } else if ct.contains("xml") {
            Some(SourceFormat::Xml)
        } else {
            None
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(SourceFormat::Json),
            "html" | "htm" => Ok(SourceFormat::Html),
            "xml" => Ok(SourceFormat::Xml),
            "sitemap" => Ok(SourceFormat::Sitemap),
            "pdf" => Ok(SourceFormat::Pdf),
            other => Err(format!(
                "unknown format '{other}' (expected json, html, xml, sitemap, or pdf)"
            )),
        }
    }
}

/// True if the content-type or leading bytes identify a PDF.
///
/// Content-Type `application/pdf` (case-insensitive substring) or the
/// `%PDF-` magic prefix.
pub fn is_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains("application/pdf") || head.starts_with(b"%PDF-")
}

/// Detect the source format of a document.
///
/// `extension` and `content_type` are optional hints gathered during input
/// resolution. Returns `None` when nothing matches; callers map that to
/// [`crate::error::Doc2MdError::UnknownFormat`].
pub fn detect(bytes: &[u8], extension: Option<&str>, content_type: Option<&str>) -> Option<SourceFormat> {
    // Magic bytes beat every hint.
    if is_pdf(content_type, bytes) {
        return Some(SourceFormat::Pdf);
    }

    // Sniff on a bounded prefix; marker scans never need the full document.
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(4096)]).to_ascii_lowercase();

    if let Some(fmt) = content_type.and_then(SourceFormat::from_content_type) {
        return Some(refine_xml(fmt, &head));
    }
    if let Some(fmt) = extension.and_then(SourceFormat::from_extension) {
        return Some(refine_xml(fmt, &head));
    }

    sniff_content(bytes, &head)
}

/// A generic-XML hint may actually be a sitemap or HTML served with the
/// wrong label; refine from content markers.
fn refine_xml(fmt: SourceFormat, head_lower: &str) -> SourceFormat {
    if fmt != SourceFormat::Xml {
        return fmt;
    }
    xml_kind(head_lower)
}

fn xml_kind(head_lower: &str) -> SourceFormat {
    if head_lower.contains("<urlset") || head_lower.contains("<sitemapindex") {
        SourceFormat::Sitemap
    } else if head_lower.contains("<html") || head_lower.contains("<!doctype html") {
        SourceFormat::Html
    } else {
        SourceFormat::Xml
    }
}

/// Pure content sniffing, used when no hint resolved.
fn sniff_content(bytes: &[u8], head_lower: &str) -> Option<SourceFormat> {
    let trimmed = head_lower.trim_start();
    if trimmed.starts_with('<') {
        return Some(xml_kind(head_lower));
    }
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(SourceFormat::Json);
    }
    // Bare JSON scalars ("42", "\"hello\"", "null") have no marker; a full
    // parse is the only reliable probe left.
    let text = String::from_utf8_lossy(bytes);
    if serde_json::from_str::<serde_json::Value>(&text).is_ok() {
        return Some(SourceFormat::Json);
    }
    None
}
