//! Error types for the doc2md library.
//!
//! A single fatal error type covers the whole pipeline: unlike a paged
//! document format there is no per-unit partial success here — a conversion
//! either yields a Markdown string or fails outright.
//!
//! The JSON renderer itself contributes no variants. It is total over
//! already-parsed JSON values; the only JSON failure mode is parsing the raw
//! text, which surfaces as [`Doc2MdError::InvalidJson`] from the `convert*`
//! entry points before the renderer is ever invoked.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the doc2md library.
#[derive(Debug, Error)]
pub enum Doc2MdError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is empty or not usable as a path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The input exceeds the configured size ceiling.
    #[error("Input is {actual} bytes, over the {limit}-byte limit\nRaise --max-bytes to convert it anyway.")]
    InputTooLarge { actual: usize, limit: usize },

    /// No source format could be detected and none was configured.
    #[error("Could not detect the format of '{input}'\nPass an explicit format with --format <json|html|xml|sitemap|pdf>.")]
    UnknownFormat { input: String },

    // ── Conversion errors ─────────────────────────────────────────────────
    /// The input claimed to be JSON but did not parse.
    #[error("Invalid JSON format: {detail}")]
    InvalidJson { detail: String },

    /// PDF text extraction failed.
    #[error("Failed to extract text from PDF: {detail}")]
    PdfExtractFailed { detail: String },

    /// The input is not a well-formed sitemap document.
    #[error("Invalid sitemap: {detail}")]
    InvalidSitemap { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
