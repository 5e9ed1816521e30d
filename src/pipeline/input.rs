//! Input resolution: normalise a user-supplied path or URL to raw bytes.
//!
//! ## Why bytes, not a temp file?
//!
//! Every extractor in this crate works from memory, so a URL download stays
//! a byte buffer instead of touching the filesystem. Alongside the bytes we
//! keep the detection hints the source offered for free: the file extension
//! and, for URLs, the `Content-Type` header.
//!
//! The configured size ceiling is enforced here, at the boundary, before
//! any parser sees the data. The renderers themselves perform no bounds
//! checking by design.

use crate::config::ConversionConfig;
use crate::error::Doc2MdError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Raw input bytes plus the format-detection hints gathered on the way.
#[derive(Debug)]
pub struct RawInput {
    /// The document bytes.
    pub bytes: Vec<u8>,
    /// Where the bytes came from, for error messages and front matter.
    pub source: String,
    /// `Content-Type` header, when the input came from a URL.
    pub content_type: Option<String>,
    /// Lowercased file extension, from the path or the URL's last segment.
    pub extension: Option<String>,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to raw document bytes.
///
/// If the input is a URL, download it. If it is a local file, validate it
/// exists and is readable. Either way the size ceiling applies.
pub async fn resolve_input(input: &str, config: &ConversionConfig) -> Result<RawInput, Doc2MdError> {
    if input.trim().is_empty() {
        return Err(Doc2MdError::InvalidInput {
            input: input.to_string(),
        });
    }
    if is_url(input) {
        download_url(input, config).await
    } else {
        resolve_local(input, config.max_input_bytes)
    }
}

/// Read a local file, mapping errno to the matching error variant.
fn resolve_local(path_str: &str, max_bytes: usize) -> Result<RawInput, Doc2MdError> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(Doc2MdError::FileNotFound { path });
    }

    // Check the size before reading so an oversized file never lands in
    // memory in the first place.
    if let Ok(meta) = std::fs::metadata(&path) {
        let len = meta.len() as usize;
        if len > max_bytes {
            return Err(Doc2MdError::InputTooLarge {
                actual: len,
                limit: max_bytes,
            });
        }
    }

    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Doc2MdError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Doc2MdError::FileNotFound { path });
        }
    };

    let extension = extension_of(&path);
    debug!("resolved local file: {} ({} bytes)", path.display(), bytes.len());

    Ok(RawInput {
        bytes,
        source: path_str.to_string(),
        content_type: None,
        extension,
    })
}

/// Download a URL into memory, keeping the `Content-Type` as a hint.
async fn download_url(url: &str, config: &ConversionConfig) -> Result<RawInput, Doc2MdError> {
    info!("Downloading document from: {}", url);
    let timeout_secs = config.download_timeout_secs;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Doc2MdError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            Doc2MdError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            Doc2MdError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(Doc2MdError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Doc2MdError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if bytes.len() > config.max_input_bytes {
        return Err(Doc2MdError::InputTooLarge {
            actual: bytes.len(),
            limit: config.max_input_bytes,
        });
    }

    let extension = extension_from_url(url);
    info!("Downloaded {} bytes", bytes.len());

    Ok(RawInput {
        bytes: bytes.to_vec(),
        source: url.to_string(),
        content_type,
        extension,
    })
}

/// Lowercased extension of a filesystem path.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Lowercased extension of the URL's last path segment, ignoring query
/// strings and fragments.
fn extension_from_url(url: &str) -> Option<String> {
    let path_part = url.split(['?', '#']).next().unwrap_or(url);
    let last = path_part.rsplit('/').next()?;
    let (_, ext) = last.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 8 {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
