//! Output types returned by the `convert*` entry points.

use crate::format::SourceFormat;
use serde::{Deserialize, Serialize};

/// The result of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The assembled Markdown document.
    pub markdown: String,
    /// The source format that was converted (detected or configured).
    pub format: SourceFormat,
    /// Timing and size statistics for the run.
    pub stats: ConversionStats,
}

/// Statistics for a conversion run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Size of the raw input in bytes.
    pub input_bytes: usize,
    /// Size of the Markdown output in bytes.
    pub output_bytes: usize,
    /// Line count of the Markdown output.
    pub output_lines: usize,
    /// Wall-clock duration of the whole conversion in milliseconds.
    pub total_duration_ms: u64,
}

/// What [`crate::convert::inspect`] learned about an input without
/// converting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// The input as given (path or URL).
    pub source: String,
    /// Detected source format.
    pub format: SourceFormat,
    /// Size of the raw input in bytes.
    pub input_bytes: usize,
}
