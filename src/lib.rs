//! # doc2md
//!
//! Convert JSON, HTML, XML, sitemap, and PDF documents to Markdown.
//!
//! ## Why this crate?
//!
//! Document conversion services keep reimplementing the same glue: accept a
//! file or URL, figure out what it is, hand it to the right extractor, tidy
//! the result. This crate packages that glue once — format detection with
//! sensible precedence (magic bytes, content-type, extension, sniffing), a
//! per-format conversion stage, and deterministic Markdown cleanup — behind
//! one `convert` call, with a CLI on top.
//!
//! The JSON renderer is the one conversion implemented natively rather than
//! delegated: arrays of uniform objects become GFM tables (with pipe
//! escaping and adaptive columns), everything else becomes a nested bullet
//! list, and degenerate shapes fall back to a fenced code block. See
//! [`render_json`].
//!
//! ## Pipeline Overview
//!
//! ```text
//! Document
//!  │
//!  ├─ 1. Input    resolve local file or download from URL
//!  ├─ 2. Detect   magic bytes → content-type → extension → sniffing
//!  ├─ 3. Convert  json (native) / html, xml (transpiler) /
//!  │              sitemap (extraction) / pdf (text extraction)
//!  ├─ 4. Polish   cleanup passes (transpiler/extractor output only)
//!  └─ 5. Output   Markdown + stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use doc2md::{convert_str, ConversionConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConversionConfig::default();
//! let output = convert_str(r#"[{"name": "Ada", "age": 36}]"#, &config).await?;
//! assert_eq!(
//!     output.markdown,
//!     "| name | age |\n| --- | --- |\n| Ada | 36 |\n"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `doc2md` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! doc2md = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, DEFAULT_MAX_INPUT_BYTES};
pub use convert::{
    convert, convert_bytes, convert_str, convert_sync, convert_to_file, inspect, validate_sitemap,
};
pub use error::Doc2MdError;
pub use format::SourceFormat;
pub use output::{ConversionOutput, ConversionStats, SourceInfo};
pub use pipeline::json::render as render_json;
pub use pipeline::sitemap::{Sitemap, SitemapEntry, SitemapKind, ValidationReport};
