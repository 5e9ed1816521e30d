//! Pipeline stages for document-to-Markdown conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the HTML transpiler) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ detect ──▶ json | html | xml | sitemap | pdf ──▶ postprocess
//! (URL/path) (format)  (per-format conversion stage)         (cleanup)
//! ```
//!
//! 1. [`input`]       — canonicalise the user-supplied path or URL to raw
//!    bytes and collect format hints; the only stage with network I/O
//! 2. [`json`]        — the built-in JSON renderer: table, nested list, or
//!    fenced fallback, chosen by value shape
//! 3. [`html`]        — HTML (and generic XML) through the transpiler
//! 4. [`sitemap`]     — `<urlset>`/`<sitemapindex>` extraction + validation
//! 5. [`pdf`]         — text extraction; runs in `spawn_blocking` because
//!    the extractor is CPU-bound and synchronous
//! 6. [`postprocess`] — deterministic text-cleanup rules for transpiler and
//!    extractor quirks (never applied to JSON/sitemap output)

pub mod html;
pub mod input;
pub mod json;
pub mod pdf;
pub mod postprocess;
pub mod sitemap;
