//! HTML (and generic XML) to Markdown via the `html2md` transpiler.
//!
//! Generic XML goes through the same transpiler as HTML: unknown elements
//! flatten to their text content, which is the most useful rendition a
//! markup-agnostic converter can give. Dedicated handling exists only for
//! sitemaps, which are detected upstream and routed to
//! [`crate::pipeline::sitemap`] instead.

use tracing::debug;

/// Transpile HTML markup to Markdown.
///
/// Empty or text-only input produces empty/plain output rather than an
/// error; an empty document is a valid document.
pub fn to_markdown(html: &str) -> String {
    let markdown = html2md::parse_html(html);
    debug!("transpiled {} bytes of HTML to {} bytes of Markdown", html.len(), markdown.len());
    markdown
}

/// Transpile generic XML to Markdown.
///
/// The XML prolog and processing instructions mean nothing to an HTML
/// transpiler, so they are stripped first; element text content survives.
pub fn xml_to_markdown(xml: &str) -> String {
    to_markdown(strip_processing_instructions(xml))
}

/// Skip past leading `<?...?>` processing instructions (the `<?xml ...?>`
/// declaration included).
fn strip_processing_instructions(xml: &str) -> &str {
    let mut rest = xml.trim_start();
    while rest.starts_with("<?") {
        match rest.find("?>") {
            Some(end) => rest = rest[end + 2..].trim_start(),
            None => break,
        }
    }
    rest
}
