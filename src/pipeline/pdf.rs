//! PDF text extraction.
//!
//! ## Why plain text?
//!
//! The conversion contract for PDF is text recovery, not layout
//! reconstruction: the extracted text stream is returned as the Markdown
//! body unchanged. Extraction is CPU-bound and synchronous, so it runs on
//! the blocking thread pool to keep the async runtime responsive.

use crate::error::Doc2MdError;
use tracing::debug;

/// Extract the text of a PDF held fully in memory and return it as the
/// Markdown body.
pub async fn to_markdown(bytes: Vec<u8>) -> Result<String, Doc2MdError> {
    let len = bytes.len();
    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| Doc2MdError::PdfExtractFailed {
            detail: e.to_string(),
        })
    })
    .await
    // A panic inside the extractor surfaces as a JoinError; report it as an
    // extraction failure rather than crashing the caller.
    .map_err(|e| Doc2MdError::PdfExtractFailed {
        detail: format!("extraction task failed: {e}"),
    })??;

    debug!("extracted {} bytes of text from {} bytes of PDF", text.len(), len);
    Ok(text)
}
