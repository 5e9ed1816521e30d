//! End-to-end integration tests for doc2md.
//!
//! Fixtures are written to a tempdir per test; nothing here needs network
//! access or external binaries.

use doc2md::{
    convert, convert_bytes, convert_str, convert_sync, convert_to_file, inspect, render_json,
    validate_sitemap, ConversionConfig, Doc2MdError, SourceFormat,
};
use serde_json::json;
use std::path::PathBuf;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

/// Assert the markdown passes basic shape checks.
fn assert_markdown_quality(md: &str, context: &str) {
    assert!(!md.trim().is_empty(), "[{context}] Markdown is empty");
    assert!(
        !md.contains('\r'),
        "[{context}] Output contains carriage returns"
    );
    assert!(
        !md.contains("\n\n\n\n"),
        "[{context}] Output has more than 3 consecutive blank lines"
    );
}

// ── JSON conversion ──────────────────────────────────────────────────────────

#[tokio::test]
async fn json_file_converts_to_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "people.json",
        br#"[{"name":"Al|ce","age":30},{"name":"Bob"}]"#,
    );

    let out = convert(path.to_str().unwrap(), &ConversionConfig::default())
        .await
        .unwrap();

    assert_eq!(out.format, SourceFormat::Json);
    // The documented end-to-end scenario, byte for byte.
    assert_eq!(
        out.markdown,
        "| name | age |\n| --- | --- |\n| Al\\|ce | 30 |\n| Bob |  |\n"
    );
    assert_eq!(out.stats.output_lines, 4);
    assert_eq!(out.stats.input_bytes, 42);
}

#[tokio::test]
async fn json_object_converts_to_nested_list() {
    let out = convert_str(r#"{"site": {"name": "Acme", "pages": 3}}"#, &ConversionConfig::default())
        .await
        .unwrap();
    assert_eq!(
        out.markdown,
        "- **site**: \n  - **name**: Acme\n  - **pages**: 3\n"
    );
}

#[tokio::test]
async fn json_renderer_output_is_never_postprocessed() {
    // A bare scalar renders as "42\n" with no cleanup pass touching it,
    // postprocess flag or not.
    for postprocess in [true, false] {
        let config = ConversionConfig::builder()
            .postprocess(postprocess)
            .build()
            .unwrap();
        let out = convert_str("42", &config).await.unwrap();
        assert_eq!(out.markdown, "42\n");
    }
}

#[tokio::test]
async fn malformed_json_file_reports_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "broken.json", b"{\"a\": ");

    let err = convert(path.to_str().unwrap(), &ConversionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Doc2MdError::InvalidJson { .. }), "got: {err}");
}

// ── HTML / XML conversion ────────────────────────────────────────────────────

#[tokio::test]
async fn html_file_converts_to_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "page.html",
        b"<html><body><h1>Pricing</h1><p>Simple <strong>flat</strong> pricing.</p></body></html>",
    );

    let out = convert(path.to_str().unwrap(), &ConversionConfig::default())
        .await
        .unwrap();

    assert_eq!(out.format, SourceFormat::Html);
    assert_markdown_quality(&out.markdown, "html");
    assert!(out.markdown.contains("# Pricing"), "got: {}", out.markdown);
    assert!(out.markdown.contains("**flat**"), "got: {}", out.markdown);
    assert!(out.markdown.ends_with('\n'), "postprocess adds final newline");
}

#[tokio::test]
async fn xml_file_converts_via_transpiler() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "note.xml",
        b"<?xml version=\"1.0\"?><note><heading>Reminder</heading><body>Call back tomorrow</body></note>",
    );

    let out = convert(path.to_str().unwrap(), &ConversionConfig::default())
        .await
        .unwrap();

    assert_eq!(out.format, SourceFormat::Xml);
    assert!(out.markdown.contains("Reminder"), "got: {}", out.markdown);
    assert!(
        out.markdown.contains("Call back tomorrow"),
        "got: {}",
        out.markdown
    );
}

// ── Sitemap conversion ───────────────────────────────────────────────────────

const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc><lastmod>2024-06-01</lastmod></url>
  <url><loc>https://example.com/contact</loc></url>
</urlset>"#;

#[tokio::test]
async fn sitemap_converts_to_url_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "sitemap.xml", SITEMAP.as_bytes());

    let out = convert(path.to_str().unwrap(), &ConversionConfig::default())
        .await
        .unwrap();

    assert_eq!(out.format, SourceFormat::Sitemap);
    assert_eq!(
        out.markdown,
        "| loc | lastmod |\n| --- | --- |\n| https://example.com/ | 2024-06-01 |\n| https://example.com/contact |  |\n"
    );
}

#[tokio::test]
async fn sitemap_validation_reports_issues() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "bad-sitemap.xml",
        b"<urlset><url><loc>/relative</loc></url></urlset>",
    );

    let report = validate_sitemap(path.to_str().unwrap(), &ConversionConfig::default())
        .await
        .unwrap();
    assert!(!report.is_valid());
    assert_eq!(report.entry_count, 1);
    assert!(report.issues[0].contains("non-absolute"), "got: {:?}", report.issues);
}

// ── PDF conversion ───────────────────────────────────────────────────────────

#[tokio::test]
async fn corrupt_pdf_fails_with_extract_error() {
    let dir = tempfile::tempdir().unwrap();
    // Correct magic bytes, garbage body: detection succeeds, extraction fails.
    let path = write_fixture(&dir, "fake.pdf", b"%PDF-1.4\nthis is not a real pdf body");

    let err = convert(path.to_str().unwrap(), &ConversionConfig::default())
        .await
        .unwrap_err();
    assert!(
        matches!(err, Doc2MdError::PdfExtractFailed { .. }),
        "got: {err}"
    );
}

// ── Detection & inspection ───────────────────────────────────────────────────

#[tokio::test]
async fn inspect_detects_without_converting() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "doc.pdf", b"%PDF-1.7 stub");

    let info = inspect(path.to_str().unwrap()).await.unwrap();
    assert_eq!(info.format, SourceFormat::Pdf);
    assert_eq!(info.input_bytes, 13);
}

#[tokio::test]
async fn extension_drives_detection_for_ambiguous_content() {
    let dir = tempfile::tempdir().unwrap();
    // "[1, 2]" sniffs as JSON on its own; a .json extension agrees.
    let path = write_fixture(&dir, "data.json", b"[1, 2]");
    let info = inspect(path.to_str().unwrap()).await.unwrap();
    assert_eq!(info.format, SourceFormat::Json);
}

#[tokio::test]
async fn missing_file_is_file_not_found() {
    let err = convert("/no/such/file.json", &ConversionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Doc2MdError::FileNotFound { .. }));
}

#[tokio::test]
async fn oversized_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "big.json", &vec![b'['; 4096]);

    let config = ConversionConfig::builder()
        .max_input_bytes(1024)
        .build()
        .unwrap();
    let err = convert(path.to_str().unwrap(), &config).await.unwrap_err();
    assert!(matches!(
        err,
        Doc2MdError::InputTooLarge {
            actual: 4096,
            limit: 1024
        }
    ));
}

// ── File output ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn convert_to_file_writes_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(&dir, "data.json", br#"[{"k":"v"}]"#);
    let output = dir.path().join("out").join("data.md");

    let stats = convert_to_file(
        input.to_str().unwrap(),
        &output,
        &ConversionConfig::default(),
    )
    .await
    .unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, "| k |\n| --- |\n| v |\n");
    assert_eq!(stats.output_bytes, written.len());
    // No temp file left behind.
    assert!(!output.with_extension("md.tmp").exists());
}

// ── Sync wrapper ─────────────────────────────────────────────────────────────

#[test]
fn convert_sync_runs_without_an_ambient_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, br#"{"a": [1, 2]}"#).unwrap();

    let out = convert_sync(path.to_str().unwrap(), &ConversionConfig::default()).unwrap();
    assert_eq!(out.markdown, "- **a**: \n  - 1\n  - 2\n");
}

// ── Byte-level API ───────────────────────────────────────────────────────────

#[tokio::test]
async fn convert_bytes_with_explicit_format() {
    let config = ConversionConfig::builder()
        .format(SourceFormat::Html)
        .build()
        .unwrap();
    let out = convert_bytes(b"<h2>Section</h2>".to_vec(), &config)
        .await
        .unwrap();
    assert!(out.markdown.contains("## Section"), "got: {}", out.markdown);
}

// ── Library re-export sanity ─────────────────────────────────────────────────

#[test]
fn render_json_is_exposed_at_crate_root() {
    assert_eq!(render_json(&json!({"a": 1})), "- **a**: 1\n");
    assert_eq!(render_json(&json!([{}, {}])), "```json\n[\n  {},\n  {}\n]\n```");
}
