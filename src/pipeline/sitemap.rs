//! Sitemap extraction and validation.
//!
//! Sitemaps are XML, but transpiling one like generic markup would produce
//! a useless wall of URLs. Instead the `<urlset>`/`<sitemapindex>` structure
//! is parsed with an event reader and rendered as a Markdown table via the
//! core JSON renderer, so the column set adapts to whichever optional fields
//! (`lastmod`, `changefreq`, `priority`) the document actually uses.
//!
//! Validation is deliberately separate from parsing: a sitemap that parses
//! can still violate the protocol (relative URLs, over the entry cap), and
//! callers converting one usually want the Markdown anyway, with violations
//! reported as warnings.
//!
//! Sitemap *generation* is out of scope.

use crate::error::Doc2MdError;
use crate::pipeline::{input, json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Entry cap from the sitemap protocol: one file may list at most 50 000
/// URLs.
pub const MAX_SITEMAP_URLS: usize = 50_000;

/// Which root element the document carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapKind {
    /// `<urlset>` — a leaf sitemap listing page URLs.
    UrlSet,
    /// `<sitemapindex>` — an index listing child sitemap URLs.
    Index,
}

/// One `<url>` (or `<sitemap>`) entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

/// A parsed sitemap document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sitemap {
    pub kind: SitemapKind,
    pub entries: Vec<SitemapEntry>,
}

/// Validation outcome: the parsed shape plus any protocol violations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub kind: SitemapKind,
    pub entry_count: usize,
    pub issues: Vec<String>,
}

impl ValidationReport {
    /// True when no protocol violations were found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Child element currently being read inside a `<url>`/`<sitemap>` block.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    LastMod,
    ChangeFreq,
    Priority,
}

/// Parse a sitemap document.
///
/// Accepts both `<urlset>` and `<sitemapindex>` roots; namespace prefixes
/// are ignored. Malformed XML or a wrong root element is
/// [`Doc2MdError::InvalidSitemap`].
pub fn parse(xml: &str) -> Result<Sitemap, Doc2MdError> {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(xml);
    let mut kind: Option<SitemapKind> = None;
    let mut entries: Vec<SitemapEntry> = Vec::new();
    let mut current: Option<SitemapEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"urlset" => {
                    kind.get_or_insert(SitemapKind::UrlSet);
                }
                b"sitemapindex" => {
                    kind.get_or_insert(SitemapKind::Index);
                }
                b"url" | b"sitemap" if kind.is_some() => {
                    current = Some(SitemapEntry::default());
                }
                b"loc" => field = Some(Field::Loc),
                b"lastmod" => field = Some(Field::LastMod),
                b"changefreq" => field = Some(Field::ChangeFreq),
                b"priority" => field = Some(Field::Priority),
                _ => field = None,
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"url" | b"sitemap" => {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                }
                b"loc" | b"lastmod" | b"changefreq" | b"priority" => field = None,
                _ => {}
            },
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| Doc2MdError::InvalidSitemap {
                    detail: e.to_string(),
                })?;
                record_field(&mut current, field, text.trim());
            }
            Ok(Event::CData(t)) => {
                let raw = t.into_inner();
                let text = String::from_utf8_lossy(&raw);
                record_field(&mut current, field, text.trim());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Doc2MdError::InvalidSitemap {
                    detail: e.to_string(),
                })
            }
        }
    }

    let kind = kind.ok_or_else(|| Doc2MdError::InvalidSitemap {
        detail: "root element must be <urlset> or <sitemapindex>".to_string(),
    })?;

    debug!("parsed sitemap: {:?} with {} entries", kind, entries.len());
    Ok(Sitemap { kind, entries })
}

fn record_field(current: &mut Option<SitemapEntry>, field: Option<Field>, text: &str) {
    if text.is_empty() {
        return;
    }
    let (Some(entry), Some(field)) = (current.as_mut(), field) else {
        return;
    };
    match field {
        Field::Loc => entry.loc.push_str(text),
        Field::LastMod => append_opt(&mut entry.lastmod, text),
        Field::ChangeFreq => append_opt(&mut entry.changefreq, text),
        Field::Priority => append_opt(&mut entry.priority, text),
    }
}

fn append_opt(slot: &mut Option<String>, text: &str) {
    match slot {
        Some(existing) => existing.push_str(text),
        None => *slot = Some(text.to_string()),
    }
}

/// Protocol violations for an already-parsed sitemap.
pub fn check(sitemap: &Sitemap) -> Vec<String> {
    let mut issues = Vec::new();

    if sitemap.entries.is_empty() {
        issues.push("sitemap contains no entries".to_string());
    }
    if sitemap.entries.len() > MAX_SITEMAP_URLS {
        issues.push(format!(
            "{} entries exceeds the protocol limit of {}",
            sitemap.entries.len(),
            MAX_SITEMAP_URLS
        ));
    }
    for (i, entry) in sitemap.entries.iter().enumerate() {
        if entry.loc.is_empty() {
            issues.push(format!("entry {} has no <loc>", i + 1));
        } else if !input::is_url(&entry.loc) {
            issues.push(format!(
                "entry {} has a non-absolute <loc>: '{}'",
                i + 1,
                entry.loc
            ));
        }
    }

    issues
}

/// Parse and validate a sitemap document in one step.
pub fn validate(xml: &str) -> Result<ValidationReport, Doc2MdError> {
    let sitemap = parse(xml)?;
    let issues = check(&sitemap);
    Ok(ValidationReport {
        kind: sitemap.kind,
        entry_count: sitemap.entries.len(),
        issues,
    })
}

/// Render a parsed sitemap as a Markdown table.
///
/// Entries become an array of objects fed through the core JSON renderer,
/// which gives first-seen column ordering and pipe escaping for free. An
/// empty sitemap renders as an empty string, same as an empty JSON array.
pub fn to_markdown(sitemap: &Sitemap) -> String {
    let rows: Vec<Value> = sitemap
        .entries
        .iter()
        .map(|entry| {
            let mut row = Map::new();
            row.insert("loc".to_string(), Value::String(entry.loc.clone()));
            if let Some(v) = &entry.lastmod {
                row.insert("lastmod".to_string(), Value::String(v.clone()));
            }
            if let Some(v) = &entry.changefreq {
                row.insert("changefreq".to_string(), Value::String(v.clone()));
            }
            if let Some(v) = &entry.priority {
                row.insert("priority".to_string(), Value::String(v.clone()));
            }
            Value::Object(row)
        })
        .collect();

    json::render(&Value::Array(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2024-06-01</lastmod>
    <changefreq>daily</changefreq>
    <priority>1.0</priority>
  </url>
  <url>
    <loc>https://example.com/pricing</loc>
  </url>
</urlset>"#;

    #[test]
    fn parses_urlset() {
        let sm = parse(URLSET).unwrap();
        assert_eq!(sm.kind, SitemapKind::UrlSet);
        assert_eq!(sm.entries.len(), 2);
        assert_eq!(sm.entries[0].loc, "https://example.com/");
        assert_eq!(sm.entries[0].lastmod.as_deref(), Some("2024-06-01"));
        assert_eq!(sm.entries[0].changefreq.as_deref(), Some("daily"));
        assert_eq!(sm.entries[0].priority.as_deref(), Some("1.0"));
        assert_eq!(sm.entries[1].loc, "https://example.com/pricing");
        assert!(sm.entries[1].lastmod.is_none());
    }

    #[test]
    fn parses_sitemap_index() {
        let xml = r#"<sitemapindex>
          <sitemap><loc>https://example.com/sitemap-1.xml</loc></sitemap>
          <sitemap><loc>https://example.com/sitemap-2.xml</loc></sitemap>
        </sitemapindex>"#;
        let sm = parse(xml).unwrap();
        assert_eq!(sm.kind, SitemapKind::Index);
        assert_eq!(sm.entries.len(), 2);
        assert_eq!(sm.entries[0].loc, "https://example.com/sitemap-1.xml");
    }

    #[test]
    fn entity_escapes_resolve_in_loc() {
        let xml = r#"<urlset><url><loc>https://example.com/?a=1&amp;b=2</loc></url></urlset>"#;
        let sm = parse(xml).unwrap();
        assert_eq!(sm.entries[0].loc, "https://example.com/?a=1&b=2");
    }

    #[test]
    fn cdata_loc_is_read() {
        let xml = "<urlset><url><loc><![CDATA[https://example.com/x]]></loc></url></urlset>";
        let sm = parse(xml).unwrap();
        assert_eq!(sm.entries[0].loc, "https://example.com/x");
    }

    #[test]
    fn wrong_root_is_rejected() {
        let err = parse("<feed><entry/></feed>").unwrap_err();
        assert!(matches!(err, Doc2MdError::InvalidSitemap { .. }));
    }

    #[test]
    fn malformed_xml_is_rejected() {
        let err = parse("<urlset><url><loc>x</url>").unwrap_err();
        assert!(matches!(err, Doc2MdError::InvalidSitemap { .. }));
    }

    #[test]
    fn valid_sitemap_has_clean_report() {
        let report = validate(URLSET).unwrap();
        assert!(report.is_valid(), "issues: {:?}", report.issues);
        assert_eq!(report.entry_count, 2);
        assert_eq!(report.kind, SitemapKind::UrlSet);
    }

    #[test]
    fn relative_loc_is_flagged() {
        let xml = "<urlset><url><loc>/relative/path</loc></url></urlset>";
        let report = validate(xml).unwrap();
        assert!(!report.is_valid());
        assert!(report.issues[0].contains("non-absolute"), "got: {:?}", report.issues);
    }

    #[test]
    fn missing_loc_is_flagged() {
        let xml = "<urlset><url><lastmod>2024-01-01</lastmod></url></urlset>";
        let report = validate(xml).unwrap();
        assert!(report.issues.iter().any(|i| i.contains("no <loc>")));
    }

    #[test]
    fn empty_sitemap_is_flagged() {
        let report = validate("<urlset></urlset>").unwrap();
        assert!(report.issues.iter().any(|i| i.contains("no entries")));
    }

    #[test]
    fn markdown_table_adapts_columns_to_present_fields() {
        let sm = parse(URLSET).unwrap();
        let md = to_markdown(&sm);
        assert!(
            md.starts_with("| loc | lastmod | changefreq | priority |\n"),
            "got: {md}"
        );
        assert!(md.contains("| https://example.com/pricing |  |  |  |"), "got: {md}");
    }

    #[test]
    fn markdown_table_loc_only() {
        let xml = "<urlset><url><loc>https://example.com/a</loc></url></urlset>";
        let md = to_markdown(&parse(xml).unwrap());
        assert_eq!(md, "| loc |\n| --- |\n| https://example.com/a |\n");
    }

    #[test]
    fn empty_sitemap_renders_empty_markdown() {
        let md = to_markdown(&parse("<urlset></urlset>").unwrap());
        assert_eq!(md, "");
    }
}
