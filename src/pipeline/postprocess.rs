//! Post-processing: deterministic cleanup of transpiler and extractor output.
//!
//! ## Why is post-processing necessary?
//!
//! The third-party stages produce structurally messy Markdown: the HTML
//! transpiler leaves trailing spaces where inline runs ended and stacks of
//! blank lines where block elements were dropped, and PDF text extraction
//! carries whatever line endings and invisible Unicode the document embedded
//! (BOMs, soft hyphens, zero-width joiners). These passes fix shape without
//! touching content, and each is a pure `&str → String` rule that can be
//! tested on its own.
//!
//! The JSON renderer and the sitemap table are *not* cleaned: their output
//! shape is part of the library contract and must survive byte-for-byte.
//!
//! ## Rule order
//!
//! Line endings are normalised first so every later pass can assume `\n`;
//! the final-newline pass runs last so nothing after it can strip or add
//! trailing whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleanup passes to converted Markdown.
///
/// Rules (applied in order):
/// 1. Normalise line endings (CRLF/CR → LF)
/// 2. Trim trailing whitespace per line
/// 3. Collapse 3+ consecutive blank lines down to 2
/// 4. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, etc.)
/// 5. Ensure the document ends with exactly one newline
pub fn clean_markdown(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = trim_trailing_whitespace(&s);
    let s = collapse_blank_lines(&s);
    let s = remove_invisible_chars(&s);
    ensure_final_newline(&s)
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Trim trailing whitespace per line ────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 3: Collapse excessive blank lines ───────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n\n").to_string()
}

// ── Rule 4: Remove invisible Unicode characters ──────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 5: Ensure file ends with single newline ─────────────────────────

fn ensure_final_newline(input: &str) -> String {
    let trimmed = input.trim_end();
    if trimmed.is_empty() {
        String::from("\n")
    } else {
        format!("{}\n", trimmed)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_trim_trailing_whitespace() {
        assert_eq!(
            trim_trailing_whitespace("  hello   \nworld  "),
            "  hello\nworld"
        );
    }

    #[test]
    fn test_collapse_blank_lines() {
        let input = "a\n\n\n\n\n\nb";
        assert_eq!(collapse_blank_lines(input), "a\n\n\nb");
    }

    #[test]
    fn test_remove_invisible() {
        let input = "hello\u{200B}world\u{FEFF}foo\u{00AD}bar";
        assert_eq!(remove_invisible_chars(input), "helloworldfoobar");
    }

    #[test]
    fn test_ensure_final_newline() {
        assert_eq!(ensure_final_newline("hello"), "hello\n");
        assert_eq!(ensure_final_newline("hello\n\n\n"), "hello\n");
        assert_eq!(ensure_final_newline(""), "\n");
    }

    #[test]
    fn test_clean_markdown_full_pipeline() {
        let input = "# Title\r\n\r\nSome text   \n\n\n\n\n\n## Section\u{FEFF}\n";
        let result = clean_markdown(input);
        assert!(result.starts_with("# Title"));
        assert!(result.ends_with("## Section\n"));
        assert!(!result.contains('\r'));
        assert!(!result.contains('\u{FEFF}'));
        assert!(!result.contains("\n\n\n\n"));
    }
}
