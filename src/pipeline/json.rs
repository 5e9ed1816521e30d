//! JSON-to-Markdown rendering.
//!
//! ## Shape-driven dispatch
//!
//! A parsed JSON value is rendered one of three ways, chosen once at the
//! root:
//!
//! 1. **Table** — a non-empty array whose elements are all objects becomes a
//!    GFM table. The column set is the union of every key seen across the
//!    elements, in first-seen order, so rows with differing key sets still
//!    line up.
//! 2. **Nested bullet list** — everything else (objects, scalars, mixed or
//!    empty arrays) recurses into an indented list, two spaces per level.
//! 3. **Fenced fallback** — an array of empty objects would produce a
//!    headerless table, so the whole value is emitted as a pretty-printed
//!    `json` code block instead.
//!
//! [`render`] is total: it never fails for any structurally valid JSON
//! value, holds no state, and touches no I/O. Parsing the raw text (and
//! rejecting oversized input) happens upstream in [`crate::convert`].
//!
//! Object key order is insertion order — `serde_json` is compiled with
//! `preserve_order`, so documents render in the order their keys were
//! written.

use serde_json::Value;

/// Render a parsed JSON value as Markdown.
///
/// # Example
/// ```rust
/// use serde_json::json;
///
/// let md = doc2md::render_json(&json!([
///     {"name": "Ada", "age": 36},
///     {"name": "Grace"}
/// ]));
/// assert_eq!(md, "| name | age |\n| --- | --- |\n| Ada | 36 |\n| Grace |  |\n");
/// ```
pub fn render(value: &Value) -> String {
    match value {
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            let columns = column_union(items);
            if columns.is_empty() {
                // Array of `{}` — a table with no header is not renderable.
                fenced_json(value)
            } else {
                render_table(items, &columns)
            }
        }
        other => to_list(other, 0),
    }
}

/// Ordered, duplicate-free union of all object keys across the elements.
///
/// Iterates elements in array order and each element's keys in that
/// element's own order, appending keys not yet collected.
fn column_union(items: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

fn render_table(items: &[Value], columns: &[String]) -> String {
    let mut out = String::new();

    out.push_str("| ");
    out.push_str(&columns.join(" | "));
    out.push_str(" |\n");

    out.push_str("| ");
    out.push_str(&vec!["---"; columns.len()].join(" | "));
    out.push_str(" |\n");

    for item in items {
        let cells: Vec<String> = columns.iter().map(|key| table_cell(item, key)).collect();
        out.push_str("| ");
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
    }

    out
}

/// One table cell: missing keys and nulls blank out, nested containers are
/// serialised compactly, scalars are pipe-escaped.
fn table_cell(item: &Value, key: &str) -> String {
    match item.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(nested @ (Value::Object(_) | Value::Array(_))) => {
            serde_json::to_string(nested).unwrap_or_default()
        }
        Some(scalar) => escape_pipes(&scalar_text(scalar)),
    }
}

/// Recursive bullet-list rendering, two spaces of indent per depth level.
fn to_list(value: &Value, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut out = String::new();

    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        out.push_str(&indent);
                        out.push_str(&format!("- Item {}:\n", i + 1));
                        out.push_str(&to_list(item, depth + 1));
                    }
                    scalar => {
                        out.push_str(&indent);
                        out.push_str("- ");
                        out.push_str(&scalar_text(scalar));
                        out.push('\n');
                    }
                }
            }
        }
        Value::Object(map) => {
            for (key, val) in map {
                out.push_str(&indent);
                out.push_str(&format!("- **{key}**: "));
                match val {
                    Value::Object(_) | Value::Array(_) => {
                        out.push('\n');
                        out.push_str(&to_list(val, depth + 1));
                    }
                    // Null renders as the literal text "null" here, unlike
                    // the table path which blanks it. Intentional; see
                    // DESIGN.md.
                    scalar => {
                        out.push_str(&scalar_text(scalar));
                        out.push('\n');
                    }
                }
            }
        }
        scalar => {
            out.push_str(&indent);
            out.push_str(&scalar_text(scalar));
            out.push('\n');
        }
    }

    out
}

/// A scalar's plain text form: strings unquoted, `null` as the literal
/// word, numbers and booleans via their canonical display.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        // Containers never reach here from render/to_list; serialise
        // compactly rather than panic if a future caller passes one.
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Escape literal `|` so cell content cannot break table column alignment.
pub(crate) fn escape_pipes(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Pretty-printed JSON inside a fenced `json` code block.
fn fenced_json(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_default();
    format!("```json\n{pretty}\n```")
}
