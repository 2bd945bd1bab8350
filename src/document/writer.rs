//! Document writer

use super::table::Document;

/// Serialize a document back to text
///
/// Untouched lines are emitted exactly as parsed, each with its original
/// terminator; edited and new lines are rendered as `key=value` (plus any
/// trailing comment the entry carried).
pub fn serialize(doc: &Document) -> String {
    let mut out = String::with_capacity(doc.line_count() * 24);

    if doc.has_bom() {
        out.push('\u{feff}');
    }

    let last = doc.line_count().saturating_sub(1);
    for (i, line) in doc.lines().iter().enumerate() {
        out.push_str(&line.render());
        if i < last || doc.has_final_newline() {
            let ending = doc.line_ending(i).unwrap_or(doc.newline());
            out.push_str(ending.as_str());
        }
    }

    out
}
