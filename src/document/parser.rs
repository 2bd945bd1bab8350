//! Document parser
//!
//! Parsing is total: every input produces a document, and a document
//! produced from text serializes back to that same text.

use super::line::{Entry, Line, SectionHeader};
use super::table::{Document, Newline};

const BOM: char = '\u{feff}';

/// Parse text into a document
///
/// Each line remembers its own terminator, so files with mixed line
/// endings are written back unchanged. The most common terminator becomes
/// the document's style for new lines (ties go to the first line break).
/// A leading byte order mark and the presence of a final newline are
/// remembered for writing.
pub fn parse(text: &str) -> Document {
    let (bom, body) = match text.strip_prefix(BOM) {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let first_break = match body.find('\n') {
        Some(pos) if pos > 0 && body.as_bytes()[pos - 1] == b'\r' => Newline::CrLf,
        _ => Newline::Lf,
    };

    let empty = body.is_empty();
    let final_newline = empty || body.ends_with('\n');
    let body = body.strip_suffix('\n').unwrap_or(body);

    let mut lines = Vec::new();
    let mut endings = Vec::new();
    if !empty {
        let mut in_section = false;
        let mut pieces = body.split('\n').peekable();
        while let Some(piece) = pieces.next() {
            // The last piece only has a terminator when the file ends with one
            let terminated = pieces.peek().is_some() || final_newline;
            let (raw, ending) = match piece.strip_suffix('\r') {
                Some(raw) if terminated => (raw, Some(Newline::CrLf)),
                _ if terminated => (piece, Some(Newline::Lf)),
                _ => (piece, None),
            };

            let line = classify(raw, in_section);
            if matches!(line, Line::Section(_)) {
                in_section = true;
            }
            lines.push(line);
            endings.push(ending);
        }
    }

    let crlf = endings.iter().filter(|e| **e == Some(Newline::CrLf)).count();
    let lf = endings.iter().filter(|e| **e == Some(Newline::Lf)).count();
    let newline = match crlf.cmp(&lf) {
        std::cmp::Ordering::Greater => Newline::CrLf,
        std::cmp::Ordering::Less => Newline::Lf,
        std::cmp::Ordering::Equal => first_break,
    };

    let endings = endings.into_iter().map(|e| e.unwrap_or(newline)).collect();
    Document::from_parts(lines, endings, newline, bom, final_newline)
}

/// Classify a single line (without terminator)
pub(crate) fn classify(raw: &str, in_section: bool) -> Line {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Line::Blank(raw.to_string());
    }

    if trimmed.starts_with(';') || trimmed.starts_with('#') {
        return Line::Comment(raw.to_string());
    }

    if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
        let name = trimmed[1..trimmed.len() - 1].trim();
        if !name.is_empty() {
            return Line::Section(SectionHeader::parsed(name.to_string(), raw.to_string()));
        }
        return Line::Opaque(raw.to_string());
    }

    if in_section {
        if let Some(eq_pos) = trimmed.find('=') {
            let key = trimmed[..eq_pos].trim();
            if !key.is_empty() {
                let (value, comment) = split_trailing_comment(&trimmed[eq_pos + 1..]);
                return Line::Entry(Entry::parsed(
                    key.to_string(),
                    value.trim().to_string(),
                    comment.map(str::to_string),
                    raw.to_string(),
                ));
            }
        }
    }

    Line::Opaque(raw.to_string())
}

/// Split `value ; comment` at the first `;` preceded by whitespace
///
/// The comment keeps the whitespace in front of it so a rewritten line
/// keeps the same column gap.
fn split_trailing_comment(rest: &str) -> (&str, Option<&str>) {
    let bytes = rest.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b';' && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            let value = rest[..i].trim_end();
            return (value, Some(&rest[value.len()..]));
        }
    }
    (rest, None)
}
