//! Document line table
//!
//! Ordered lines plus a derived, case-insensitive section/key index.
//! Every mutation rebuilds the index before returning.

use std::collections::HashMap;

use super::line::{Entry, Line, SectionHeader};
use super::parser::classify;

/// Line terminator used when writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Newline {
    #[default]
    Lf,
    CrLf,
}

impl Newline {
    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// Outcome of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// Key existed with the same value, nothing touched
    Unchanged,
    /// Existing entry rewritten in place
    Updated,
    /// New entry appended (and section created if needed)
    Inserted,
    /// Nothing touched: the line would not read back as the same entry
    Rejected,
}

impl Upsert {
    pub fn changed(self) -> bool {
        matches!(self, Upsert::Updated | Upsert::Inserted)
    }
}

/// Per-section slice of the index
#[derive(Debug, Clone, Default)]
struct SectionSlot {
    /// Name as written in the first header
    name: String,
    /// Header line indices (a section may be split across several headers)
    headers: Vec<usize>,
    /// Entry line indices, in file order
    entries: Vec<usize>,
}

/// Derived lookup structure, always rebuilt from the line list
#[derive(Debug, Clone, Default)]
struct Index {
    /// lower-cased section name → slot
    sections: HashMap<String, SectionSlot>,
    /// lower-cased section names in order of first appearance
    order: Vec<String>,
    /// (lower section, lower key) → line index of the first occurrence
    entries: HashMap<(String, String), usize>,
}

/// A parsed sectioned text file
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    /// Terminator after each line, parallel to `lines`
    endings: Vec<Newline>,
    /// Style for lines added through the API
    newline: Newline,
    bom: bool,
    final_newline: bool,
    index: Index,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Newline::Lf, false, true)
    }

    pub(crate) fn from_parts(
        lines: Vec<Line>,
        endings: Vec<Newline>,
        newline: Newline,
        bom: bool,
        final_newline: bool,
    ) -> Self {
        debug_assert_eq!(lines.len(), endings.len());
        let mut doc = Self {
            lines,
            endings,
            newline,
            bom,
            final_newline,
            index: Index::default(),
        };
        doc.rebuild_index();
        doc
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Dominant line terminator, used for new lines
    pub fn newline(&self) -> Newline {
        self.newline
    }

    /// Terminator written after line `idx`
    pub fn line_ending(&self, idx: usize) -> Option<Newline> {
        self.endings.get(idx).copied()
    }

    pub fn has_bom(&self) -> bool {
        self.bom
    }

    pub fn has_final_newline(&self) -> bool {
        self.final_newline
    }

    /// Line index of an entry (case-insensitive on both parts)
    pub fn find_entry(&self, section: &str, key: &str) -> Option<usize> {
        self.index
            .entries
            .get(&(section.to_lowercase(), key.to_lowercase()))
            .copied()
    }

    /// Entry stored at `(section, key)`
    pub fn entry(&self, section: &str, key: &str) -> Option<&Entry> {
        self.find_entry(section, key)
            .and_then(|idx| self.lines[idx].as_entry())
    }

    /// Value stored at `(section, key)`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.entry(section, key).map(|e| e.value.as_str())
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.index.sections.contains_key(&section.to_lowercase())
    }

    /// Section names in order of first appearance, as first written
    pub fn sections(&self) -> Vec<String> {
        self.index
            .order
            .iter()
            .filter_map(|lower| self.index.sections.get(lower))
            .map(|slot| slot.name.clone())
            .collect()
    }

    /// `(key, value)` pairs of a section in file order
    ///
    /// A key repeated inside the section is reported once, with the value
    /// lookups see.
    pub fn entries(&self, section: &str) -> Vec<(String, String)> {
        let lower = section.to_lowercase();
        let Some(slot) = self.index.sections.get(&lower) else {
            return Vec::new();
        };

        slot.entries
            .iter()
            .filter_map(|&idx| {
                let entry = self.lines[idx].as_entry()?;
                let first = self
                    .index
                    .entries
                    .get(&(lower.clone(), entry.key.to_lowercase()))?;
                (*first == idx).then(|| (entry.key.clone(), entry.value.clone()))
            })
            .collect()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Set a value, inserting the entry (and its section) when missing
    ///
    /// Existing entries keep their key spelling and trailing comment. New
    /// entries go right after the last entry of their section; a new
    /// section is appended at the end of the document, separated from
    /// previous content by a blank line.
    ///
    /// An edit whose rendered line would not parse back to the same
    /// section, key and value is refused with [`Upsert::Rejected`]. That
    /// covers line breaks anywhere, keys containing `=` or starting with a
    /// comment marker, values containing ` ;` or surrounding whitespace,
    /// and blank section names.
    pub fn upsert_entry(&mut self, section: &str, key: &str, value: &str) -> Upsert {
        if let Some(idx) = self.find_entry(section, key) {
            if let Line::Entry(entry) = &mut self.lines[idx] {
                if entry.value == value {
                    return Upsert::Unchanged;
                }
                let mut edited = entry.clone();
                edited.set_value(value);
                if !entry_round_trips(&edited) {
                    return Upsert::Rejected;
                }
                *entry = edited;
                return Upsert::Updated;
            }
        }

        let entry = Entry::new(key, value);
        if !entry_round_trips(&entry) {
            return Upsert::Rejected;
        }

        let new_line = Line::Entry(entry);
        match self.index.sections.get(&section.to_lowercase()) {
            Some(slot) => {
                let anchor = slot
                    .entries
                    .last()
                    .or_else(|| slot.headers.last())
                    .copied()
                    .unwrap_or(self.lines.len().saturating_sub(1));
                self.lines.insert(anchor + 1, new_line);
                self.endings.insert(anchor + 1, self.newline);
            }
            None => {
                let header = SectionHeader::new(section);
                if !header_round_trips(&header) {
                    return Upsert::Rejected;
                }
                if self.lines.last().is_some_and(|l| !l.is_blank()) {
                    self.push_line(Line::Blank(String::new()));
                }
                self.push_line(Line::Section(header));
                self.push_line(new_line);
            }
        }

        self.rebuild_index();
        Upsert::Inserted
    }

    /// Remove the entry at `(section, key)`, returning it
    pub fn remove_entry(&mut self, section: &str, key: &str) -> Option<Entry> {
        let idx = self.find_entry(section, key)?;
        self.endings.remove(idx);
        let removed = match self.lines.remove(idx) {
            Line::Entry(entry) => Some(entry),
            _ => None,
        };
        self.rebuild_index();
        removed
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn push_line(&mut self, line: Line) {
        self.lines.push(line);
        self.endings.push(self.newline);
    }

    fn rebuild_index(&mut self) {
        let mut index = Index::default();
        let mut current: Option<String> = None;

        for (idx, line) in self.lines.iter().enumerate() {
            match line {
                Line::Section(header) => {
                    let lower = header.name.to_lowercase();
                    let slot = index.sections.entry(lower.clone()).or_insert_with(|| {
                        index.order.push(lower.clone());
                        SectionSlot {
                            name: header.name.clone(),
                            ..SectionSlot::default()
                        }
                    });
                    slot.headers.push(idx);
                    current = Some(lower);
                }
                Line::Entry(entry) => {
                    // Entries only parse inside a section; guard anyway
                    let Some(section) = &current else { continue };
                    if let Some(slot) = index.sections.get_mut(section) {
                        slot.entries.push(idx);
                    }
                    index
                        .entries
                        .entry((section.clone(), entry.key.to_lowercase()))
                        .or_insert(idx);
                }
                _ => {}
            }
        }

        self.index = index;
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

fn entry_round_trips(entry: &Entry) -> bool {
    if has_line_break(&entry.key) || has_line_break(&entry.value) {
        return false;
    }
    match classify(&entry.render(), true) {
        Line::Entry(parsed) => parsed.key == entry.key && parsed.value == entry.value,
        _ => false,
    }
}

fn header_round_trips(header: &SectionHeader) -> bool {
    if has_line_break(&header.name) {
        return false;
    }
    match classify(&header.render(), false) {
        Line::Section(parsed) => parsed.name == header.name,
        _ => false,
    }
}
