//! Per-culture string dictionary
//!
//! Two on-disk layouts are understood:
//!
//! ```text
//! Flat                         Sectioned
//! Buttons:Launch=Launch        [Buttons]
//! Title=Mod Manager            Launch=Launch
//! ```
//!
//! Both produce the logical key `Buttons:Launch`. Keys are matched
//! case-insensitively; values are kept verbatim.

use std::collections::HashMap;

/// Layout a dictionary file was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Flat,
    Sectioned,
}

/// Logical key → display string for one culture
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse dictionary text, reporting which layout it used
    ///
    /// A file containing any `[Section]` header is sectioned; keys above
    /// the first header are taken as-is. Comments, blank lines and lines
    /// without `=` are skipped. Later duplicates override earlier ones.
    pub fn parse(text: &str) -> (Self, Layout) {
        let mut dict = Self::new();
        let mut section: Option<String> = None;
        let mut layout = Layout::Flat;

        for line in text.lines() {
            let trimmed = line.trim().trim_start_matches('\u{feff}');

            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
                let name = trimmed[1..trimmed.len() - 1].trim();
                if !name.is_empty() {
                    section = Some(name.to_string());
                    layout = Layout::Sectioned;
                }
                continue;
            }

            let Some(eq_pos) = trimmed.find('=') else {
                continue;
            };
            let key = trimmed[..eq_pos].trim();
            if key.is_empty() {
                continue;
            }
            let value = trimmed[eq_pos + 1..].trim();

            match &section {
                Some(section) => dict.insert(&format!("{}:{}", section, key), value),
                None => dict.insert(key, value),
            }
        }

        (dict, layout)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Copy every entry of `other` into `self`, overriding on conflict
    pub fn merge(&mut self, other: Dictionary) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (key, value) in iter {
            dict.insert(key.as_ref(), value);
        }
        dict
    }
}
