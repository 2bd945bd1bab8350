//! Line variants
//!
//! Every parsed line remembers its original text. Rendering returns that
//! text unless the line was edited through the API.

use std::borrow::Cow;

/// A single line of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `;` or `#` comment, raw text
    Comment(String),

    /// Empty or whitespace-only line, raw text
    Blank(String),

    /// `[Name]` header
    Section(SectionHeader),

    /// `key=value` inside a section
    Entry(Entry),

    /// Anything unclassifiable, kept verbatim
    Opaque(String),
}

impl Line {
    /// Text to emit for this line (without line terminator)
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Line::Comment(raw) | Line::Blank(raw) | Line::Opaque(raw) => Cow::Borrowed(raw),
            Line::Section(header) => header.render(),
            Line::Entry(entry) => entry.render(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Line::Blank(_))
    }

    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            Line::Entry(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Section header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    /// Section name as written (trimmed, without brackets)
    pub name: String,
    raw: Option<String>,
}

impl SectionHeader {
    /// Header created through the API, rendered as `[name]`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw: None,
        }
    }

    pub(crate) fn parsed(name: String, raw: String) -> Self {
        Self {
            name,
            raw: Some(raw),
        }
    }

    pub fn render(&self) -> Cow<'_, str> {
        match &self.raw {
            Some(raw) => Cow::Borrowed(raw),
            None => Cow::Owned(format!("[{}]", self.name)),
        }
    }
}

/// Key/value line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Key as written (trimmed)
    pub key: String,
    /// Value as written (trimmed, trailing comment removed)
    pub value: String,
    /// Trailing comment including its leading whitespace, e.g. `"  ; percent"`
    pub comment: Option<String>,
    /// Original line text; `None` once the value has been changed
    raw: Option<String>,
}

impl Entry {
    /// Entry created through the API, rendered as `key=value`
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: None,
            raw: None,
        }
    }

    pub(crate) fn parsed(key: String, value: String, comment: Option<String>, raw: String) -> Self {
        Self {
            key,
            value,
            comment,
            raw: Some(raw),
        }
    }

    /// Replace the value; the trailing comment is carried over
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.raw = None;
    }

    /// True when the line will be re-rendered rather than copied
    pub fn is_rewritten(&self) -> bool {
        self.raw.is_none()
    }

    pub fn render(&self) -> Cow<'_, str> {
        if let Some(raw) = &self.raw {
            return Cow::Borrowed(raw);
        }
        let mut out = String::with_capacity(self.key.len() + self.value.len() + 1);
        out.push_str(&self.key);
        out.push('=');
        out.push_str(&self.value);
        if let Some(comment) = &self.comment {
            out.push_str(comment);
        }
        Cow::Owned(out)
    }
}
