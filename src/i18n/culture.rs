//! Culture identifiers
//!
//! Tags are accepted with either `_` or `-` separators and in any case,
//! and normalized to `lang_REGION` form (`en-us` → `en_US`).

use std::fmt;

/// A normalized culture tag such as `en_US`, `ja` or `zh_Hans_CN`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CultureId {
    tag: String,
}

impl CultureId {
    /// Parse a culture tag
    ///
    /// The language subtag must be 2–3 ASCII letters; further subtags are
    /// 1–8 ASCII alphanumerics. Two-letter regions are upper-cased and
    /// four-letter scripts title-cased.
    ///
    /// ```
    /// use settingskv::i18n::CultureId;
    ///
    /// let id = CultureId::parse("zh-hans-cn").unwrap();
    /// assert_eq!(id.as_str(), "zh_Hans_CN");
    /// assert_eq!(id.hyphenated(), "zh-Hans-CN");
    /// assert_eq!(id.neutral(), "zh");
    /// assert!(CultureId::parse("strings").is_none());
    /// assert!(CultureId::parse("not a tag").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let mut parts = s.split(['_', '-']);

        let lang = parts.next()?;
        if !(2..=3).contains(&lang.len()) || !lang.bytes().all(|b| b.is_ascii_alphabetic()) {
            return None;
        }

        let mut tag = lang.to_ascii_lowercase();
        for part in parts {
            if !(1..=8).contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return None;
            }
            tag.push('_');
            tag.push_str(&normalize_subtag(part));
        }

        Some(Self { tag })
    }

    /// Underscore form, e.g. `en_US`
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// Hyphenated form, e.g. `en-US`
    pub fn hyphenated(&self) -> String {
        self.tag.replace('_', "-")
    }

    /// Language-only prefix, e.g. `en`
    pub fn neutral(&self) -> &str {
        self.tag.split('_').next().unwrap_or(&self.tag)
    }

    /// True for a language-only tag such as `ja`
    pub fn is_neutral(&self) -> bool {
        !self.tag.contains('_')
    }
}

impl fmt::Display for CultureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// Dictionary names to try for a requested culture, most specific first
///
/// Order: the tag exactly as requested, its hyphenated form, its
/// underscore form, then the neutral language prefix. Names are
/// lower-cased and duplicates dropped.
///
/// ```
/// use settingskv::i18n::lookup_chain;
///
/// assert_eq!(lookup_chain("ja-JP"), vec!["ja-jp", "ja_jp", "ja"]);
/// assert_eq!(lookup_chain("en_US"), vec!["en_us", "en-us", "en"]);
/// ```
pub fn lookup_chain(requested: &str) -> Vec<String> {
    let exact = requested.trim().to_lowercase();
    if exact.is_empty() {
        return Vec::new();
    }

    let candidates = [
        exact.clone(),
        exact.replace('_', "-"),
        exact.replace('-', "_"),
        exact.split(['_', '-']).next().unwrap_or(&exact).to_string(),
    ];

    let mut chain: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.is_empty() && !chain.contains(&candidate) {
            chain.push(candidate);
        }
    }
    chain
}

fn normalize_subtag(part: &str) -> String {
    let all_alpha = part.bytes().all(|b| b.is_ascii_alphabetic());
    match part.len() {
        2 if all_alpha => part.to_ascii_uppercase(),
        4 if all_alpha => {
            let lower = part.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => lower,
            }
        }
        _ => part.to_string(),
    }
}
