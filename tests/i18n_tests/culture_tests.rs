//! Tests for culture identifiers and the lookup chain

use settingskv::i18n::{lookup_chain, CultureId};

#[test]
fn test_parse_normalizes_separator_and_case() {
    for input in ["en_US", "en-US", "EN-us", " en_us "] {
        let id = CultureId::parse(input).unwrap();
        assert_eq!(id.as_str(), "en_US", "input {:?}", input);
        assert_eq!(id.hyphenated(), "en-US");
        assert_eq!(id.neutral(), "en");
        assert!(!id.is_neutral());
    }
}

#[test]
fn test_parse_neutral_culture() {
    let id = CultureId::parse("JA").unwrap();

    assert_eq!(id.as_str(), "ja");
    assert_eq!(id.hyphenated(), "ja");
    assert_eq!(id.neutral(), "ja");
    assert!(id.is_neutral());
}

#[test]
fn test_parse_script_and_numeric_region() {
    assert_eq!(CultureId::parse("zh-hant-tw").unwrap().as_str(), "zh_Hant_TW");
    assert_eq!(CultureId::parse("es-419").unwrap().as_str(), "es_419");
}

#[test]
fn test_parse_rejects_non_culture_names() {
    for input in ["", "x", "readme", "en__US", "en-", "e1", "en US", "english"] {
        assert!(CultureId::parse(input).is_none(), "accepted {:?}", input);
    }
}

#[test]
fn test_display_and_ordering() {
    let mut ids: Vec<CultureId> = ["ja", "en-US", "de"]
        .iter()
        .filter_map(|s| CultureId::parse(s))
        .collect();
    ids.sort();

    let shown: Vec<String> = ids.iter().map(ToString::to_string).collect();
    assert_eq!(shown, vec!["de", "en_US", "ja"]);
}

#[test]
fn test_lookup_chain_order() {
    assert_eq!(lookup_chain("ja-JP"), vec!["ja-jp", "ja_jp", "ja"]);
    assert_eq!(lookup_chain("en_US"), vec!["en_us", "en-us", "en"]);
    assert_eq!(lookup_chain("fr"), vec!["fr"]);
    assert!(lookup_chain("  ").is_empty());
}
