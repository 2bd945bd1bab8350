//! Tests for the flat `key=value` format helpers

use std::collections::BTreeMap;

use settingskv::flat::{composite_key, parse, serialize, split_composite};

#[test]
fn test_parse_composite_keys() {
    let values = parse("[Dev]IsDevBuild=false\n[Server]Port = 5000\n");

    assert_eq!(values.get("[Dev]IsDevBuild").map(String::as_str), Some("false"));
    assert_eq!(values.get("[Server]Port").map(String::as_str), Some("5000"));
}

#[test]
fn test_parse_ignores_markers_comments_and_junk() {
    let text = "\u{feff}; comment\n# other\n[Dev]\n\nno equals\n=empty key\n[Dev]IsDevBuild=true\n";

    let values = parse(text);

    assert_eq!(values.len(), 1);
    assert_eq!(values.get("[Dev]IsDevBuild").map(String::as_str), Some("true"));
}

#[test]
fn test_parse_last_write_wins() {
    let values = parse("[A]k=1\n[A]k=2\n");

    assert_eq!(values.get("[A]k").map(String::as_str), Some("2"));
}

#[test]
fn test_parse_keys_are_case_sensitive() {
    let values = parse("[A]Key=1\n[a]key=2\n");

    assert_eq!(values.len(), 2);
}

#[test]
fn test_parse_crlf() {
    let values = parse("[A]x=1\r\n[A]y=2\r\n");

    assert_eq!(values.get("[A]x").map(String::as_str), Some("1"));
    assert_eq!(values.get("[A]y").map(String::as_str), Some("2"));
}

#[test]
fn test_serialize_sorted_lines() {
    let mut values = BTreeMap::new();
    values.insert("[Server]Port".to_string(), "5000".to_string());
    values.insert("[Dev]IsDevBuild".to_string(), "false".to_string());

    assert_eq!(serialize(&values), "[Dev]IsDevBuild=false\n[Server]Port=5000\n");
    assert_eq!(parse(&serialize(&values)), values);
}

#[test]
fn test_composite_key_helpers() {
    assert_eq!(composite_key("Dev", "IsDevBuild"), "[Dev]IsDevBuild");
    assert_eq!(split_composite("[Dev]IsDevBuild"), Some(("Dev", "IsDevBuild")));
    assert_eq!(split_composite("[Dev]"), Some(("Dev", "")));
    assert_eq!(split_composite("NoSection"), None);
    assert_eq!(split_composite("[Unclosed"), None);
}
