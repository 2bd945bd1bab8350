//! Tests for the document parser and writer
//!
//! These tests verify:
//! - Line classification
//! - Trailing comment handling
//! - Byte-for-byte round trips (BOM, CRLF, mixed endings, final newline, junk lines)

use settingskv::document::{parse, serialize, Line, Newline};

// =============================================================================
// Helper Functions
// =============================================================================

fn assert_round_trip(text: &str) {
    let doc = parse(text);
    assert_eq!(serialize(&doc), text, "round trip changed {:?}", text);
}

fn classify_in_section(line: &str) -> Line {
    let doc = parse(&format!("[S]\n{}\n", line));
    doc.lines()[1].clone()
}

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn test_classify_comments() {
    assert!(matches!(classify_in_section("; semicolon"), Line::Comment(_)));
    assert!(matches!(classify_in_section("# hash"), Line::Comment(_)));
    assert!(matches!(classify_in_section("   ; indented"), Line::Comment(_)));
}

#[test]
fn test_classify_blank() {
    assert!(matches!(classify_in_section(""), Line::Blank(_)));
    assert!(matches!(classify_in_section(" \t "), Line::Blank(_)));
}

#[test]
fn test_classify_section_header() {
    let doc = parse("[ Game Settings ]\n");
    match &doc.lines()[0] {
        Line::Section(header) => assert_eq!(header.name, "Game Settings"),
        other => panic!("expected section, got {:?}", other),
    }
}

#[test]
fn test_classify_entry() {
    match classify_in_section("  Width = 1920  ") {
        Line::Entry(entry) => {
            assert_eq!(entry.key, "Width");
            assert_eq!(entry.value, "1920");
            assert_eq!(entry.comment, None);
            assert!(!entry.is_rewritten());
        }
        other => panic!("expected entry, got {:?}", other),
    }
}

#[test]
fn test_entry_value_keeps_later_equals_signs() {
    match classify_in_section("Args=-w -res=1280x720") {
        Line::Entry(entry) => {
            assert_eq!(entry.key, "Args");
            assert_eq!(entry.value, "-w -res=1280x720");
        }
        other => panic!("expected entry, got {:?}", other),
    }
}

#[test]
fn test_entry_before_any_section_is_opaque() {
    let doc = parse("orphan=1\n[S]\nk=v\n");
    assert!(matches!(doc.lines()[0], Line::Opaque(_)));
    assert!(matches!(doc.lines()[2], Line::Entry(_)));
    assert_eq!(doc.get("S", "orphan"), None);
}

#[test]
fn test_empty_key_is_opaque() {
    assert!(matches!(classify_in_section("=value"), Line::Opaque(_)));
}

#[test]
fn test_unclassifiable_lines_are_kept() {
    assert!(matches!(classify_in_section("just some words"), Line::Opaque(_)));
    assert!(matches!(classify_in_section("[]"), Line::Opaque(_)));
    assert!(matches!(classify_in_section("[unterminated"), Line::Opaque(_)));
}

// =============================================================================
// Trailing Comment Tests
// =============================================================================

#[test]
fn test_trailing_comment_split() {
    match classify_in_section("Volume = 80   ; percent") {
        Line::Entry(entry) => {
            assert_eq!(entry.value, "80");
            assert_eq!(entry.comment.as_deref(), Some("   ; percent"));
        }
        other => panic!("expected entry, got {:?}", other),
    }
}

#[test]
fn test_semicolon_without_space_is_part_of_value() {
    match classify_in_section("Path=C:\\a;C:\\b") {
        Line::Entry(entry) => {
            assert_eq!(entry.value, "C:\\a;C:\\b");
            assert_eq!(entry.comment, None);
        }
        other => panic!("expected entry, got {:?}", other),
    }
}

#[test]
fn test_hash_in_value_is_not_a_comment() {
    match classify_in_section("Name=Mod #2") {
        Line::Entry(entry) => assert_eq!(entry.value, "Mod #2"),
        other => panic!("expected entry, got {:?}", other),
    }
}

#[test]
fn test_empty_value_with_comment() {
    match classify_in_section("Args= ; none yet") {
        Line::Entry(entry) => {
            assert_eq!(entry.value, "");
            assert_eq!(entry.comment.as_deref(), Some(" ; none yet"));
        }
        other => panic!("expected entry, got {:?}", other),
    }
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_round_trip_typical_file() {
    assert_round_trip(
        "; Managed by the launcher\n\
         [Game]\n\
         Path = C:\\Games\\Foo   ; install dir\n\
         Windowed=true\n\
         \n\
         # graphics\n\
         [Graphics]\n\
         Width   =   1920\n\
         Height=1080\n",
    );
}

#[test]
fn test_round_trip_junk_and_odd_spacing() {
    assert_round_trip("garbage before sections\n  [ S ]  \n\tk\t=\tv\t\nno equals here\n=novalue\n   \n");
}

#[test]
fn test_round_trip_without_final_newline() {
    let text = "[S]\nk=v";
    let doc = parse(text);
    assert!(!doc.has_final_newline());
    assert_eq!(serialize(&doc), text);
}

#[test]
fn test_round_trip_crlf() {
    let text = "[S]\r\nk=v\r\n\r\n; c\r\n";
    let doc = parse(text);
    assert_eq!(doc.newline(), Newline::CrLf);
    assert_eq!(doc.get("S", "k"), Some("v"));
    assert_eq!(serialize(&doc), text);
}

#[test]
fn test_round_trip_mixed_line_endings() {
    assert_round_trip("[a]\r\nk=v\nx=y\r\n");
    assert_round_trip("[a]\nk=v\r\nx=y\n");
    assert_round_trip("[a]\r\nk=v\nx=y");
    assert_round_trip("; lf\n[a]\r\nk=v\r\n\nx=y\r\n");
}

#[test]
fn test_dominant_line_ending() {
    assert_eq!(parse("[a]\nk=v\r\nx=y\r\n").newline(), Newline::CrLf);
    assert_eq!(parse("[a]\r\nk=v\nx=y\n").newline(), Newline::Lf);
    // A tie goes to the first line break
    assert_eq!(parse("[a]\r\nk=v\n").newline(), Newline::CrLf);
}

#[test]
fn test_round_trip_bom() {
    let text = "\u{feff}[S]\nk=v\n";
    let doc = parse(text);
    assert!(doc.has_bom());
    assert_eq!(doc.get("S", "k"), Some("v"));
    assert_eq!(serialize(&doc), text);
}

#[test]
fn test_round_trip_empty_and_single_newline() {
    assert_round_trip("");
    assert_round_trip("\n");
    assert_round_trip("\n\n");
    assert_eq!(parse("").line_count(), 0);
    assert_eq!(parse("\n").line_count(), 1);
}

#[test]
fn test_stray_carriage_return_in_lf_file() {
    assert_round_trip("[S]\nk=v\r\nx=y\n");
    let doc = parse("[S]\nk=v\r\nx=y\n");
    assert_eq!(doc.newline(), Newline::Lf);
    assert_eq!(doc.get("S", "k"), Some("v"));
}
