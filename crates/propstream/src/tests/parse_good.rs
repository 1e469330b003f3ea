use rstest::rstest;

use super::utils::{load, load_bytes, map};
use crate::{
    DecodeMode, LineReader, ParserOptions, Properties, StrSource, Utf8Source, load_into,
    parse_str_to_map,
};

#[test]
fn end_to_end_example() {
    let got = load_bytes(b"# comment\nkey1 = value1\nkey2:value2\\\n  continued\n");
    assert_eq!(got, map([("key1", "value1"), ("key2", "value2continued")]));
}

#[rstest]
#[case::equals("a=b", "b")]
#[case::colon("a:b", "b")]
#[case::space("a b", "b")]
#[case::spaced_equals("a = b", "b")]
#[case::colon_two_spaces("a:  b", "b")]
#[case::no_value("a", "")]
fn separator_resolution(#[case] line: &str, #[case] value: &str) {
    assert_eq!(load_bytes(line.as_bytes()), map([("a", value)]));
}

#[rstest]
#[case::hash("# just a comment\n")]
#[case::bang("! just a comment\n")]
#[case::indented("    # indented comment")]
#[case::blank("\n\r\n\r   \t\n")]
#[case::empty("")]
fn no_entries(#[case] text: &str) {
    assert!(load_bytes(text.as_bytes()).is_empty());
}

#[test]
fn values_keep_inner_and_trailing_whitespace() {
    assert_eq!(load_bytes(b"k =  a  b  "), map([("k", "a  b  ")]));
}

#[test]
fn escapes_in_keys_and_values() {
    let text = br"key\ with\ spaces = tab\there
colon\:key = a\:b
equals\=key = \u0041\u00DF
hash\#key = \#not a comment
path = C:\\temp\\new
";
    assert_eq!(
        load_bytes(text),
        map([
            ("key with spaces", "tab\there"),
            ("colon:key", "a:b"),
            ("equals=key", "A\u{00DF}"),
            ("hash#key", "#not a comment"),
            ("path", "C:\\temp\\new"),
        ])
    );
}

#[test]
fn bytes_are_decoded_as_latin1() {
    // 0xE9 is 'é' in ISO-8859-1 and invalid on its own in UTF-8.
    assert_eq!(load_bytes(b"caf\xE9=\xFCber"), map([("café", "über")]));
}

#[test]
fn utf8_bytes_through_byte_source_are_not_decoded() {
    // UTF-8 "é" is C3 A9, which Latin-1 reads as "Ã©".
    assert_eq!(load_bytes("é=1".as_bytes()), map([("Ã©", "1")]));
}

#[test]
fn utf8_source_decodes_multibyte_text() {
    let got = load(LineReader::from_chars(Utf8Source::new("clé = 😀".as_bytes()))).unwrap();
    assert_eq!(got, map([("clé", "😀")]));
}

#[test]
fn char_source_matches_byte_source_for_ascii() {
    let text = "a=1\r\nb : 2\\\r\n   3\n! c\nd";
    let from_chars = load(LineReader::from_chars(StrSource::new(text))).unwrap();
    assert_eq!(from_chars, load_bytes(text.as_bytes()));
    assert_eq!(from_chars, map([("a", "1"), ("b", "23"), ("d", "")]));
}

#[test]
fn continuation_with_even_backslashes() {
    assert_eq!(
        load_bytes(b"a=x\\\\\nb=y\\\\\\\n  z\n"),
        map([("a", "x\\"), ("b", "y\\z")])
    );
}

#[test]
fn trailing_backslash_on_last_line() {
    assert_eq!(load_bytes(b"a=b\\"), map([("a", "b")]));
    assert_eq!(load_bytes(b"a=b\\\n"), map([("a", "b")]));
}

#[test]
fn lone_backslash_line_is_skipped() {
    assert_eq!(load_bytes(b"\\\n   \na=1"), map([("a", "1")]));
}

#[test]
fn nul_truncates_value() {
    assert_eq!(load_bytes(b"k=ab\0cd\nn=\\u0000x"), map([("k", "ab"), ("n", "\0x")]));
}

#[test]
fn later_duplicates_win() {
    assert_eq!(load_bytes(b"k=1\nk=2\nk:3"), map([("k", "3")]));
}

#[test]
fn lines_longer_than_the_initial_buffer() {
    let value = "v".repeat(10_000);
    let text = format!("long = {value}\nshort = s\n");
    assert_eq!(
        load_bytes(text.as_bytes()),
        map([("long", value.as_str()), ("short", "s")])
    );
}

#[test]
fn input_larger_than_one_chunk() {
    let text: String = (0..2_000).map(|i| format!("key{i} = value{i}\n")).collect();
    let got = load_bytes(text.as_bytes());
    assert_eq!(got.len(), 2_000);
    assert_eq!(got["key1999"], "value1999");
}

#[test]
fn lone_surrogate_is_replaced_by_default() {
    let mut sink = std::collections::BTreeMap::new();
    load_into(
        &mut sink,
        LineReader::from_bytes(&b"k=\\uD800x"[..]),
        ParserOptions {
            decode_mode: DecodeMode::ReplaceInvalid,
            ..ParserOptions::default()
        },
    )
    .unwrap();
    assert_eq!(sink["k"], "\u{FFFD}x");
}

#[test]
fn properties_and_map_agree() {
    let text = "a=1\nb=2\n";
    let mut props = Properties::new();
    assert_eq!(props.load_str(text).unwrap(), 2);
    assert_eq!(props.into_map(), parse_str_to_map(text).unwrap());
}
