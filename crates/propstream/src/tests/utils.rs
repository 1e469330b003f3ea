use std::collections::HashMap;

use crate::{LineReader, ParserError, ParserOptions, load_into};

pub(crate) fn strict_options() -> ParserOptions {
    ParserOptions {
        decode_mode: crate::DecodeMode::Strict,
        ..ParserOptions::default()
    }
}

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn load(reader: LineReader<'_>) -> Result<HashMap<String, String>, ParserError> {
    init_logging();
    let mut map = HashMap::new();
    load_into(&mut map, reader, strict_options())?;
    Ok(map)
}

pub(crate) fn load_bytes(bytes: &[u8]) -> HashMap<String, String> {
    load(LineReader::from_bytes(bytes)).unwrap()
}

pub(crate) fn map<const N: usize>(pairs: [(&str, &str); N]) -> HashMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Escapes one character the way a writer must for it to survive a load.
/// Every space is escaped so that continuation trimming cannot eat it.
pub(crate) fn escape_char(ch: char, out: &mut String) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\x0c' => out.push_str("\\f"),
        '=' | ':' | '#' | '!' | ' ' => {
            out.push('\\');
            out.push(ch);
        }
        ' '..='~' => out.push(ch),
        _ => {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04X}"));
            }
        }
    }
}

/// Escaped form of `text`, one string per source character so callers can
/// insert line continuations between escapes.
pub(crate) fn escape_tokens(text: &str) -> Vec<String> {
    text.chars()
        .map(|ch| {
            let mut token = String::new();
            escape_char(ch, &mut token);
            token
        })
        .collect()
}

pub(crate) fn escape(text: &str) -> String {
    escape_tokens(text).concat()
}
