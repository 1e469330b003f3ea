use quickcheck_macros::quickcheck;

use super::utils::{escape, load_bytes};
use crate::{DecodeMode, escape::decode_units, escape::load_convert};

#[quickcheck]
fn escape_roundtrip(text: String) -> bool {
    let escaped: Vec<u16> = escape(&text).encode_utf16().collect();
    let mut decoded = Vec::new();
    load_convert(&escaped, &mut decoded).is_ok()
        && decode_units(&decoded, DecodeMode::Strict).as_deref() == Ok(text.as_str())
}

#[quickcheck]
fn escaped_pair_survives_a_load(key: String, value: String) -> bool {
    let text = format!("{}={}\n", escape(&key), escape(&value));
    let map = load_bytes(text.as_bytes());
    map.len() == 1 && map.get(&key) == Some(&value)
}
