#![no_main]
use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use propstream::{
    DecodeMode, LineReader, ParserOptions, Utf8Source, chunk_utils::ChunkedReader, load_into,
};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    strict: bool,
    // read sizes for the chunked replay; zeros are bumped to one
    sizes: Vec<u8>,
    data: &'a [u8],
}

fn load(reader: LineReader<'_>, options: ParserOptions) -> Option<HashMap<String, String>> {
    let mut map = HashMap::new();
    load_into(&mut map, reader, options).ok()?;
    Some(map)
}

fn parser(input: &Input<'_>) {
    let options = ParserOptions {
        decode_mode: if input.strict {
            DecodeMode::Strict
        } else {
            DecodeMode::ReplaceInvalid
        },
        panic_on_error: false,
    };
    let sizes: Vec<usize> = input.sizes.iter().map(|&s| usize::from(s)).collect();

    // Splitting the reads must never change what gets decoded.
    let whole = load(LineReader::from_bytes(input.data), options);
    let chunked = load(
        LineReader::from_bytes(ChunkedReader::new(input.data, &sizes)),
        options,
    );
    assert_eq!(whole, chunked);

    let _ = load(LineReader::from_chars(Utf8Source::new(input.data)), options);
}

fuzz_target!(|input: Input<'_>| parser(&input));
