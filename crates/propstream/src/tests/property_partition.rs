use quickcheck::{QuickCheck, TestResult};

use super::{
    arbitrary::Document,
    utils::{load, load_bytes},
};
use crate::{
    LineReader,
    chunk_utils::{ChunkedReader, ChunkedUnits},
};

fn tests() -> u64 {
    if cfg!(feature = "test-fast") {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}

/// Property: a rendered document decodes to exactly the entries it was
/// rendered from, no matter how the source splits its reads.
#[test]
fn partition_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, sizes: Vec<usize>) -> TestResult {
        let text = doc.render();
        let sizes: Vec<usize> = sizes.iter().map(|s| s % 13).collect();
        let expected = doc.expected();

        let from_bytes = load(LineReader::from_bytes(ChunkedReader::new(text.as_bytes(), &sizes)));
        let from_units = load(LineReader::from_chars(ChunkedUnits::new(&text, &sizes)));

        match (from_bytes, from_units) {
            (Ok(bytes), Ok(units)) if bytes == expected && units == expected => {
                TestResult::passed()
            }
            (bytes, units) => TestResult::error(format!(
                "text: {text:?}\nexpected: {expected:?}\nbytes: {bytes:?}\nunits: {units:?}"
            )),
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Document, Vec<usize>) -> TestResult);
}

/// Property: loading the same text twice gives the same map.
#[test]
fn loading_is_idempotent_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document) -> bool {
        let text = doc.render();
        load_bytes(text.as_bytes()) == load_bytes(text.as_bytes())
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Document) -> bool);
}

/// Property: the three line terminators are interchangeable.
#[test]
fn terminators_are_interchangeable_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document) -> bool {
        let lf = doc.render().replace("\r\n", "\n").replace('\r', "\n");
        let cr = lf.replace('\n', "\r");
        let crlf = lf.replace('\n', "\r\n");
        let expected = load_bytes(lf.as_bytes());
        load_bytes(cr.as_bytes()) == expected && load_bytes(crlf.as_bytes()) == expected
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Document) -> bool);
}
