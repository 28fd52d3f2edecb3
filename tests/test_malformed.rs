use std::io::Cursor;

use huffman_canon::header::{header_len, read_header};
use huffman_canon::{HuffmanCodec, HuffmanError};

fn decode_err(bytes: &[u8]) -> HuffmanError {
    HuffmanCodec::decompress_bytes(bytes).unwrap_err()
}

#[test]
fn empty_stream_is_malformed() {
    assert!(matches!(decode_err(&[]), HuffmanError::MalformedHeader(_)));
    assert!(matches!(decode_err(&[1]), HuffmanError::MalformedHeader(_)));
}

#[test]
fn missing_meaningful_byte() {
    assert!(matches!(
        decode_err(&[1, 0, b'a', 1, b'0']),
        HuffmanError::MalformedHeader(_)
    ));
}

#[test]
fn every_truncated_header_fails() {
    let compressed = HuffmanCodec::compress_bytes(b"a header worth cutting short").unwrap();
    let header = read_header(&mut Cursor::new(&compressed)).unwrap();
    for cut in 0..header_len(&header.table) as usize {
        let result = HuffmanCodec::decompress_bytes(&compressed[..cut]);
        assert!(result.is_err(), "cut at {cut} decoded");
    }
}

#[test]
fn overlapping_codes_are_ambiguous() {
    // a=0, b=01: a is a prefix of b
    let bytes = [2, 0, b'a', 1, b'0', b'b', 2, b'0', b'1', 8];
    assert!(matches!(
        decode_err(&bytes),
        HuffmanError::AmbiguousCodeSet { symbol: b'b', other: b'a' }
    ));
}

#[test]
fn trailing_partial_code() {
    let mut compressed = HuffmanCodec::compress_bytes(b"AAAABBBCCD").unwrap();
    // the last payload byte carries D's 3-bit code; keep only its first bit
    let meaningful = compressed.len() - 4;
    assert_eq!(compressed[meaningful], 3);
    compressed[meaningful] = 1;
    assert!(matches!(
        decode_err(&compressed),
        HuffmanError::TruncatedPayload { .. }
    ));
}

#[test]
fn error_messages_name_the_problem() {
    let err = decode_err(&[0, 0, 0]);
    assert_eq!(
        err.to_string(),
        "malformed header: meaningful bit count 0 outside 1..=8"
    );
}
