// Source URL decoding tests

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use imgpath::options::{decode_url, UrlError};

const BASE: &str = "http://base.example/";

fn encode(s: &str) -> String {
    URL_SAFE_NO_PAD.encode(s.as_bytes())
}

/// Split `s` into non-empty chunks of at most `size` bytes (base64 is ASCII)
fn chunks(s: &str, size: usize) -> Vec<String> {
    s.as_bytes()
        .chunks(size)
        .map(|c| String::from_utf8(c.to_vec()).unwrap())
        .collect()
}

#[test]
fn test_empty_segments_fail_with_empty_input() {
    let segments: Vec<&str> = vec![];
    assert_eq!(decode_url(&segments, BASE), Err(UrlError::EmptyInput));
}

#[test]
fn test_plain_mode_with_format() {
    let decoded = decode_url(&["plain", "http%3A%2F%2Fa.com%2Fx.png@png"], BASE).unwrap();
    assert_eq!(decoded.source_url, "http://base.example/http://a.com/x.png");
    assert_eq!(decoded.format, "png");
}

#[test]
fn test_lone_plain_segment_is_decoded_as_base64() {
    // Not treated as the plain marker: "plain" itself is the payload and
    // five base64 symbols never form a valid encoding
    let result = decode_url(&["plain"], BASE);
    assert!(matches!(result, Err(UrlError::InvalidEncoding { .. })));
}

#[test]
fn test_base64_round_trip_across_arbitrary_chunking() {
    // Any base64 token starting with "plain" decodes to a leading 0xA6 byte,
    // which can't start a UTF-8 string, so the plain marker never collides.
    let inputs = [
        "http://example.com/images/cat.jpg",
        "s3://bucket/path with spaces/ファイル.png",
        "local:///a/b/c.webp?x=1&y=2#frag",
        "x",
        "ümlaut/😀.gif",
    ];

    for input in inputs {
        let token = encode(input);
        for size in 1..=token.len() {
            let parts = chunks(&token, size);
            let decoded = decode_url(&parts, BASE).unwrap();
            assert_eq!(decoded.source_url, format!("{}{}", BASE, input), "chunk {}", size);
            assert_eq!(decoded.format, "");
        }
    }
}

/// Split `s` at the given chunk lengths, the remainder forming the last chunk
fn split_at_lengths(s: &str, lengths: &[usize]) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest = s;
    for &len in lengths {
        let (head, tail) = rest.split_at(len);
        parts.push(head.to_string());
        rest = tail;
    }
    if !rest.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}

#[test]
fn test_base64_round_trip_across_uneven_chunking() {
    let input = "https://images.example.com/photos/2024/beach day.jpg";
    let token = encode(input);
    let splits: [&[usize]; 5] = [&[1, 7, 2], &[3, 1, 1, 9], &[13], &[2, 2, 5, 1, 11, 4], &[1]];

    for lengths in splits {
        let parts = split_at_lengths(&token, lengths);
        assert!(parts.iter().all(|p| !p.is_empty()));
        let decoded = decode_url(&parts, BASE).unwrap();
        assert_eq!(decoded.source_url, format!("{}{}", BASE, input), "{:?}", lengths);
        assert_eq!(decoded.format, "");
    }

    // Separator and format suffix split across chunks
    let parts = split_at_lengths(&format!("{}.png", token), &[5, 1, token.len() - 6, 2]);
    let decoded = decode_url(&parts, BASE).unwrap();
    assert_eq!(decoded.source_url, format!("{}{}", BASE, input));
    assert_eq!(decoded.format, "png");
}

#[test]
fn test_base64_format_suffix_survives_chunking() {
    let token = format!("{}.avif", encode("http://example.com/cat.jpg"));
    for size in 1..=token.len() {
        let decoded = decode_url(&chunks(&token, size), "").unwrap();
        assert_eq!(decoded.source_url, "http://example.com/cat.jpg");
        assert_eq!(decoded.format, "avif");
    }
}

#[test]
fn test_base64_format_variants() {
    let b64 = encode("http://example.com/cat.jpg");

    let decoded = decode_url(&[format!("{}.fmt", b64)], "").unwrap();
    assert_eq!(decoded.format, "fmt");

    let decoded = decode_url(&[format!("{}.", b64)], "").unwrap();
    assert_eq!(decoded.format, "");

    let result = decode_url(&[format!("{}.a.b", b64)], "");
    assert!(matches!(
        result,
        Err(UrlError::MultipleFormatsSpecified { .. })
    ));
}

#[test]
fn test_base64_empty_payload() {
    assert_eq!(decode_url(&[".png"], BASE), Err(UrlError::EmptyInput));
}

#[test]
fn test_plain_mode_empty_address() {
    assert_eq!(decode_url(&["plain", "@png"], BASE), Err(UrlError::EmptyInput));
}

#[test]
fn test_plain_mode_segments_rejoined_with_slash() {
    let decoded = decode_url(&["plain", "images", "2024", "cat.jpg@webp"], "s3://bucket/").unwrap();
    assert_eq!(decoded.source_url, "s3://bucket/images/2024/cat.jpg");
    assert_eq!(decoded.format, "webp");
}

#[test]
fn test_plain_mode_empty_format_suffix() {
    let decoded = decode_url(&["plain", "cat.jpg@"], "").unwrap();
    assert_eq!(decoded.format, "");
}

#[test]
fn test_plain_mode_bad_escape() {
    let result = decode_url(&["plain", "cat%G1.jpg"], "");
    assert!(matches!(result, Err(UrlError::InvalidEncoding { .. })));
}

#[test]
fn test_internal_message_echoes_token_public_does_not() {
    let err = decode_url(&["plain", "a@b@c"], "").unwrap_err();
    assert!(err.to_string().contains("a@b@c"));
    assert!(!err.public_message().contains("a@b@c"));
}
