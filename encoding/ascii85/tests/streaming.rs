use proptest::prelude::*;
use stream_ascii85::{decode, encode, encode_with_envelope, Context, Error};

/// Splits `data` into consecutive chunks whose lengths cycle through `sizes`.
fn split<'a>(data: &'a [u8], sizes: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    for &size in sizes.iter().cycle() {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(size.min(rest.len()));
        chunks.push(head);
        rest = tail;
    }
    chunks
}

fn encode_in_chunks(chunks: &[&[u8]]) -> Vec<u8> {
    let mut ctx = Context::new().unwrap();
    let mut out = Vec::new();
    for chunk in chunks {
        ctx.encode_feed(chunk).unwrap();
        out.extend_from_slice(ctx.output());
        ctx.clear_output();
    }
    ctx.encode_finish().unwrap();
    out.extend_from_slice(ctx.output());
    out
}

fn decode_in_chunks(chunks: &[&[u8]]) -> (Result<Vec<u8>, Error>, usize) {
    let mut ctx = Context::new().unwrap();
    let mut out = Vec::new();
    for chunk in chunks {
        if let Err(error) = ctx.decode_feed(chunk) {
            return (Err(error), ctx.bytes_processed());
        }
        out.extend_from_slice(ctx.output());
        ctx.clear_output();
    }
    let result = ctx.decode_finish().map(|()| {
        out.extend_from_slice(ctx.output());
        out
    });
    (result, ctx.bytes_processed())
}

#[test]
fn all_byte_values_round_trip() {
    let data: Vec<u8> = (0..=u8::MAX).rev().chain(0..=u8::MAX).collect();
    for len in 0..data.len() {
        let encoded = encode(&data[..len]).unwrap();
        assert_eq!(decode(&encoded).unwrap(), &data[..len], "length {}", len);
    }
}

#[test]
fn multi_megabyte_round_trip() {
    let data: Vec<u8> = (0..3 * 1024 * 1024 + 3).map(|i: u32| (i.wrapping_mul(2_654_435_761) >> 13) as u8).collect();
    let encoded = encode_in_chunks(&split(&data, &[1024]));
    assert_eq!(encoded, encode(&data).unwrap());

    let (decoded, processed) = decode_in_chunks(&split(&encoded, &[1000]));
    assert_eq!(decoded.unwrap(), data);
    assert_eq!(processed, encoded.len());
}

#[test]
fn empty_feeds_are_harmless() {
    let mut ctx = Context::new().unwrap();
    ctx.decode_feed(b"").unwrap();
    ctx.decode_feed(b"<~B").unwrap();
    ctx.decode_feed(b"").unwrap();
    ctx.decode_feed(b"E~>").unwrap();
    ctx.decode_finish().unwrap();
    assert_eq!(ctx.output(), b"h");
}

#[test]
fn bounded_capacity_with_draining() {
    let data: Vec<u8> = (1..=200u8).cycle().take(1000 * 50).collect();
    let encoded = encode(&data).unwrap();

    let mut ctx = Context::new().unwrap();
    let mut decoded = Vec::new();
    for chunk in encoded.chunks(1000) {
        ctx.decode_feed(chunk).unwrap();
        decoded.extend_from_slice(ctx.output());
        ctx.clear_output();
    }
    ctx.decode_finish().unwrap();
    decoded.extend_from_slice(ctx.output());

    assert_eq!(decoded, data);
    assert!(ctx.output_capacity() <= 2 * 1000, "capacity {}", ctx.output_capacity());
}

proptest! {
    #[test]
    fn round_trip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let encoded = encode(&data).unwrap();
        prop_assert_eq!(decode(&encoded).unwrap(), data.clone());

        let enveloped = encode_with_envelope(&data).unwrap();
        prop_assert_eq!(decode(&enveloped).unwrap(), data);
    }

    #[test]
    fn zero_runs_use_shorthand(groups in 1usize..64) {
        let encoded = encode(&vec![0u8; groups * 4]).unwrap();
        prop_assert_eq!(encoded, vec![b'z'; groups]);
    }

    #[test]
    fn chunked_encode_matches_one_shot(
        data in prop::collection::vec(any::<u8>(), 0..1024),
        sizes in prop::collection::vec(1usize..17, 1..8),
    ) {
        let chunks = split(&data, &sizes);
        prop_assert_eq!(encode_in_chunks(&chunks), encode(&data).unwrap());
    }

    #[test]
    fn chunked_decode_matches_one_shot(
        data in prop::collection::vec(any::<u8>(), 0..1024),
        sizes in prop::collection::vec(1usize..17, 1..8),
    ) {
        let encoded = encode_with_envelope(&data).unwrap();
        let (decoded, processed) = decode_in_chunks(&split(&encoded, &sizes));
        prop_assert_eq!(decoded.unwrap(), data);
        prop_assert_eq!(processed, encoded.len());
    }

    #[test]
    fn chunked_errors_match_one_shot(
        input in prop::collection::vec(prop::sample::select(b"!9<~>zus{ \n".to_vec()), 0..48),
        sizes in prop::collection::vec(1usize..7, 1..8),
    ) {
        let whole = decode_in_chunks(&[&input[..]]);
        let chunked = decode_in_chunks(&split(&input, &sizes));
        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn whitespace_is_transparent(
        data in prop::collection::vec(any::<u8>(), 0..256),
        gaps in prop::collection::vec((any::<prop::sample::Index>(), prop::sample::select(vec![" ", "\t", "\r\n", "  \n "])), 0..32),
    ) {
        let encoded = encode(&data).unwrap();
        let mut spaced = encoded;
        for (at, ws) in gaps {
            let at = at.index(spaced.len() + 1);
            for (i, b) in ws.bytes().enumerate() {
                spaced.insert(at + i, b);
            }
        }
        prop_assert_eq!(decode(&spaced).unwrap(), data);
    }
}
