//! Behaviour shared with the widely deployed bencode libraries: null handling,
//! buffer offsets, length calculation and real-world BitTorrent payloads.

use std::{borrow::Cow, thread};

use bencodec::{
    Decoder, Encoder, Object, TextEncoding, Value, decode, decode_text,
    decoding::Error as DecodingError, encode, encode_into, encoding_length,
};

const SAMPLE: &[u8] = b"d7:integeri12345e6:string11:Hello Worlde";
const PAD: &[u8] = b"_______________________________";

fn sample() -> Value<'static> {
    Value::dict().with("string", "Hello World").with("integer", 12345)
}

fn bytes(hex: &str) -> Vec<u8> {
    hex::decode(hex).unwrap()
}

/// Prefix `body` with its bencode length
fn string(body: &[u8]) -> Vec<u8> {
    let mut out = format!("{}:", body.len()).into_bytes();
    out.extend_from_slice(body);
    out
}

// -----------------------------------------------------------------------------
// Null values
// -----------------------------------------------------------------------------

#[test]
fn null_encodes_to_nothing() {
    assert_eq!(encode(&Value::Null), b"");
    assert_eq!(encode(&Value::from(None::<&str>)), b"");
}

#[test]
fn empty_input_decodes_to_none() {
    assert_eq!(decode(b""), Ok(None));
    assert_eq!(decode_text("", TextEncoding::Utf8), Ok(None));
    assert_eq!(Decoder::new(SAMPLE).with_start(5).with_end(5).decode(), Ok(None));
}

#[test]
fn null_values_are_omitted() {
    let data = Value::List(vec![
        Value::dict().with("empty", Value::Null),
        Value::dict().with("notset", None::<i32>),
        Value::Null,
        Value::Null,
        Value::from(0),
    ]);

    let encoded = encode(&data);
    assert_eq!(encoded, b"ldedei0ee");

    let expected = Object::List(vec![
        Object::Dict(Default::default()),
        Object::Dict(Default::default()),
        Object::Integer(0),
    ]);
    assert_eq!(decode(&encoded), Ok(Some(expected)));
}

// -----------------------------------------------------------------------------
// Buffers and offsets
// -----------------------------------------------------------------------------

#[test]
fn encoding_length_of_sample() {
    assert_eq!(encoding_length(&sample()), SAMPLE.len());
    assert_eq!(encode(&sample()).len(), SAMPLE.len());
}

#[test]
fn encode_into_existing_buffer() {
    let mut target = vec![0; SAMPLE.len()];
    encode_into(&sample(), &mut target, 0).unwrap();
    assert_eq!(target, SAMPLE);
}

#[test]
fn encode_into_buffer_with_offset() {
    let mut target = vec![0; 64 + SAMPLE.len()];
    let offset = 48;
    let written = encode_into(&sample(), &mut target, offset).unwrap();
    assert_eq!(&target[offset..offset + written], SAMPLE);
}

#[test]
fn decode_reports_consumed_bytes() {
    let (_, consumed) = Decoder::new(SAMPLE).decode_prefix().unwrap();
    assert_eq!(consumed, SAMPLE.len());

    let mut input = SAMPLE.to_vec();
    input.extend_from_slice(b"i1e");
    let (_, consumed) = Decoder::new(&input).decode_prefix().unwrap();
    assert_eq!(consumed, SAMPLE.len());
}

#[test]
fn decode_from_an_offset() {
    let mut input = PAD.to_vec();
    input.extend_from_slice(SAMPLE);

    let object = Decoder::new(&input)
        .with_start(PAD.len())
        .with_text_encoding(TextEncoding::Utf8)
        .decode()
        .unwrap()
        .unwrap();

    assert_eq!(Value::from(object), sample());
}

#[test]
fn decode_between_an_offset_and_end() {
    let mut input = PAD.to_vec();
    input.extend_from_slice(SAMPLE);
    input.extend_from_slice(PAD);

    let object = Decoder::new(&input)
        .with_start(PAD.len())
        .with_end(PAD.len() + SAMPLE.len())
        .with_text_encoding(TextEncoding::Utf8)
        .decode()
        .unwrap()
        .unwrap();

    assert_eq!(Value::from(object), sample());
}

#[test]
fn errors_carry_buffer_offsets() {
    let mut input = PAD.to_vec();
    input.extend_from_slice(b"i1x2e");

    let err = Decoder::new(&input).with_start(PAD.len()).decode().unwrap_err();
    assert_eq!(
        err,
        DecodingError::InvalidInteger {
            byte: b'x',
            offset: PAD.len() + 2,
        }
    );
    assert_eq!(err.offset(), Some(PAD.len() + 2));
}

// -----------------------------------------------------------------------------
// Encoding length
// -----------------------------------------------------------------------------

#[test]
fn encoding_length_matches_known_encodings() {
    let cases = [
        (Value::dict(), 2),
        (
            Value::dict()
                .with("a", 1)
                .with("b", "str")
                .with("c", Value::dict().with("de", "f")),
            28,
        ),
        (Value::List(Vec::new()), 2),
        (Value::from(vec![1, 2, 3]), 11),
        (
            Value::List(vec![
                Value::from(1),
                Value::from("string"),
                Value::List(vec![Value::dict().with("a", 1).with("b", 2)]),
            ]),
            29,
        ),
        (Value::Float(-0.0), 3),
        (Value::from(-1), 4),
        (Value::Float(100.25), 5),
        (Value::Float(2f64.powi(128)), 41),
        (Value::Null, 0),
    ];

    for (value, expected) in &cases {
        assert_eq!(encoding_length(value), *expected, "{value:?}");
        assert_eq!(encode(value).len(), *expected, "{value:?}");
    }
}

// -----------------------------------------------------------------------------
// Real-world payloads
// -----------------------------------------------------------------------------

const PEERS: &str = "2ebd1b641a1f51d54c0546cc342190401a1f626ee9c6c8d5cb0d92131a1fac4e689a3c6b180f3d5746db";

/// Tracker announce response with compact peers (BEP-23)
fn announce() -> Vec<u8> {
    let mut announce =
        b"d8:completei4e10:incompletei3e8:intervali1800e12:min intervali1800e5:peers".to_vec();
    announce.extend_from_slice(&string(&bytes(PEERS)));
    announce.push(b'e');
    announce
}

#[test]
fn compact_peer_announce() {
    let announce = announce();
    let object = decode(&announce).unwrap().unwrap();

    assert_eq!(object.get("complete"), Some(&Object::Integer(4)));
    assert_eq!(object.get("incomplete"), Some(&Object::Integer(3)));
    assert_eq!(object.get("interval"), Some(&Object::Integer(1800)));
    assert_eq!(object.get("min interval"), Some(&Object::Integer(1800)));
    assert_eq!(
        object.get("peers").and_then(Object::as_bytes),
        Some(bytes(PEERS).as_slice())
    );

    assert_eq!(encode(&Value::from(object)), announce);
}

#[test]
fn compact_peer_announce_as_text() {
    let announce = announce();
    let object = Decoder::new(&announce)
        .with_text_encoding(TextEncoding::Utf8)
        .decode()
        .unwrap()
        .unwrap();

    assert_eq!(object.get("interval"), Some(&Object::Integer(1800)));
    match object.get("peers") {
        Some(Object::Text(peers)) => {
            assert!(peers.starts_with('.'));
            assert!(peers.contains('\u{fffd}'));
        },
        other => panic!("expected lossy text, got {other:?}"),
    }
}

/// Single-file torrent with binary piece hashes, in canonical form
fn torrent() -> Vec<u8> {
    let pieces: Vec<u8> = (0..40u8).map(|i| i.wrapping_mul(97).wrapping_add(200)).collect();

    let mut torrent = b"d8:announce".to_vec();
    torrent.extend_from_slice(&string(b"udp://tracker.example.org:1337/announce"));
    torrent.extend_from_slice(b"4:infod6:lengthi1048576e4:name");
    torrent.extend_from_slice(&string(b"file.bin"));
    torrent.extend_from_slice(b"12:piece lengthi262144e6:pieces");
    torrent.extend_from_slice(&string(&pieces));
    torrent.extend_from_slice(b"ee");
    torrent
}

#[test]
fn torrent_round_trips() {
    let torrent = torrent();
    let value = Value::from(decode(&torrent).unwrap().unwrap());

    assert_eq!(encoding_length(&value), torrent.len());
    assert_eq!(encode(&value), torrent);
    assert_eq!(Encoder::strict().encode(&value), Ok(torrent.clone()));
}

#[test]
fn decoded_dictionaries_keep_wire_order() {
    let object = decode_text("d1:b1:x1:a1:ye", TextEncoding::Utf8).unwrap().unwrap();
    let keys: Vec<_> = object.as_dict().unwrap().keys().map(|key| &**key).collect();
    assert_eq!(keys, ["b", "a"]);

    // Re-encoding restores canonical order
    assert_eq!(encode(&Value::from(object)), b"d1:a1:y1:b1:xe");
}

#[test]
fn binary_keys_are_rendered_as_hex() {
    let object = decode(b"d2:\xff\xfei1e3:fooi2ee").unwrap().unwrap();
    assert_eq!(object.get("fffe"), Some(&Object::Integer(1)));
    assert_eq!(object.get("foo"), Some(&Object::Integer(2)));
}

#[test]
fn replacement_character_keys_re_encode_as_hex() {
    let value = Value::dict().with("\u{FFFD}", 1).with("b", 2);
    let encoded = encode(&value);
    assert_eq!(encoded, "d1:bi2e3:\u{FFFD}i1ee".as_bytes());

    // A decoded U+FFFD cannot be told apart from a replaced invalid sequence
    let object = decode(&encoded).unwrap().unwrap();
    assert_eq!(object.get("efbfbd"), Some(&Object::Integer(1)));
    assert_eq!(encode(&Value::from(object)), b"d1:bi2e6:efbfbdi1ee");
}

#[test]
fn owned_trees_outlive_their_input() {
    let owned = {
        let input = torrent();
        decode(&input).unwrap().unwrap().into_owned()
    };
    let name = owned.get("info").and_then(|info| info.get("name"));
    assert_eq!(name.and_then(Object::as_str), Some("file.bin"));
}

// -----------------------------------------------------------------------------
// Concurrency
// -----------------------------------------------------------------------------

#[test]
fn codec_is_shareable_across_threads() {
    let torrent = torrent();
    let decoder = Decoder::new(&torrent);
    let encoder = Encoder::strict();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    let value = Value::from(decoder.decode().unwrap().unwrap());
                    encoder.encode(&value).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), torrent);
        }
    });
}

#[test]
fn borrowed_and_owned_values_encode_alike() {
    let borrowed = Value::Bytes(Cow::Borrowed(&b"spam"[..]));
    let owned = Value::Bytes(Cow::Owned(b"spam".to_vec()));
    assert_eq!(encode(&borrowed), encode(&owned));
}
