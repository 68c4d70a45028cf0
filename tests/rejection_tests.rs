//! Malformed, truncated and unsupported buffers must fail cleanly.

use tserialized::codec::{BASE_TYPE_OFFSET, HEADER_SIZE, SUBTYPE_OFFSET};
use tserialized::geo::make_point;
use tserialized::prelude::*;

fn corpus() -> Vec<Temporal> {
    let point = |x: f64| make_point(PointCoords::xy(x, 1.0), false, 0);
    vec![
        TInstant::new(true, 1).into(),
        TInstant::new(42, 1).into(),
        TInstant::new(2.5, 1).into(),
        TInstant::new(Text::new("hello").unwrap(), 1).into(),
        TInstant::geom_point(PointCoords::xyz(1.0, 2.0, 3.0), 0, 1).into(),
        TInstant::geog_point(PointCoords::xy(4.0, 50.0), 4326, 1).into(),
        TSequence::make(
            vec![TInstant::new(1, 10), TInstant::new(2, 20)],
            true,
            true,
            Interpolation::Step,
        )
        .unwrap()
        .into(),
        TSequence::make(
            vec![
                TInstant::new(Text::new("ab").unwrap(), 10),
                TInstant::new(Text::new("cde").unwrap(), 20),
            ],
            true,
            true,
            Interpolation::Step,
        )
        .unwrap()
        .into(),
        TSequence::make(
            vec![
                TInstant::new(Value::GeomPoint(point(0.0)), 10),
                TInstant::new(Value::GeomPoint(point(1.0)), 20),
            ],
            true,
            true,
            Interpolation::Linear,
        )
        .unwrap()
        .into(),
    ]
}

fn patch_length(buf: &mut [u8]) {
    let len = buf.len() as u32;
    buf[..4].copy_from_slice(&len.to_ne_bytes());
}

#[test]
fn test_truncated_by_one_byte() {
    for temp in corpus() {
        let bytes = encode(&temp).expect("encode").into_bytes();
        let short = &bytes[..bytes.len() - 1];

        // Declared length no longer matches
        let err = decode(short).expect_err("truncated buffer must not decode");
        assert!(matches!(err, Error::LengthMismatch { .. }), "{:?}", err);

        // Length word patched to match: the body itself runs short
        let mut patched = short.to_vec();
        patch_length(&mut patched);
        let err = decode(&patched).expect_err("short body must not decode");
        assert!(err.is_framing(), "{:?} for {}", err, temp.base_type());
    }
}

#[test]
fn test_every_prefix_rejected() {
    for temp in corpus() {
        let bytes = encode(&temp).unwrap().into_bytes();
        for len in 0..bytes.len() {
            assert!(decode(&bytes[..len]).is_err(), "prefix {} of {} decoded", len, bytes.len());
        }
    }
}

#[test]
fn test_declared_length_larger_than_buffer() {
    let mut bytes = encode(&TInstant::new(7, 1).into()).unwrap().into_bytes();
    let declared = bytes.len() as u32 + 8;
    bytes[..4].copy_from_slice(&declared.to_ne_bytes());
    assert!(matches!(
        decode(&bytes),
        Err(Error::LengthMismatch { declared: d, actual: a }) if d == a + 8
    ));
}

#[test]
fn test_storage_longer_than_declared_length() {
    // Extra physical bytes past an untouched length word are never read
    for temp in corpus() {
        let bytes = encode(&temp).unwrap().into_bytes();
        let n = bytes.len();
        let mut padded = bytes;
        padded.extend_from_slice(&[0u8; 4]);

        assert!(
            matches!(
                decode(&padded),
                Err(Error::LengthMismatch { declared, actual }) if declared == n && actual == n + 4
            ),
            "padded buffer accepted for {}",
            temp.base_type()
        );
        assert!(matches!(sample_count(&padded), Err(Error::LengthMismatch { .. })));
        assert!(TSerialized::from_bytes(padded.clone()).is_err());

        // The stored length still names the real record
        assert_eq!(physical_size(&padded).unwrap(), n);
        assert_eq!(decode(&padded[..n]).unwrap(), temp);
    }
}

#[test]
fn test_trailing_bytes_rejected() {
    for temp in corpus() {
        let mut bytes = encode(&temp).unwrap().into_bytes();
        bytes.extend_from_slice(&[0u8; 4]);
        patch_length(&mut bytes);
        assert!(
            matches!(decode(&bytes), Err(Error::TrailingBytes { count: 4 })),
            "trailing bytes accepted for {}",
            temp.base_type()
        );
    }
}

#[test]
fn test_empty_and_tiny_buffers() {
    assert!(matches!(decode(&[]), Err(Error::TruncatedBuffer { .. })));
    assert!(matches!(physical_size(&[1, 2]), Err(Error::TruncatedBuffer { .. })));

    // A length word that covers only itself
    let tiny = 4u32.to_ne_bytes();
    assert!(matches!(decode(&tiny), Err(Error::TruncatedBuffer { .. })));
}

#[test]
fn test_unknown_tags() {
    let bytes = encode(&TInstant::new(1.0, 1).into()).unwrap().into_bytes();

    let mut bad_base = bytes.clone();
    bad_base[BASE_TYPE_OFFSET] = 0x7f;
    assert!(matches!(decode(&bad_base), Err(Error::UnsupportedBaseType(0x7f))));

    let mut bad_shape = bytes;
    bad_shape[SUBTYPE_OFFSET] = 9;
    assert!(matches!(decode(&bad_shape), Err(Error::UnsupportedShape(9))));
}

#[test]
fn test_nonpositive_sequence_count() {
    let temp: Temporal = TSequence::make(
        vec![TInstant::new(1, 10), TInstant::new(2, 20)],
        true,
        true,
        Interpolation::Step,
    )
    .unwrap()
    .into();
    let bytes = encode(&temp).unwrap().into_bytes();

    for count in [0i32, -1, i32::MIN] {
        let mut patched = bytes.clone();
        patched[HEADER_SIZE..HEADER_SIZE + 4].copy_from_slice(&count.to_ne_bytes());
        assert!(matches!(decode(&patched), Err(Error::MalformedValue(_))));
        assert!(matches!(sample_count(&patched), Err(Error::MalformedValue(_))));
    }
}

#[test]
fn test_inflated_sequence_count() {
    let temp: Temporal = TSequence::make(
        vec![TInstant::new(1, 10), TInstant::new(2, 20)],
        true,
        true,
        Interpolation::Step,
    )
    .unwrap()
    .into();
    let mut bytes = encode(&temp).unwrap().into_bytes();
    bytes[HEADER_SIZE..HEADER_SIZE + 4].copy_from_slice(&i32::MAX.to_ne_bytes());
    let err = decode(&bytes).expect_err("count past the buffer");
    assert!(err.is_framing(), "{:?}", err);
}

#[test]
fn test_sequence_set_unsupported() {
    let seq = |t0: i64| {
        TSequence::make(
            vec![TInstant::new(1.0, t0), TInstant::new(2.0, t0 + 10)],
            true,
            true,
            Interpolation::Linear,
        )
        .unwrap()
    };
    let set = TSequenceSet::make(vec![seq(0), seq(100)]).expect("disjoint sequences");
    let temp: Temporal = set.into();
    assert_eq!(temp.num_instants(), 4);
    assert!(matches!(encode(&temp), Err(Error::UnsupportedShape(3))));

    // A buffer tagged as a sequence set is rejected before its body is read
    let mut bytes = encode(&TInstant::new(1.0, 1).into()).unwrap().into_bytes();
    bytes[SUBTYPE_OFFSET] = Subtype::SequenceSet.tag();
    assert!(matches!(decode(&bytes), Err(Error::UnsupportedShape(3))));
    assert!(matches!(sample_count(&bytes), Err(Error::UnsupportedShape(3))));
}

#[test]
fn test_invalid_sequences_not_constructed() {
    assert!(matches!(
        TSequence::make(Vec::new(), true, true, Interpolation::Step),
        Err(Error::InvalidTemporal(_))
    ));
    assert!(matches!(
        TSequence::make(
            vec![TInstant::new(1, 20), TInstant::new(2, 10)],
            true,
            true,
            Interpolation::Step
        ),
        Err(Error::InvalidTemporal(_))
    ));
    assert!(matches!(
        TSequence::make(
            vec![TInstant::new(1, 10), TInstant::new(2, 20)],
            true,
            true,
            Interpolation::Linear
        ),
        Err(Error::InvalidTemporal(_))
    ));
}
