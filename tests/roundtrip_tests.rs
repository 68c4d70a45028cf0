//! Round-trip tests: every base type through instant and sequence shapes.

use tserialized::codec::{sequence_values_offset, HEADER_SIZE};
use tserialized::geo::make_point;
use tserialized::prelude::*;

fn sample_values(base: BaseType, i: usize) -> Value {
    let f = i as f64;
    match base {
        BaseType::Bool => Value::Bool(i % 2 == 0),
        BaseType::Int => Value::Int(i as i32 * 7 - 3),
        BaseType::Float => Value::Float(f * 0.25 - 1.0e10),
        BaseType::Text => Value::Text(Text::new(&"x".repeat(i + 1)).unwrap()),
        BaseType::GeomPoint => Value::GeomPoint(make_point(PointCoords::xy(f, -f), false, 0)),
        BaseType::GeogPoint => Value::GeogPoint(make_point(PointCoords::xyz(f, 45.0, 10.0), true, 4326)),
    }
}

fn interp_for(base: BaseType) -> Interpolation {
    if base.is_continuous() {
        Interpolation::Linear
    } else {
        Interpolation::Step
    }
}

#[test]
fn test_roundtrip_instants_all_types() {
    for base in BaseType::ALL {
        let temp: Temporal = TInstant::new(sample_values(base, 3), 1_700_000_000_000_000).into();
        let ts = encode(&temp).expect("encode");
        assert_eq!(ts.base_type(), base);
        assert_eq!(ts.subtype(), Subtype::Instant);
        assert_eq!(physical_size(ts.as_bytes()).unwrap(), ts.as_bytes().len());

        let back = decode(ts.as_bytes()).expect("decode");
        assert_eq!(back, temp, "instant roundtrip for {}", base);
        assert_eq!(back.flags(), temp.flags());
    }
}

#[test]
fn test_roundtrip_sequences_all_types() {
    for base in BaseType::ALL {
        let instants: Vec<TInstant> = (0..6)
            .map(|i| TInstant::new(sample_values(base, i), 1_000 * i as i64))
            .collect();
        let seq = TSequence::make(instants, true, true, interp_for(base)).expect("valid sequence");
        let temp: Temporal = seq.into();

        let ts = encode(&temp).expect("encode");
        assert_eq!(ts.sample_count().unwrap(), 6);
        assert_eq!(ts.physical_size(), ts.as_bytes().len());

        let back = decode(ts.as_bytes()).expect("decode");
        assert_eq!(back, temp, "sequence roundtrip for {}", base);
        assert_eq!(back.flags().interpolation(), interp_for(base));
    }
}

#[test]
fn test_float_bits_exact() {
    let specials = [0.0, -0.0, f64::MIN_POSITIVE, f64::MAX, f64::INFINITY, 1.0 / 3.0];
    let instants: Vec<TInstant> = specials
        .iter()
        .enumerate()
        .map(|(i, v)| TInstant::new(*v, i as i64))
        .collect();
    let temp: Temporal = TSequence::make(instants, true, true, Interpolation::Step).unwrap().into();
    let back = decode(encode(&temp).unwrap().as_bytes()).unwrap();

    for (i, expected) in specials.iter().enumerate() {
        let Value::Float(v) = back.instant_n(i).unwrap().value() else {
            panic!("expected float");
        };
        assert_eq!(v.to_bits(), expected.to_bits());
    }
}

#[test]
fn test_nan_survives() {
    let temp: Temporal = TInstant::new(f64::NAN, 0).into();
    let back = decode(encode(&temp).unwrap().as_bytes()).unwrap();
    let Value::Float(v) = back.instant_n(0).unwrap().value() else {
        panic!("expected float");
    };
    assert_eq!(v.to_bits(), f64::NAN.to_bits());
}

#[test]
fn test_float_instant_layout() {
    let temp: Temporal = TInstant::new(3.5, 1_000_000).into();
    let ts = encode(&temp).unwrap();
    let bytes = ts.as_bytes();

    assert_eq!(bytes.len(), HEADER_SIZE + 16);
    assert_eq!(ts.envelope().size, HEADER_SIZE + 16);
    assert_eq!(ts.base_type(), BaseType::Float);
    assert_eq!(ts.subtype(), Subtype::Instant);
    assert_eq!(ts.flags().bits(), 0);
    assert_eq!(&bytes[HEADER_SIZE..HEADER_SIZE + 8], &1_000_000i64.to_ne_bytes());
    assert_eq!(&bytes[HEADER_SIZE + 8..], &3.5f64.to_ne_bytes());

    let Temporal::Instant(inst) = decode(bytes).unwrap() else {
        panic!("expected an instant");
    };
    assert_eq!(inst.t(), 1_000_000);
    assert_eq!(inst.value(), &Value::Float(3.5));
}

#[test]
fn test_values_block_offset() {
    for n in [1usize, 2, 17] {
        let instants: Vec<TInstant> = (0..n).map(|i| TInstant::new(i as i32, i as i64)).collect();
        let temp: Temporal = TSequence::make(instants, true, true, Interpolation::Step).unwrap().into();
        let ts = encode(&temp).unwrap();
        let bytes = ts.as_bytes();

        let values_start = HEADER_SIZE + 4 + n * 8;
        assert_eq!(sequence_values_offset(n), values_start);
        assert_eq!(bytes.len(), values_start + n * 4);
        for i in 0..n {
            let at = values_start + i * 4;
            assert_eq!(&bytes[at..at + 4], &(i as i32).to_ne_bytes());
        }
    }
}

#[test]
fn test_int_sequence_scenario() {
    let instants = vec![TInstant::new(5, 100), TInstant::new(7, 200), TInstant::new(9, 300)];
    let temp: Temporal = TSequence::make(instants, true, true, Interpolation::Step).unwrap().into();
    let ts = encode(&temp).unwrap();
    let body = &ts.as_bytes()[HEADER_SIZE..];

    let mut expected = Vec::new();
    expected.extend_from_slice(&3i32.to_ne_bytes());
    for t in [100i64, 200, 300] {
        expected.extend_from_slice(&t.to_ne_bytes());
    }
    for v in [5i32, 7, 9] {
        expected.extend_from_slice(&v.to_ne_bytes());
    }
    assert_eq!(body, expected.as_slice());

    let back = decode(ts.as_bytes()).unwrap();
    let pairs: Vec<(i64, Value)> = (0..3)
        .map(|i| {
            let inst = back.instant_n(i).unwrap();
            (inst.t(), inst.value().clone())
        })
        .collect();
    assert_eq!(
        pairs,
        vec![(100, Value::Int(5)), (200, Value::Int(7)), (300, Value::Int(9))]
    );
}

#[test]
fn test_geom_point_3d_zeroes_srid() {
    let temp: Temporal = TInstant::geom_point(PointCoords::xyz(1.0, 2.0, 3.0), 3812, 42).into();
    assert_eq!(temp.instant_n(0).unwrap().value().srid(), Some(3812));
    assert!(temp.flags().has_z());

    let ts = encode(&temp).unwrap();
    // envelope + timestamp + three doubles
    assert_eq!(ts.as_bytes().len(), HEADER_SIZE + 8 + 24);

    let back = decode(ts.as_bytes()).unwrap();
    let value = back.instant_n(0).unwrap().value();
    assert_eq!(value.point_coords().unwrap().unwrap(), PointCoords::xyz(1.0, 2.0, 3.0));
    assert_eq!(value.srid(), Some(0));
    assert_ne!(back, temp);
}

#[test]
fn test_geog_point_keeps_srid() {
    let temp: Temporal = TInstant::geog_point(PointCoords::xy(4.35, 50.85), 4326, 42).into();
    let back = decode(encode(&temp).unwrap().as_bytes()).unwrap();
    assert_eq!(back.instant_n(0).unwrap().value().srid(), Some(4326));
    assert_eq!(back, temp);
}

#[test]
fn test_sequence_bounds_decode_inclusive() {
    let instants = vec![TInstant::new(1.0, 1), TInstant::new(2.0, 2)];
    let seq = TSequence::make(instants, false, false, Interpolation::Linear).unwrap();
    let Temporal::Sequence(back) = decode(encode(&seq.clone().into()).unwrap().as_bytes()).unwrap() else {
        panic!("expected a sequence");
    };
    assert!(back.lower_inc());
    assert!(back.upper_inc());
    assert_eq!(back.instants(), seq.instants());
}

#[test]
fn test_mixed_length_text_sequence() {
    let words = ["", "a", "temporal", "ünïcødé"];
    let instants: Vec<TInstant> = words
        .iter()
        .enumerate()
        .map(|(i, w)| TInstant::new(Text::new(w).unwrap(), i as i64))
        .collect();
    let temp: Temporal = TSequence::make(instants, true, true, Interpolation::Step).unwrap().into();
    let back = decode(encode(&temp).unwrap().as_bytes()).unwrap();
    for (i, w) in words.iter().enumerate() {
        let Value::Text(text) = back.instant_n(i).unwrap().value() else {
            panic!("expected text");
        };
        assert_eq!(text.as_str(), Some(*w));
    }
}

#[test]
fn test_tserialized_roundtrip_through_bytes() {
    let temp: Temporal = TInstant::new(false, -5).into();
    let ts = TSerialized::encode(&temp).unwrap();
    let stored = TSerialized::from_bytes(ts.clone().into_bytes()).unwrap();
    assert_eq!(stored, ts);
    assert_eq!(stored.to_temporal().unwrap(), temp);
}
