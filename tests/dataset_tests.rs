// Host-side tests for the bundled dataset and marker heights.

use globe_core::{
    bundled_locations, marker_height, max_value, parse_locations, DatasetError, LocationRecord,
    MarkerSet, MARKER_MAX_HEIGHT, MARKER_MIN_HEIGHT,
};
use std::collections::HashSet;

#[test]
fn bundled_dataset_parses_with_sane_coordinates() {
    let records = bundled_locations().expect("bundled dataset parses");
    assert!(!records.is_empty());
    let ids: HashSet<u32> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), records.len(), "ids are unique");
    for r in &records {
        assert!((-90.0..=90.0).contains(&r.lat), "{} lat {}", r.name, r.lat);
        assert!((-180.0..=180.0).contains(&r.lon), "{} lon {}", r.name, r.lon);
        assert!(!r.name.is_empty());
    }
}

#[test]
fn parse_accepts_integer_and_float_values() {
    let json = r#"[
        {"id": 7, "name": "X", "lat": 1, "lon": -2.5, "value": 3},
        {"id": 8, "name": "Y", "lat": -1.25, "lon": 2, "value": 0.5}
    ]"#;
    let records = parse_locations(json).expect("parses");
    assert_eq!(
        records[0],
        LocationRecord {
            id: 7,
            name: "X".into(),
            lat: 1.0,
            lon: -2.5,
            value: 3.0
        }
    );
    assert_eq!(records[1].value, 0.5);
}

#[test]
fn invalid_json_is_a_parse_error() {
    let err = parse_locations("[{\"id\": 1, \"name\": \"broken\"").unwrap_err();
    assert!(matches!(err, DatasetError::Parse(_)));
    assert!(err.to_string().contains("location dataset"));
    let missing_field = parse_locations(r#"[{"id": 1, "name": "n", "lat": 0}]"#);
    assert!(missing_field.is_err());
}

#[test]
fn max_value_never_below_zero() {
    assert_eq!(max_value(&[]), 0.0);
    let negative = parse_locations(r#"[{"id":1,"name":"a","lat":0,"lon":0,"value":-4}]"#)
        .expect("parses");
    assert_eq!(max_value(&negative), 0.0);
}

#[test]
fn heights_scale_with_value_and_respect_minimum() {
    assert!((marker_height(100.0, 100.0) - MARKER_MAX_HEIGHT).abs() < 1e-6);
    assert!((marker_height(50.0, 100.0) - 0.1).abs() < 1e-6);
    assert_eq!(marker_height(1.0, 1000.0), MARKER_MIN_HEIGHT);
    assert_eq!(marker_height(-3.0, 10.0), MARKER_MIN_HEIGHT);
    assert_eq!(marker_height(5.0, 0.0), MARKER_MIN_HEIGHT);
    assert_eq!(marker_height(f64::NAN, 10.0), MARKER_MIN_HEIGHT);
}

#[test]
fn marker_set_mirrors_records() {
    let records = bundled_locations().expect("bundled dataset parses");
    let markers = MarkerSet::from_records(&records, 1.0);
    assert_eq!(markers.len(), records.len());
    let tallest = markers
        .iter()
        .map(|m| m.height)
        .fold(0.0_f32, f32::max);
    assert!((tallest - MARKER_MAX_HEIGHT).abs() < 1e-6);
    for (m, r) in markers.iter().zip(&records) {
        assert_eq!(&m.record, r);
        assert!((m.position.length() - 1.0).abs() < 1e-5);
        assert!((m.normal.length() - 1.0).abs() < 1e-5);
        assert!(m.height >= MARKER_MIN_HEIGHT);
        assert!(!m.is_hovered());
        // the cylinder extrudes outward
        assert!(m.tip().length() > m.position.length());
    }
}
