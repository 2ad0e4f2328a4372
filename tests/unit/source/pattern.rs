use std::path::PathBuf;

use super::*;

#[test]
fn from_raw_validates_size() {
    assert!(SourceImage::from_raw(0, 1, vec![]).is_err());
    let err = SourceImage::from_raw(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, HolocamError::SizeMismatch(_)));

    let img = SourceImage::from_raw(2, 2, vec![0; 20]).unwrap();
    assert_eq!(img.as_bytes().len(), 16);
}

#[test]
fn rows_are_bounded_by_stride() {
    let bytes: Vec<u8> = (0..16).collect();
    let img = SourceImage::from_raw(2, 2, bytes).unwrap();
    assert_eq!(img.row(0).unwrap(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(img.row(1).unwrap(), &[8, 9, 10, 11, 12, 13, 14, 15]);
    assert!(img.row(2).is_none());
}

#[test]
fn solid_repeats_color() {
    let img = SourceImage::solid(3, 1, Rgba8::new(1, 2, 3, 4)).unwrap();
    assert_eq!(img.as_bytes(), &[1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4]);
}

#[test]
fn solid_rejects_unrepresentable_size() {
    let err = SourceImage::solid(u32::MAX, u32::MAX, Rgba8::new(1, 2, 3, 4)).unwrap_err();
    assert!(matches!(err, HolocamError::SizeMismatch(_)));

    let err = SourceImage::solid(0, 4, Rgba8::new(1, 2, 3, 4)).unwrap_err();
    assert!(matches!(err, HolocamError::InvalidArgument(_)));
}

#[test]
fn missing_source_falls_back_to_solid() {
    let fallback = Rgba8::new(10, 20, 30, 255);
    let spec = SourceSpec {
        path: PathBuf::from("target/definitely/missing.png"),
        layout: SourceLayout::Encoded,
    };

    match Pattern::load_or_fallback(Some(&spec), fallback) {
        Pattern::Solid(c) => assert_eq!(c, fallback),
        Pattern::Image(_) => panic!("expected fallback"),
    }
    assert!(matches!(
        Pattern::load_or_fallback(None, fallback),
        Pattern::Solid(_)
    ));
}

#[test]
fn source_spec_layout_defaults_to_encoded() {
    let spec: SourceSpec = serde_json::from_str(r#"{ "path": "a.png" }"#).unwrap();
    assert_eq!(spec.layout, SourceLayout::Encoded);

    let spec: SourceSpec =
        serde_json::from_str(r#"{ "path": "a.rgba", "layout": { "raw": { "width": 4, "height": 2 } } }"#)
            .unwrap();
    assert_eq!(
        spec.layout,
        SourceLayout::Raw {
            width: 4,
            height: 2
        }
    );
}
