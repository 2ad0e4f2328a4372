use super::*;

#[test]
fn fourcc_parse_and_display() {
    let code: FourCc = "NV12".parse().unwrap();
    assert_eq!(code, FourCc::NV12);
    assert_eq!(code.to_string(), "NV12");

    assert!("RGB32".parse::<FourCc>().is_err());
    assert!("NV1".parse::<FourCc>().is_err());
}

#[test]
fn fourcc_serde_as_string() {
    let json = serde_json::to_string(&FourCc::BGRA).unwrap();
    assert_eq!(json, "\"BGRA\"");
    let back: FourCc = serde_json::from_str("\"YUY2\"").unwrap();
    assert_eq!(back, FourCc(*b"YUY2"));
}

#[test]
fn pixel_format_from_fourcc_rejects_unknown() {
    assert_eq!(
        PixelFormat::from_fourcc(FourCc::BGRA).unwrap(),
        PixelFormat::Rgb32
    );
    assert_eq!(
        PixelFormat::from_fourcc(FourCc::NV12).unwrap(),
        PixelFormat::Nv12
    );

    for format in [PixelFormat::Rgb32, PixelFormat::Nv12] {
        assert_eq!(PixelFormat::from_fourcc(format.fourcc()).unwrap(), format);
    }

    let err = PixelFormat::from_fourcc(FourCc(*b"YUY2")).unwrap_err();
    assert!(matches!(err, HolocamError::UnsupportedFormat(_)));
    assert!(err.to_string().contains("YUY2"));
}

#[test]
fn pixel_format_geometry() {
    assert_eq!(PixelFormat::Rgb32.min_pitch(10), 40);
    assert_eq!(PixelFormat::Nv12.min_pitch(10), 10);
    assert_eq!(PixelFormat::Rgb32.row_count(6), 6);
    assert_eq!(PixelFormat::Nv12.row_count(6), 9);

    assert_eq!(PixelFormat::Nv12.required_len(4, 16), Some(96));
    assert_eq!(PixelFormat::Nv12.packed_len(4, 4), 24);
    assert_eq!(PixelFormat::Rgb32.packed_len(4, 4), 64);
    assert_eq!(PixelFormat::Rgb32.required_len(u32::MAX, usize::MAX), None);
}

#[test]
fn frame_descriptor_rejects_zero() {
    assert!(FrameDescriptor::new(0, 4).is_err());
    assert!(FrameDescriptor::new(4, 0).is_err());
    let d = FrameDescriptor::new(4, 2).unwrap();
    assert!(d.is_even());
    assert!(!FrameDescriptor::new(3, 2).unwrap().is_even());
}

#[test]
fn rgb_mask_and_pack() {
    let px = Rgba8::new(0x11, 0x22, 0x33, 0x44);
    assert_eq!(px.pack_argb(), 0x4411_2233);
    assert_eq!(RgbMask::default().apply(px.pack_argb()), 0x4411_2233);
    assert_eq!(RgbMask(0xFF00_FF00).apply(px.pack_argb()), 0x4400_2200);
}
