use std::io::Cursor;
use std::path::PathBuf;

use super::*;

#[test]
fn decode_image_png_keeps_straight_alpha() {
    let src_rgba = vec![100u8, 50, 200, 128, 1, 2, 3, 255];
    let img = image::RgbaImage::from_raw(2, 1, src_rgba.clone()).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.width(), 2);
    assert_eq!(decoded.height(), 1);
    assert_eq!(decoded.stride(), 8);
    assert_eq!(decoded.as_bytes(), src_rgba.as_slice());
}

#[test]
fn decode_image_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn open_raw_rgba_reads_dump_and_checks_length() {
    let dir = PathBuf::from("target").join("unit_source_decode");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("pattern.rgba");
    std::fs::write(&path, [9u8; 2 * 2 * 4 + 3]).unwrap();

    let img = open_raw_rgba(&path, 2, 2).unwrap();
    assert_eq!(img.as_bytes().len(), 16);

    let err = open_raw_rgba(&path, 4, 4).unwrap_err();
    assert!(matches!(err, HolocamError::SizeMismatch(_)));
}

#[test]
fn open_missing_file_is_io_error() {
    let err = open_image(&PathBuf::from("target/definitely/missing.png")).unwrap_err();
    assert!(matches!(err, HolocamError::Io(_)));
}
