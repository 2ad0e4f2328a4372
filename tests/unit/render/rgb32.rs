use super::*;
use crate::source::pattern::SourceImage;

fn frame(w: u32, h: u32) -> FrameDescriptor {
    FrameDescriptor::new(w, h).unwrap()
}

fn gradient(w: u32, h: u32) -> SourceImage {
    let mut bytes = Vec::new();
    for y in 0..h {
        for x in 0..w {
            bytes.extend_from_slice(&[x as u8, y as u8, (x + y) as u8, 200]);
        }
    }
    SourceImage::from_raw(w, h, bytes).unwrap()
}

#[test]
fn packs_rgba_as_little_endian_argb() {
    let img = SourceImage::from_raw(1, 1, vec![0x11, 0x22, 0x33, 0x44]).unwrap();
    let mut dst = [0u8; 4];
    render_rgb32(&img.into(), &mut dst, 4, frame(1, 1), RgbMask::ALL).unwrap();
    assert_eq!(u32::from_le_bytes(dst), 0x4411_2233);
    assert_eq!(dst, [0x33, 0x22, 0x11, 0x44]);
}

#[test]
fn padding_bytes_are_untouched() {
    let pattern: Pattern = gradient(2, 2).into();
    let pitch = 12;
    let mut dst = vec![0xAAu8; pitch * 2];
    render_rgb32(&pattern, &mut dst, pitch, frame(2, 2), RgbMask::ALL).unwrap();

    for row in dst.chunks(pitch) {
        assert_eq!(&row[8..], &[0xAA; 4]);
    }
    // Pixel (1, 1): r=1, g=1, b=2.
    assert_eq!(&dst[pitch + 4..pitch + 8], &[2, 1, 1, 200]);
}

#[test]
fn source_uses_its_own_stride() {
    // Source wider than the frame: rows must be read at 4 * 4 bytes, not at the output pitch.
    let pattern: Pattern = gradient(4, 2).into();
    let mut dst = vec![0u8; 2 * 8];
    render_rgb32(&pattern, &mut dst, 8, frame(2, 2), RgbMask::ALL).unwrap();
    assert_eq!(&dst[8..12], &[1, 1, 0, 200]);
}

#[test]
fn solid_pattern_fills_every_pixel() {
    let pattern = Pattern::Solid(Rgba8::new(1, 2, 3, 4));
    let mut dst = vec![0u8; 3 * 4 * 2];
    render_rgb32(&pattern, &mut dst, 12, frame(3, 2), RgbMask::ALL).unwrap();
    for px in dst.chunks_exact(4) {
        assert_eq!(px, &[3, 2, 1, 4]);
    }
}

#[test]
fn mask_is_applied_to_packed_word() {
    let pattern = Pattern::Solid(Rgba8::new(0x11, 0x22, 0x33, 0x44));
    let mut dst = [0u8; 4];
    render_rgb32(&pattern, &mut dst, 4, frame(1, 1), RgbMask(0xFF00_00FF)).unwrap();
    assert_eq!(u32::from_le_bytes(dst), 0x4400_0033);
}

#[test]
fn short_buffer_is_rejected_without_writes() {
    let pattern = Pattern::Solid(Rgba8::new(255, 255, 255, 255));
    let mut dst = vec![0u8; 8 * 2 - 1];
    let err = render_rgb32(&pattern, &mut dst, 8, frame(2, 2), RgbMask::ALL).unwrap_err();
    assert!(matches!(err, HolocamError::SizeMismatch(_)));
    assert!(dst.iter().all(|&b| b == 0));
}

#[test]
fn invalid_geometry_is_rejected() {
    let pattern = Pattern::Solid(Rgba8::new(0, 0, 0, 255));
    let err = render_rgb32(&pattern, &mut [], 8, frame(2, 2), RgbMask::ALL).unwrap_err();
    assert!(matches!(err, HolocamError::InvalidArgument(_)));

    let mut dst = vec![0u8; 64];
    let err = render_rgb32(&pattern, &mut dst, 7, frame(2, 2), RgbMask::ALL).unwrap_err();
    assert!(matches!(err, HolocamError::InvalidArgument(_)));
}

#[test]
fn small_source_is_size_mismatch() {
    let pattern: Pattern = gradient(2, 1).into();
    let mut dst = vec![0u8; 64];
    let err = render_rgb32(&pattern, &mut dst, 8, frame(2, 2), RgbMask::ALL).unwrap_err();
    assert!(matches!(err, HolocamError::SizeMismatch(_)));
}

#[test]
fn unpack_restores_rgba_order() {
    let img = gradient(2, 2);
    let expected = img.as_bytes().to_vec();
    let mut dst = vec![0u8; 10 * 2];
    render_rgb32(&img.into(), &mut dst, 10, frame(2, 2), RgbMask::ALL).unwrap();
    assert_eq!(rgb32_to_rgba(&dst, 10, frame(2, 2)).unwrap(), expected);
}
