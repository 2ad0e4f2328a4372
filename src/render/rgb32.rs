use crate::{
    foundation::core::{FrameDescriptor, RgbMask, Rgba8},
    foundation::error::{HolocamError, HolocamResult},
    source::pattern::Pattern,
};

/// Bytes per packed RGB32 pixel.
pub const RGB32_BPP: usize = 4;

/// Fill `height` rows of `dst` (spaced `pitch` bytes apart) with packed RGB32 pixels from `pattern`.
///
/// Each pixel is stored as the little-endian word `(A << 24) | (R << 16) | (G << 8) | B`, ANDed
/// with `mask`, so memory order is B, G, R, A. Row padding past `width * 4` is left untouched.
/// All geometry is validated before the first byte is written.
pub fn render_rgb32(
    pattern: &Pattern,
    dst: &mut [u8],
    pitch: usize,
    frame: FrameDescriptor,
    mask: RgbMask,
) -> HolocamResult<()> {
    let row_bytes = check_rgb32_geometry(dst.len(), pitch, frame)?;
    let height = frame.height as usize;

    match pattern {
        Pattern::Image(img) => {
            if img.width() < frame.width || img.height() < frame.height {
                return Err(HolocamError::size_mismatch(format!(
                    "source image {}x{} is smaller than frame {}x{}",
                    img.width(),
                    img.height(),
                    frame.width,
                    frame.height
                )));
            }

            // Source rows follow the source's own stride, never the destination pitch.
            for (dst_row, y) in dst.chunks_mut(pitch).take(height).zip(0..frame.height) {
                let src_row = img.row(y).ok_or_else(|| {
                    HolocamError::size_mismatch(format!("source image has no row {y}"))
                })?;
                for (out, px) in dst_row[..row_bytes]
                    .chunks_exact_mut(RGB32_BPP)
                    .zip(src_row.chunks_exact(RGB32_BPP))
                {
                    let word = Rgba8::new(px[0], px[1], px[2], px[3]).pack_argb();
                    out.copy_from_slice(&mask.apply(word).to_le_bytes());
                }
            }
        }
        Pattern::Solid(color) => {
            let bytes = mask.apply(color.pack_argb()).to_le_bytes();
            for dst_row in dst.chunks_mut(pitch).take(height) {
                for out in dst_row[..row_bytes].chunks_exact_mut(RGB32_BPP) {
                    out.copy_from_slice(&bytes);
                }
            }
        }
    }

    Ok(())
}

/// Validate an RGB32 destination and return the meaningful bytes per row.
pub(crate) fn check_rgb32_geometry(
    len: usize,
    pitch: usize,
    frame: FrameDescriptor,
) -> HolocamResult<usize> {
    frame.validate()?;
    if len == 0 {
        return Err(HolocamError::invalid_argument("destination buffer is empty"));
    }

    let row_bytes = frame.width as usize * RGB32_BPP;
    if pitch < row_bytes {
        return Err(HolocamError::invalid_argument(format!(
            "pitch {pitch} is smaller than a {}-pixel RGB32 row ({row_bytes} bytes)",
            frame.width
        )));
    }

    let needed = (frame.height as usize)
        .checked_mul(pitch)
        .ok_or_else(|| HolocamError::size_mismatch("frame byte size overflows"))?;
    if needed > len {
        return Err(HolocamError::size_mismatch(format!(
            "{} rows at pitch {pitch} need {needed} bytes, buffer has {len}",
            frame.height
        )));
    }
    Ok(row_bytes)
}

/// Unpack a pitched RGB32 frame back to tightly packed straight RGBA8.
pub fn rgb32_to_rgba(
    src: &[u8],
    pitch: usize,
    frame: FrameDescriptor,
) -> HolocamResult<Vec<u8>> {
    let row_bytes = check_rgb32_geometry(src.len(), pitch, frame)?;
    let mut out = Vec::with_capacity(row_bytes * frame.height as usize);
    for row in src.chunks(pitch).take(frame.height as usize) {
        for px in row[..row_bytes].chunks_exact(RGB32_BPP) {
            out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/rgb32.rs"]
mod tests;
