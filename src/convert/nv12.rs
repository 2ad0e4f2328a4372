use crate::{
    convert::yuv::{rgb_to_y, rgb_to_yuv, yuv_to_rgb},
    foundation::core::{FrameDescriptor, PixelFormat},
    foundation::error::{HolocamError, HolocamResult},
};

/// Plane geometry of an NV12 frame stored at a given row stride.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nv12Layout {
    /// Luma width in pixels.
    pub width: u32,
    /// Luma height in pixels.
    pub height: u32,
    /// Bytes between rows, shared by both planes.
    pub stride: usize,
}

impl Nv12Layout {
    /// Describe an NV12 frame; dimensions must be even and non-zero, `stride >= width`.
    pub fn new(width: u32, height: u32, stride: usize) -> HolocamResult<Self> {
        let frame = FrameDescriptor::new(width, height)?;
        if !frame.is_even() {
            return Err(HolocamError::invalid_argument(format!(
                "NV12 needs even width and height, got {width}x{height}"
            )));
        }
        if stride < width as usize {
            return Err(HolocamError::invalid_argument(format!(
                "NV12 stride {stride} is smaller than width {width}"
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
        })
    }

    /// Byte offset of the interleaved UV plane.
    pub fn uv_offset(&self) -> usize {
        self.height as usize * self.stride
    }

    /// Rows of the UV plane (half the luma rows).
    pub fn uv_rows(&self) -> usize {
        self.height as usize / 2
    }

    /// Bytes needed for both planes at this stride.
    pub fn required_len(&self) -> HolocamResult<usize> {
        PixelFormat::Nv12
            .required_len(self.height, self.stride)
            .ok_or_else(|| HolocamError::size_mismatch("NV12 frame byte size overflows"))
    }

    pub(crate) fn check_len(&self, len: usize, what: &str) -> HolocamResult<()> {
        if len == 0 {
            return Err(HolocamError::invalid_argument(format!("{what} buffer is empty")));
        }
        let needed = self.required_len()?;
        if needed > len {
            return Err(HolocamError::size_mismatch(format!(
                "{what} NV12 {}x{} at stride {} needs {needed} bytes, buffer has {len}",
                self.width, self.height, self.stride
            )));
        }
        Ok(())
    }
}

/// Convert a packed RGB32 frame (B, G, R, A bytes per pixel) into NV12.
///
/// Luma is computed for every pixel; each 2x2 block shares one U/V pair taken from its
/// top-left pixel. The Y plane fills rows `[0, height)` of `dst` and the UV plane rows
/// `[height, height + height / 2)`, both at `dst_stride`. Bytes past `width` in each row are
/// left untouched. Every precondition is checked before anything is written.
pub fn rgb32_to_nv12(
    src: &[u8],
    src_stride: usize,
    width: u32,
    height: u32,
    dst: &mut [u8],
    dst_stride: usize,
) -> HolocamResult<()> {
    let layout = Nv12Layout::new(width, height, dst_stride)?;
    check_rgb32_source(src, src_stride, width, height)?;
    layout.check_len(dst.len(), "destination")?;

    let w = width as usize;
    let (y_plane, uv_plane) = dst.split_at_mut(layout.uv_offset());

    for ((src_pair, y_pair), uv_row) in src
        .chunks(src_stride * 2)
        .zip(y_plane.chunks_mut(dst_stride * 2))
        .zip(uv_plane.chunks_mut(dst_stride))
        .take(layout.uv_rows())
    {
        let (rgb_top, rgb_bottom) = src_pair.split_at(src_stride);
        let (y_top, y_bottom) = y_pair.split_at_mut(dst_stride);

        for bx in 0..w / 2 {
            let top = &rgb_top[bx * 8..bx * 8 + 8];
            let bottom = &rgb_bottom[bx * 8..bx * 8 + 8];
            let (y0, u, v) = rgb_to_yuv(top[2], top[1], top[0]);

            y_top[bx * 2] = y0;
            y_top[bx * 2 + 1] = rgb_to_y(top[6], top[5], top[4]);
            y_bottom[bx * 2] = rgb_to_y(bottom[2], bottom[1], bottom[0]);
            y_bottom[bx * 2 + 1] = rgb_to_y(bottom[6], bottom[5], bottom[4]);
            uv_row[bx * 2] = u;
            uv_row[bx * 2 + 1] = v;
        }
    }

    Ok(())
}

/// Convert an NV12 frame back to tightly packed straight RGBA8 (alpha = 255).
pub fn nv12_to_rgba(src: &[u8], stride: usize, width: u32, height: u32) -> HolocamResult<Vec<u8>> {
    let layout = Nv12Layout::new(width, height, stride)?;
    layout.check_len(src.len(), "source")?;

    let w = width as usize;
    let (y_plane, uv_plane) = src.split_at(layout.uv_offset());
    let mut out = Vec::with_capacity(w * height as usize * 4);

    for (row, y_row) in y_plane.chunks(stride).enumerate() {
        let uv_start = (row / 2) * stride;
        let uv_row = &uv_plane[uv_start..uv_start + w];
        for (col, &y) in y_row[..w].iter().enumerate() {
            let uv = col & !1;
            let (r, g, b) = yuv_to_rgb(y, uv_row[uv], uv_row[uv + 1]);
            out.extend_from_slice(&[r, g, b, 255]);
        }
    }
    Ok(out)
}

fn check_rgb32_source(src: &[u8], stride: usize, width: u32, height: u32) -> HolocamResult<()> {
    if src.is_empty() {
        return Err(HolocamError::invalid_argument("source buffer is empty"));
    }
    let row_bytes = width as usize * 4;
    if stride < row_bytes {
        return Err(HolocamError::invalid_argument(format!(
            "RGB32 source stride {stride} is smaller than a {width}-pixel row ({row_bytes} bytes)"
        )));
    }
    let needed = (height as usize)
        .checked_mul(stride)
        .ok_or_else(|| HolocamError::size_mismatch("RGB32 source byte size overflows"))?;
    if needed > src.len() {
        return Err(HolocamError::size_mismatch(format!(
            "RGB32 source {width}x{height} at stride {stride} needs {needed} bytes, buffer has {}",
            src.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/convert/nv12.rs"]
mod tests;
