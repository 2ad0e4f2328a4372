//! Fixed-point BT.601 RGB <-> studio-range YUV.
//!
//! Forward weights are scaled by 256 with a +128 rounding bias; `>>` on `i32` is an
//! arithmetic shift, so negative chroma sums round toward negative infinity.

/// Studio-range luma for one RGB sample.
#[inline]
pub fn rgb_to_y(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    clamp_u8(((66 * r + 129 * g + 25 * b + 128) >> 8) + 16)
}

/// Studio-range `(Y, U, V)` for one RGB sample.
#[inline]
pub fn rgb_to_yuv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (ri, gi, bi) = (i32::from(r), i32::from(g), i32::from(b));
    let u = ((-38 * ri - 74 * gi + 112 * bi + 128) >> 8) + 128;
    let v = ((112 * ri - 94 * gi - 18 * bi + 128) >> 8) + 128;
    (rgb_to_y(r, g, b), clamp_u8(u), clamp_u8(v))
}

/// Inverse of [`rgb_to_yuv`], clamped to `[0, 255]`.
#[inline]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let c = i32::from(y) - 16;
    let d = i32::from(u) - 128;
    let e = i32::from(v) - 128;
    let r = (298 * c + 409 * e + 128) >> 8;
    let g = (298 * c - 100 * d - 208 * e + 128) >> 8;
    let b = (298 * c + 516 * d + 128) >> 8;
    (clamp_u8(r), clamp_u8(g), clamp_u8(b))
}

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/convert/yuv.rs"]
mod tests;
