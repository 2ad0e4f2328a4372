use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{HolocamError, HolocamResult};

/// Four-character media subtype code as negotiated with the host framework.
///
/// Unknown codes are representable on purpose: they travel through configuration untouched and
/// are rejected by [`PixelFormat::from_fourcc`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    /// Packed 32-bit RGB, stored in memory as B, G, R, A.
    pub const BGRA: Self = Self(*b"BGRA");
    /// Semi-planar YUV 4:2:0.
    pub const NV12: Self = Self(*b"NV12");
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{}", char::from(b))?;
        }
        Ok(())
    }
}

impl FromStr for FourCc {
    type Err = HolocamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 4] = s.as_bytes().try_into().map_err(|_| {
            HolocamError::invalid_argument(format!("fourcc must be 4 bytes, got '{s}'"))
        })?;
        if !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            return Err(HolocamError::invalid_argument(format!(
                "fourcc must be printable ASCII, got '{s}'"
            )));
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for FourCc {
    type Error = HolocamError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FourCc> for String {
    fn from(code: FourCc) -> Self {
        code.to_string()
    }
}

/// Output pixel layouts the generator can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Packed `(A << 24) | (R << 16) | (G << 8) | B` words, little-endian in memory.
    Rgb32,
    /// Y plane followed by an interleaved U/V plane at half resolution in both axes.
    Nv12,
}

impl PixelFormat {
    /// Map a negotiated subtype onto a supported format.
    pub fn from_fourcc(code: FourCc) -> HolocamResult<Self> {
        match code {
            FourCc::BGRA => Ok(Self::Rgb32),
            FourCc::NV12 => Ok(Self::Nv12),
            other => Err(HolocamError::unsupported_format(format!(
                "subtype '{other}' is not one of BGRA (RGB32) or NV12"
            ))),
        }
    }

    /// Subtype code for this format.
    pub fn fourcc(self) -> FourCc {
        match self {
            Self::Rgb32 => FourCc::BGRA,
            Self::Nv12 => FourCc::NV12,
        }
    }

    /// Smallest legal row pitch in bytes for `width` pixels.
    pub fn min_pitch(self, width: u32) -> usize {
        match self {
            Self::Rgb32 => width as usize * 4,
            Self::Nv12 => width as usize,
        }
    }

    /// Number of `pitch`-sized rows a frame of `height` occupies.
    pub fn row_count(self, height: u32) -> usize {
        let h = height as usize;
        match self {
            Self::Rgb32 => h,
            Self::Nv12 => h + h / 2,
        }
    }

    /// Bytes needed to hold a frame of `height` rows at `pitch`, or `None` on overflow.
    pub fn required_len(self, height: u32, pitch: usize) -> Option<usize> {
        self.row_count(height).checked_mul(pitch)
    }

    /// Meaningful (non-padding) bytes of a `width x height` frame.
    pub fn packed_len(self, width: u32, height: u32) -> usize {
        self.min_pitch(width) * self.row_count(height)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb32 => f.write_str("RGB32"),
            Self::Nv12 => f.write_str("NV12"),
        }
    }
}

/// Frame resolution fixed for the lifetime of a generator session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameDescriptor {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameDescriptor {
    /// Build a descriptor; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> HolocamResult<Self> {
        let desc = Self { width, height };
        desc.validate()?;
        Ok(desc)
    }

    /// Check the non-zero invariant.
    pub fn validate(self) -> HolocamResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HolocamError::invalid_argument(format!(
                "frame size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Whether both dimensions are multiples of two (needed for 4:2:0 subsampling).
    pub fn is_even(self) -> bool {
        self.width.is_multiple_of(2) && self.height.is_multiple_of(2)
    }
}

/// Externally negotiated capture format: a subtype plus a frame size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormatDescriptor {
    /// Requested pixel subtype.
    pub subtype: FourCc,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl FormatDescriptor {
    /// Build a descriptor from its parts.
    pub fn new(subtype: FourCc, width: u32, height: u32) -> Self {
        Self {
            subtype,
            width,
            height,
        }
    }

    /// Frame size carried by this descriptor.
    pub fn frame(self) -> FrameDescriptor {
        FrameDescriptor {
            width: self.width,
            height: self.height,
        }
    }
}

/// Bit mask ANDed onto each packed RGB32 word before it is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RgbMask(pub u32);

impl RgbMask {
    /// Keeps every channel; pixels pass through unchanged.
    pub const ALL: Self = Self(0xFFFF_FFFF);

    /// AND the mask onto a packed word.
    pub fn apply(self, word: u32) -> u32 {
        word & self.0
    }
}

impl Default for RgbMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack as `(A << 24) | (R << 16) | (G << 8) | B`.
    pub fn pack_argb(self) -> u32 {
        u32::from(self.a) << 24
            | u32::from(self.r) << 16
            | u32::from(self.g) << 8
            | u32::from(self.b)
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
