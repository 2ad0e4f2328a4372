use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    foundation::core::Rgba8,
    foundation::error::{HolocamError, HolocamResult},
    source::decode,
};

/// Loaded RGBA8 pattern image: top-down rows, 4 bytes per pixel in R, G, B, A order.
///
/// Pixels are shared behind an `Arc`, so clones are cheap and every generator instance can own
/// its copy without any process-wide buffer.
#[derive(Clone)]
pub struct SourceImage {
    width: u32,
    height: u32,
    stride: usize,
    rgba: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap raw RGBA8 bytes. Trailing bytes past `height * width * 4` are ignored.
    pub fn from_raw(width: u32, height: u32, rgba: Vec<u8>) -> HolocamResult<Self> {
        Self::from_shared(width, height, Arc::new(rgba))
    }

    pub(crate) fn from_shared(width: u32, height: u32, rgba: Arc<Vec<u8>>) -> HolocamResult<Self> {
        if width == 0 || height == 0 {
            return Err(HolocamError::invalid_argument(format!(
                "source image size must be non-zero, got {width}x{height}"
            )));
        }
        let stride = width as usize * 4;
        let needed = stride
            .checked_mul(height as usize)
            .ok_or_else(|| HolocamError::size_mismatch("source image byte size overflows"))?;
        if rgba.len() < needed {
            return Err(HolocamError::size_mismatch(format!(
                "source image {width}x{height} needs {needed} bytes, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            rgba,
        })
    }

    /// Fill a `width x height` image with one color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> HolocamResult<Self> {
        let px = [color.r, color.g, color.b, color.a];
        let count = (width as usize).checked_mul(height as usize);
        let len = count
            .and_then(|n| n.checked_mul(px.len()))
            .ok_or_else(|| {
                HolocamError::size_mismatch(format!(
                    "solid image {width}x{height} byte size overflows"
                ))
            })?;

        let mut rgba = Vec::new();
        rgba.try_reserve_exact(len).map_err(|e| {
            HolocamError::allocation_failure(format!("solid image of {len} bytes: {e}"))
        })?;
        for _ in 0..len / px.len() {
            rgba.extend_from_slice(&px);
        }
        Self::from_raw(width, height, rgba)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between the starts of consecutive rows; always `width * 4`.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// All `height * stride` pixel bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba[..self.stride * self.height as usize]
    }

    /// First `width` pixels of row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        self.rgba.get(start..start + self.stride)
    }
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("rgba_len", &self.rgba.len())
            .finish()
    }
}

/// How a source asset is stored on disk.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLayout {
    /// Any container the `image` crate can decode.
    Encoded,
    /// Headerless top-down RGBA8 bytes of a known size.
    Raw {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

/// Location and layout of the pattern asset.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceSpec {
    /// File holding the pattern.
    pub path: PathBuf,
    /// Storage layout; encoded when absent.
    #[serde(default = "default_layout")]
    pub layout: SourceLayout,
}

fn default_layout() -> SourceLayout {
    SourceLayout::Encoded
}

impl SourceSpec {
    /// Read the asset from disk.
    pub fn load(&self) -> HolocamResult<SourceImage> {
        match self.layout {
            SourceLayout::Encoded => decode::open_image(&self.path),
            SourceLayout::Raw { width, height } => {
                decode::open_raw_rgba(&self.path, width, height)
            }
        }
    }
}

/// What a generator paints into each frame.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Copy pixels from a loaded image.
    Image(SourceImage),
    /// Deterministic single-color frame.
    Solid(Rgba8),
}

impl Pattern {
    /// Load `source`, or fall back to a solid `fallback` frame when it is absent or unreadable.
    pub fn load_or_fallback(source: Option<&SourceSpec>, fallback: Rgba8) -> Self {
        let Some(spec) = source else {
            return Self::Solid(fallback);
        };
        match spec.load() {
            Ok(img) => Self::Image(img),
            Err(err) => {
                tracing::warn!(
                    path = %spec.path.display(),
                    error = %err,
                    "source image unavailable, using solid fallback"
                );
                Self::Solid(fallback)
            }
        }
    }
}

impl From<SourceImage> for Pattern {
    fn from(img: SourceImage) -> Self {
        Self::Image(img)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/pattern.rs"]
mod tests;
