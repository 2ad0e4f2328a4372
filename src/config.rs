use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::core::{FormatDescriptor, FourCc, PixelFormat, RgbMask, Rgba8},
    foundation::error::{HolocamError, HolocamResult},
    generator::session::FrameGenerator,
    source::pattern::{Pattern, SourceSpec},
};

/// JSON description of a generator: pattern asset, negotiated format and output geometry.
///
/// ```json
/// {
///   "source": { "path": "holocam.rgba", "layout": { "raw": { "width": 1280, "height": 720 } } },
///   "format": "NV12",
///   "width": 1280,
///   "height": 720
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Pattern asset; frames use the fallback color when absent.
    #[serde(default)]
    pub source: Option<SourceSpec>,
    /// Straight RGBA color used when the source cannot be loaded.
    #[serde(default = "default_fallback_rgba")]
    pub fallback_rgba: [u8; 4],
    /// Negotiated subtype (`BGRA` or `NV12`; `RGB32` is read as `BGRA`).
    #[serde(deserialize_with = "deserialize_subtype")]
    pub format: FourCc,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Output row pitch in bytes; the format's minimum when absent.
    #[serde(default)]
    pub pitch: Option<usize>,
    /// Mask ANDed onto packed RGB32 words.
    #[serde(default)]
    pub mask: RgbMask,
}

fn default_fallback_rgba() -> [u8; 4] {
    [128, 128, 128, 255]
}

fn deserialize_subtype<'de, D>(deserializer: D) -> Result<FourCc, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = <String as serde::Deserialize>::deserialize(deserializer)?;
    if name.eq_ignore_ascii_case("RGB32") {
        return Ok(PixelFormat::Rgb32.fourcc());
    }
    name.parse().map_err(serde::de::Error::custom)
}

impl GeneratorConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HolocamResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HolocamError::invalid_argument(format!("parse generator config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HolocamResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HolocamError::io(format!("open generator config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check format, size and pitch without touching the source asset.
    pub fn validate(&self) -> HolocamResult<()> {
        let format = PixelFormat::from_fourcc(self.format)?;
        self.format_descriptor().frame().validate()?;
        if format == PixelFormat::Nv12
            && (!self.width.is_multiple_of(2) || !self.height.is_multiple_of(2))
        {
            return Err(HolocamError::invalid_argument(
                "NV12 width/height must be even",
            ));
        }
        if let Some(pitch) = self.pitch {
            let min = format.min_pitch(self.width);
            if pitch < min {
                return Err(HolocamError::invalid_argument(format!(
                    "pitch {pitch} is below the {format} minimum of {min}"
                )));
            }
        }
        Ok(())
    }

    /// Descriptor handed to [`FrameGenerator::initialize`].
    pub fn format_descriptor(&self) -> FormatDescriptor {
        FormatDescriptor::new(self.format, self.width, self.height)
    }

    /// Fallback color as [`Rgba8`].
    pub fn fallback(&self) -> Rgba8 {
        Rgba8::from(self.fallback_rgba)
    }

    /// Row pitch to render with: the configured one or the format's minimum.
    pub fn effective_pitch(&self) -> HolocamResult<usize> {
        let format = PixelFormat::from_fourcc(self.format)?;
        Ok(self.pitch.unwrap_or_else(|| format.min_pitch(self.width)))
    }

    /// Load the configured pattern, falling back to a solid frame when it is unavailable.
    pub fn load_pattern(&self) -> Pattern {
        Pattern::load_or_fallback(self.source.as_ref(), self.fallback())
    }

    /// Build an initialized generator.
    pub fn build(&self) -> HolocamResult<FrameGenerator> {
        self.validate()?;
        let mut generator = FrameGenerator::new(self.load_pattern());
        generator.initialize(&self.format_descriptor())?;
        Ok(generator)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
