use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::{
    foundation::error::{HolocamError, HolocamResult},
    source::pattern::SourceImage,
};

/// Decode any format supported by the `image` crate into a straight-alpha RGBA8 source.
pub fn decode_image(bytes: &[u8]) -> HolocamResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_shared(width, height, Arc::new(rgba.into_raw()))
}

/// Read and decode an encoded image (PNG, BMP, ...) from disk.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn open_image(path: &Path) -> HolocamResult<SourceImage> {
    let bytes = read_asset(path)?;
    decode_image(&bytes)
}

/// Read a headerless, top-down RGBA8 dump of `width x height` pixels from disk.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn open_raw_rgba(path: &Path, width: u32, height: u32) -> HolocamResult<SourceImage> {
    let bytes = read_asset(path)?;
    SourceImage::from_raw(width, height, bytes)
}

fn read_asset(path: &Path) -> HolocamResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| HolocamError::io(format!("read source image '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/source/decode.rs"]
mod tests;
