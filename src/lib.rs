//! holocam produces synthetic virtual-camera frames from a fixed RGBA pattern image.
//!
//! # Pipeline overview
//!
//! 1. **Load**: a pattern asset becomes a [`SourceImage`] (or a solid [`Pattern`] fallback when
//!    the asset is missing).
//! 2. **Negotiate**: [`FrameGenerator::initialize`] accepts a [`FormatDescriptor`] whose subtype
//!    is RGB32 ([`FourCc::BGRA`]) or [`FourCc::NV12`] and fixes the frame size.
//! 3. **Render**: [`FrameGenerator::create_frame`] packs the pattern into RGB32 words at the
//!    caller's pitch, or renders an RGB32 scratch frame and converts it with
//!    [`rgb32_to_nv12`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Validated geometry**: every pitch, length and stride is checked before the first write,
//!   so precondition failures never leave a partially written buffer.
//! - **No global state**: each generator owns its pattern and scratch memory.
//! - **No IO while rendering**: asset access happens once, when the pattern is loaded.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod convert;
mod foundation;
mod generator;
mod render;
mod source;

/// JSON configuration for building a generator.
pub mod config;

pub use config::GeneratorConfig;
pub use convert::nv12::{Nv12Layout, nv12_to_rgba, rgb32_to_nv12};
pub use convert::yuv::{rgb_to_y, rgb_to_yuv, yuv_to_rgb};
pub use foundation::core::{
    FormatDescriptor, FourCc, FrameDescriptor, PixelFormat, RgbMask, Rgba8,
};
pub use foundation::error::{HolocamError, HolocamResult};
pub use generator::session::FrameGenerator;
pub use render::rgb32::{RGB32_BPP, render_rgb32, rgb32_to_rgba};
pub use source::decode::{decode_image, open_image, open_raw_rgba};
pub use source::pattern::{Pattern, SourceImage, SourceLayout, SourceSpec};
