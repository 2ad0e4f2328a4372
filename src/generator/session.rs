use crate::{
    convert::nv12::{Nv12Layout, rgb32_to_nv12},
    foundation::core::{FormatDescriptor, FrameDescriptor, PixelFormat, RgbMask},
    foundation::error::{HolocamError, HolocamResult},
    render::rgb32::{RGB32_BPP, render_rgb32},
    source::pattern::Pattern,
};

#[derive(Clone, Copy, Debug)]
struct Negotiated {
    format: PixelFormat,
    frame: FrameDescriptor,
}

/// Produces synthetic video frames from a [`Pattern`] in the negotiated pixel format.
///
/// Format and size are fixed by [`FrameGenerator::initialize`]. The pattern and the NV12
/// scratch buffer are owned per instance, so distinct generators are fully independent; a single
/// instance needs `&mut self` for every frame.
#[derive(Debug)]
pub struct FrameGenerator {
    pattern: Pattern,
    negotiated: Option<Negotiated>,
    scratch: Vec<u8>,
}

impl FrameGenerator {
    /// Create an uninitialized generator painting `pattern`.
    pub fn new(pattern: impl Into<Pattern>) -> Self {
        Self {
            pattern: pattern.into(),
            negotiated: None,
            scratch: Vec::new(),
        }
    }

    /// Accept a negotiated format. On error the previous session state is kept as-is.
    #[tracing::instrument(skip(self), fields(subtype = %desc.subtype))]
    pub fn initialize(&mut self, desc: &FormatDescriptor) -> HolocamResult<()> {
        let format = PixelFormat::from_fourcc(desc.subtype)?;
        let frame = desc.frame();
        frame.validate()?;
        if format == PixelFormat::Nv12 && !frame.is_even() {
            return Err(HolocamError::invalid_argument(format!(
                "NV12 needs even width and height, got {}x{}",
                frame.width, frame.height
            )));
        }

        self.negotiated = Some(Negotiated { format, frame });
        tracing::debug!(%format, width = frame.width, height = frame.height, "format negotiated");
        Ok(())
    }

    /// Negotiated pixel format, if initialized.
    pub fn format(&self) -> Option<PixelFormat> {
        self.negotiated.map(|n| n.format)
    }

    /// Negotiated frame size, if initialized.
    pub fn descriptor(&self) -> Option<FrameDescriptor> {
        self.negotiated.map(|n| n.frame)
    }

    /// Smallest legal output pitch for the negotiated format.
    pub fn min_pitch(&self) -> Option<usize> {
        self.negotiated.map(|n| n.format.min_pitch(n.frame.width))
    }

    /// Output buffer length needed at `pitch` for the negotiated format.
    pub fn required_len(&self, pitch: usize) -> Option<usize> {
        self.negotiated
            .and_then(|n| n.format.required_len(n.frame.height, pitch))
    }

    /// Render one frame into `out`, whose rows are `pitch` bytes apart.
    ///
    /// Output geometry is validated before anything is written, so a precondition failure leaves
    /// `out` untouched. Any other failure leaves its contents unspecified.
    #[tracing::instrument(skip(self, out), fields(len = out.len()))]
    pub fn create_frame(&mut self, out: &mut [u8], pitch: usize, mask: RgbMask) -> HolocamResult<()> {
        let Some(Negotiated { format, frame }) = self.negotiated else {
            return Err(HolocamError::unsupported_format(
                "no format negotiated; call initialize first",
            ));
        };

        match format {
            PixelFormat::Rgb32 => {
                tracing::debug!("rendering RGB32 frame");
                render_rgb32(&self.pattern, out, pitch, frame, mask)
            }
            PixelFormat::Nv12 => {
                tracing::debug!("rendering NV12 frame");
                Nv12Layout::new(frame.width, frame.height, pitch)?
                    .check_len(out.len(), "destination")?;

                let scratch_stride = frame.width as usize * RGB32_BPP;
                let scratch_len = scratch_stride
                    .checked_mul(frame.height as usize)
                    .ok_or_else(|| HolocamError::size_mismatch("scratch byte size overflows"))?;
                let scratch = grow_scratch(&mut self.scratch, scratch_len)?;
                render_rgb32(&self.pattern, scratch, scratch_stride, frame, mask)?;
                rgb32_to_nv12(
                    scratch,
                    scratch_stride,
                    frame.width,
                    frame.height,
                    out,
                    pitch,
                )
            }
        }
    }
}

fn grow_scratch(scratch: &mut Vec<u8>, len: usize) -> HolocamResult<&mut [u8]> {
    if scratch.len() < len {
        scratch
            .try_reserve_exact(len - scratch.len())
            .map_err(|e| {
                HolocamError::allocation_failure(format!("NV12 scratch buffer of {len} bytes: {e}"))
            })?;
        scratch.resize(len, 0);
    }
    Ok(&mut scratch[..len])
}

#[cfg(test)]
#[path = "../../tests/unit/generator/session.rs"]
mod tests;
