//! Drawing-surface trait and shared types.
//!
//! [`RasterSurface`] is the seam between the rasterizer's coordinate math and
//! the pixel work: acquire a scratch buffer of an exact size, copy a source
//! region into it with high-quality resampling, encode, release. The
//! production implementation is
//! [`PixelSurface`](super::pixel_surface::PixelSurface); tests swap in a
//! recording mock.

use image::DynamicImage;
use thiserror::Error;

use crate::cropping::{Dimensions, Rect};

#[derive(Error, Debug)]
pub enum SurfaceError {
    /// No scratch buffer can be provided for the requested size. Zero-sized
    /// requests land here — floor semantics in the buffer-size math can
    /// legitimately produce them.
    #[error("no drawing surface for a {0}x{1} buffer")]
    Unavailable(u32, u32),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Trait for rasterization surfaces.
///
/// One call = one scratch buffer, exclusively owned and released before the
/// call returns, on success and failure alike. Implementations must produce a
/// buffer of exactly `output` dimensions and fail with
/// [`SurfaceError::Unavailable`] when they cannot.
pub trait RasterSurface {
    /// Copy `source_rect` (natural-image pixel coordinates) out of `image`,
    /// resample it to exactly `output`, and encode as lossy JPEG at `quality`.
    fn render(
        &self,
        image: &DynamicImage,
        source_rect: Rect,
        output: Dimensions,
        quality: Quality,
    ) -> Result<Vec<u8>, SurfaceError>;
}
