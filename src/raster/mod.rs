//! Rasterization — turn a settled crop into an encoded image.
//!
//! [`rasterize`] is the load-bearing step of the pipeline. It maps the crop
//! rectangle from displayed-image coordinates into the image's natural
//! coordinate space, sizes the output buffer for the displayed→natural scale
//! *and* the device pixel density, and hands both to a [`RasterSurface`] for
//! the copy + encode. Both mappings are explicit — nothing here depends on a
//! drawing primitive quietly ignoring a context transform.
//!
//! Failure is all-or-nothing: an error aborts the call and nothing reaches
//! the role store.

mod pixel_surface;
mod surface;

pub use pixel_surface::PixelSurface;
pub use surface::{Quality, RasterSurface, SurfaceError};
// Re-exported for tests (pipeline tests drive the recording mock)
#[cfg(test)]
pub use surface::tests::{MockSurface, RecordedRender};

use thiserror::Error;

use crate::cropping::{self, PixelDensity, Rect};
use crate::source::{EncodedImage, ImageSource};

/// MIME type of every exported crop.
pub const EXPORT_MIME: &str = "image/jpeg";

#[derive(Error, Debug)]
pub enum RasterError {
    /// Rasterization attempted before a fully loaded image exists. A
    /// caller-sequencing defect, not user error.
    #[error("no loaded image to rasterize")]
    MissingSource,
    /// The drawing surface could not be acquired or used.
    #[error("drawing surface unavailable: {0}")]
    NoSurface(#[from] SurfaceError),
}

/// Rasterize `crop` (displayed-image pixel coordinates) against `source` at
/// full natural resolution, oversampled by `density`.
///
/// The output buffer is `floor(crop_w * scale_x * density)` ×
/// `floor(crop_h * scale_y * density)` where `scale_*` is the
/// displayed→natural ratio per axis. The source rectangle is scaled into
/// natural coordinates before the copy, so the full intrinsic resolution of
/// the selected area is sampled.
///
/// Fails with [`RasterError::MissingSource`] if the source has no display
/// size yet (the image hasn't finished loading/layout), and with
/// [`RasterError::NoSurface`] if the surface cannot provide a buffer — which
/// includes the zero-sized buffers that floor semantics produce for sub-pixel
/// crops.
pub fn rasterize(
    source: &ImageSource,
    crop: Rect,
    density: PixelDensity,
    quality: Quality,
    surface: &impl RasterSurface,
) -> Result<EncodedImage, RasterError> {
    let displayed = source.displayed().ok_or(RasterError::MissingSource)?;
    let natural = source.natural();

    let (scale_x, scale_y) = cropping::scale_factors(natural, displayed);
    let output = cropping::output_buffer_size(crop, (scale_x, scale_y), density.value());

    // Map the crop from displayed to natural coordinates for the copy
    let source_rect = Rect::new(
        crop.x * scale_x,
        crop.y * scale_y,
        crop.width * scale_x,
        crop.height * scale_y,
    );

    log::debug!(
        "rasterize: crop {:.1}x{:.1}@{:.1},{:.1} (displayed) -> {} buffer",
        crop.width,
        crop.height,
        crop.x,
        crop.y,
        output,
    );

    let bytes = surface.render(source.image(), source_rect, output, quality)?;
    Ok(EncodedImage::new(bytes, EXPORT_MIME))
}
