//! Production surface backed by the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Region copy | `DynamicImage::crop_imm` |
//! | Resample | `image::imageops` via `resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! The scratch buffers live entirely inside [`render`](RasterSurface::render)
//! and are dropped on every exit path.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::surface::{Quality, RasterSurface, SurfaceError};
use crate::cropping::{Dimensions, Rect};

/// Pure Rust surface using the `image` crate.
pub struct PixelSurface;

impl PixelSurface {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PixelSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// Snap a float source rectangle to integer pixels inside the image bounds.
///
/// Overlays may hand in rectangles that poke past an edge mid-gesture; the
/// copy samples the intersection. At least one pixel per axis survives so
/// `resize_exact` always has something to sample.
fn snap_to_bounds(rect: Rect, image: &DynamicImage) -> (u32, u32, u32, u32) {
    let x = (rect.x.max(0.0).floor() as u32).min(image.width() - 1);
    let y = (rect.y.max(0.0).floor() as u32).min(image.height() - 1);
    let width = (rect.width.round() as u32).clamp(1, image.width() - x);
    let height = (rect.height.round() as u32).clamp(1, image.height() - y);
    (x, y, width, height)
}

impl RasterSurface for PixelSurface {
    fn render(
        &self,
        image: &DynamicImage,
        source_rect: Rect,
        output: Dimensions,
        quality: Quality,
    ) -> Result<Vec<u8>, SurfaceError> {
        if output.width == 0 || output.height == 0 {
            return Err(SurfaceError::Unavailable(output.width, output.height));
        }

        let (x, y, width, height) = snap_to_bounds(source_rect, image);
        let scratch = image.crop_imm(x, y, width, height);
        let scaled = scratch.resize_exact(output.width, output.height, FilterType::Lanczos3);

        // JPEG has no alpha; flatten before encoding
        let rgb = scaled.to_rgb8();
        let mut buf = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut buf, quality.value() as u8)
            .write_image(rgb.as_raw(), output.width, output.height, ExtendedColorType::Rgb8)
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;

        Ok(buf.into_inner())
    }
}
