//! Pure calculation functions for crop geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use super::region::{AspectRatio, CropRegion, Dimensions, Rect};

/// Compute the initial aspect-locked crop for a freshly loaded image.
///
/// The region spans 100% of the width, with the height derived from the
/// aspect ratio and the result centered within the image. When the image is
/// too wide for the aspect (the derived height would overflow), the height is
/// pinned to 100% and the width derived instead — so the region always lies
/// fully inside the image, whatever its own aspect ratio.
///
/// Returns a percent-unit region so it stays valid at any display size.
///
/// # Arguments
/// * `natural_width`, `natural_height` - Intrinsic image dimensions (positive)
/// * `aspect` - Target width/height ratio
///
/// # Examples
/// ```
/// # use cropkit::cropping::{AspectRatio, CropRegion, compute_initial_crop};
/// // 800x600 at 16:9 → full width, 75% height, vertically centered
/// let region = compute_initial_crop(800, 600, AspectRatio::of(16, 9).unwrap());
/// assert_eq!(region, CropRegion::percent(0.0, 12.5, 100.0, 75.0));
/// ```
pub fn compute_initial_crop(
    natural_width: u32,
    natural_height: u32,
    aspect: AspectRatio,
) -> CropRegion {
    let w = natural_width as f64;
    let h = natural_height as f64;
    let ratio = aspect.value();

    // Seed with the full width and derive the height from the aspect.
    let mut width_pct = 100.0;
    let mut height_pct = (w / ratio) / h * 100.0;

    // Image too wide for this aspect: pin the height, derive the width.
    if height_pct > 100.0 {
        height_pct = 100.0;
        width_pct = (h * ratio) / w * 100.0;
    }

    CropRegion::percent(
        (100.0 - width_pct) / 2.0,
        (100.0 - height_pct) / 2.0,
        width_pct,
        height_pct,
    )
}

/// Per-axis scale factors from displayed to natural (intrinsic) coordinates.
///
/// Corrects for the image being rendered smaller or larger than its intrinsic
/// resolution. Caller must supply positive displayed dimensions — an image
/// only has a display size once it has finished loading.
pub fn scale_factors(natural: Dimensions, displayed: Dimensions) -> (f64, f64) {
    (
        natural.width as f64 / displayed.width as f64,
        natural.height as f64 / displayed.height as f64,
    )
}

/// Size of the output buffer for a crop in displayed-pixel coordinates.
///
/// Oversamples by the displayed→natural scale and the device pixel density,
/// flooring each axis: `floor(crop_w * scale_x * density)` ×
/// `floor(crop_h * scale_y * density)`. Fractional products that floor to
/// zero yield a zero-sized buffer, which the rasterizer rejects.
pub fn output_buffer_size(crop: Rect, scale: (f64, f64), density: f64) -> Dimensions {
    Dimensions::new(
        (crop.width * scale.0 * density).floor() as u32,
        (crop.height * scale.1 * density).floor() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_aspect_locked(natural_w: u32, natural_h: u32, aspect: f64) {
        let region =
            compute_initial_crop(natural_w, natural_h, AspectRatio::new(aspect).unwrap());
        let px = region.to_pixels(Dimensions::new(natural_w, natural_h));

        // Pixel-space ratio matches the target aspect
        let actual = px.aspect().expect("degenerate crop");
        assert!(
            (actual - aspect).abs() < 1e-3,
            "{natural_w}x{natural_h} @ {aspect}: got ratio {actual}"
        );

        // Region lies fully inside the image
        assert!(px.x >= 0.0 && px.y >= 0.0);
        assert!(px.x + px.width <= natural_w as f64 + 1e-9);
        assert!(px.y + px.height <= natural_h as f64 + 1e-9);
    }

    // =========================================================================
    // compute_initial_crop tests
    // =========================================================================

    #[test]
    fn initial_crop_landscape_image_wide_aspect() {
        // 800x600 at 16:9 → width 100%, height 75%, centered vertically
        let region = compute_initial_crop(800, 600, AspectRatio::of(16, 9).unwrap());
        assert_eq!(region, CropRegion::percent(0.0, 12.5, 100.0, 75.0));
    }

    #[test]
    fn initial_crop_square_aspect() {
        // 800x600 at 1:1 → height caps at 100%, width 75%, centered horizontally
        let region = compute_initial_crop(800, 600, AspectRatio::of(1, 1).unwrap());
        assert_eq!(region, CropRegion::percent(12.5, 0.0, 75.0, 100.0));
    }

    #[test]
    fn initial_crop_tall_aspect_on_wide_image_pins_height() {
        // 1600x400 at 9:16: full width would need 2844px of height — the
        // height must pin to 100% and the width shrink to fit.
        let region = compute_initial_crop(1600, 400, AspectRatio::of(9, 16).unwrap());
        let px = region.to_pixels(Dimensions::new(1600, 400));
        assert_eq!(px.height, 400.0);
        assert!((px.width - 225.0).abs() < 1e-9); // 400 * 9/16
    }

    #[test]
    fn initial_crop_is_centered() {
        let region = compute_initial_crop(1000, 1000, AspectRatio::of(2, 1).unwrap());
        let px = region.to_pixels(Dimensions::new(1000, 1000));
        // 1000x500 crop centered in a 1000x1000 image
        assert_eq!(px, Rect::new(0.0, 250.0, 1000.0, 500.0));
    }

    #[test]
    fn initial_crop_aspect_locked_across_shapes() {
        for &(w, h) in &[(800, 600), (600, 800), (1920, 1080), (1080, 1920), (500, 500), (3, 5000)] {
            for &aspect in &[16.0 / 9.0, 1.0, 4.0 / 5.0, 9.0 / 16.0, 3.2] {
                assert_aspect_locked(w, h, aspect);
            }
        }
    }

    #[test]
    fn initial_crop_is_idempotent() {
        let a = compute_initial_crop(1234, 777, AspectRatio::of(16, 9).unwrap());
        let b = compute_initial_crop(1234, 777, AspectRatio::of(16, 9).unwrap());
        assert_eq!(a, b);
    }

    // =========================================================================
    // scale_factors / output_buffer_size tests
    // =========================================================================

    #[test]
    fn scale_factors_from_display_size() {
        let (sx, sy) = scale_factors(Dimensions::new(800, 600), Dimensions::new(400, 300));
        assert_eq!((sx, sy), (2.0, 2.0));

        let (sx, sy) = scale_factors(Dimensions::new(800, 600), Dimensions::new(1600, 300));
        assert_eq!((sx, sy), (0.5, 2.0));
    }

    #[test]
    fn buffer_size_floors_each_axis() {
        // 400x225 displayed crop, 2x scale, 2x density → 1600x900
        let out = output_buffer_size(Rect::new(0.0, 37.5, 400.0, 225.0), (2.0, 2.0), 2.0);
        assert_eq!(out, Dimensions::new(1600, 900));

        // Fractional products floor down
        let out = output_buffer_size(Rect::new(0.0, 0.0, 3.0, 3.0), (1.3, 1.3), 1.0);
        assert_eq!(out, Dimensions::new(3, 3)); // 3.9 → 3

        let out = output_buffer_size(Rect::new(0.0, 0.0, 99.9, 100.1), (1.0, 1.0), 1.0);
        assert_eq!(out, Dimensions::new(99, 100));
    }

    #[test]
    fn buffer_size_can_floor_to_zero() {
        // A sub-pixel product must produce a zero axis, not round up
        let out = output_buffer_size(Rect::new(0.0, 0.0, 3.0, 3.0), (0.2, 0.2), 1.0);
        assert_eq!(out, Dimensions::new(0, 0));
    }
}
