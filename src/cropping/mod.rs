//! Crop geometry — pure math, no pixels.
//!
//! The module is split into:
//! - **Region**: unit-tagged rectangles and the small value types around them
//! - **Calculations**: pure functions for the initial aspect-locked crop and
//!   the displayed→natural→output coordinate mapping
//!
//! Everything downstream (session, rasterizer) consumes these types; nothing
//! here touches an image.

mod calculations;
mod region;

pub use calculations::{compute_initial_crop, output_buffer_size, scale_factors};
pub use region::{AspectRatio, CropRegion, Dimensions, PixelDensity, Rect, Unit};
