//! Value types for crop geometry.
//!
//! These types describe *where* to crop, not *how* to render it. They are the
//! interface between the solver (which proposes regions), the session (which
//! tracks the live region), and the rasterizer (which consumes a finalized
//! pixel rectangle). Keeping them plain data allows every consumer to be
//! tested without touching pixels.
//!
//! ## Types
//!
//! - [`Dimensions`] — integer width × height of an image or buffer.
//! - [`Rect`] — floating-point rectangle; width/height clamped non-negative on construction.
//! - [`CropRegion`] — a [`Rect`] carrying an explicit unit tag (percent-of-image or absolute pixels).
//! - [`AspectRatio`] — positive width/height ratio, parseable from `"16:9"` or a bare number.
//! - [`PixelDensity`] — physical-to-logical pixel ratio of the rendering surface (default 1.0).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer dimensions of an image or pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = String;

    /// Parse `"WIDTHxHEIGHT"`, e.g. `"400x300"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = w.trim().parse().map_err(|_| format!("bad width in '{s}'"))?;
        let height = h.trim().parse().map_err(|_| format!("bad height in '{s}'"))?;
        Ok(Self { width, height })
    }
}

/// An axis-aligned rectangle with floating-point coordinates.
///
/// Width and height are clamped to non-negative on construction; the origin
/// may be negative (an overlay can momentarily drag a region past an edge —
/// the rasterizer clamps to image bounds when sampling).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Width/height ratio. Returns `None` for a degenerate (zero-height) rect.
    pub fn aspect(&self) -> Option<f64> {
        (self.height > 0.0).then(|| self.width / self.height)
    }
}

impl FromStr for Rect {
    type Err = String;

    /// Parse `"x,y,width,height"`, e.g. `"0,37.5,400,225"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| format!("expected x,y,width,height, got '{s}'"))?;
        match parts[..] {
            [x, y, width, height] => Ok(Self::new(x, y, width, height)),
            _ => Err(format!("expected 4 comma-separated values, got '{s}'")),
        }
    }
}

/// Coordinate unit of a [`CropRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Percentage of the image's dimensions (0–100 per axis).
    Percent,
    /// Absolute pixels.
    Pixel,
}

/// A crop rectangle with an explicit unit tag.
///
/// Regions move between percent and pixel space as the image is displayed at
/// different sizes; the tag makes the current space unambiguous at every
/// hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropRegion {
    Percent(Rect),
    Pixel(Rect),
}

impl CropRegion {
    pub fn percent(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Percent(Rect::new(x, y, width, height))
    }

    pub fn pixel(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Pixel(Rect::new(x, y, width, height))
    }

    pub fn unit(&self) -> Unit {
        match self {
            Self::Percent(_) => Unit::Percent,
            Self::Pixel(_) => Unit::Pixel,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            Self::Percent(r) | Self::Pixel(r) => *r,
        }
    }

    /// Resolve the region to absolute pixels against the given dimensions.
    ///
    /// Pixel regions pass through unchanged; percent regions scale per axis.
    pub fn to_pixels(&self, bounds: Dimensions) -> Rect {
        match self {
            Self::Pixel(r) => *r,
            Self::Percent(r) => Rect::new(
                r.x / 100.0 * bounds.width as f64,
                r.y / 100.0 * bounds.height as f64,
                r.width / 100.0 * bounds.width as f64,
                r.height / 100.0 * bounds.height as f64,
            ),
        }
    }
}

/// A positive width/height aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Construct from a ratio value. Rejects non-finite and non-positive input.
    pub fn new(value: f64) -> Result<Self, String> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(format!("aspect ratio must be positive and finite, got {value}"))
        }
    }

    /// Construct from integer width:height terms.
    pub fn of(width: u32, height: u32) -> Result<Self, String> {
        if width == 0 || height == 0 {
            return Err("aspect ratio terms must be non-zero".into());
        }
        Self::new(width as f64 / height as f64)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    /// Parse `"16:9"`, `"1:1"`, or a bare number like `"1.5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((w, h)) = s.split_once(':') {
            let w: u32 = w.trim().parse().map_err(|_| format!("bad aspect '{s}'"))?;
            let h: u32 = h.trim().parse().map_err(|_| format!("bad aspect '{s}'"))?;
            Self::of(w, h)
        } else {
            let v: f64 = s.trim().parse().map_err(|_| format!("bad aspect '{s}'"))?;
            Self::new(v)
        }
    }
}

/// Ratio of physical to logical pixels on the rendering surface.
///
/// Exported crops are oversampled by this factor so they stay crisp on
/// high-density displays. Negative input is clamped to zero, which the
/// rasterizer rejects as an unusable (zero-sized) buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelDensity(f64);

impl PixelDensity {
    pub fn new(value: f64) -> Self {
        Self(value.max(0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for PixelDensity {
    fn default() -> Self {
        Self(1.0)
    }
}
