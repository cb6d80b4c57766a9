//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! Display is information-centric: the primary line names the semantic
//! result (role, crop, dimensions), with file paths as indented context.

use std::path::Path;

use crate::cropping::{CropRegion, Dimensions};
use crate::profile::AspectProfile;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format the inspect view: natural size, role aspect, and the initial crop
/// in both unit spaces.
pub fn format_inspect(
    image: &Path,
    natural: Dimensions,
    profile: AspectProfile,
    region: CropRegion,
) -> Vec<String> {
    let r = region.rect();
    let px = region.to_pixels(natural);
    vec![
        format!("{} ({})", image.display(), natural),
        format!(
            "{}Role: {} (aspect {:.4})",
            indent(1),
            profile.role(),
            profile.aspect().value()
        ),
        format!(
            "{}Initial crop: {:.2}% x {:.2}% at ({:.2}%, {:.2}%)",
            indent(1),
            r.width,
            r.height,
            r.x,
            r.y
        ),
        format!(
            "{}In pixels: {:.0}x{:.0} at ({:.0}, {:.0})",
            indent(1),
            px.width,
            px.height,
            px.x,
            px.y
        ),
    ]
}

/// Format the result of a crop-and-store run.
pub fn format_crop_result(
    profile: AspectProfile,
    image: &Path,
    buffer: Dimensions,
    encoded_bytes: usize,
    store: &Path,
) -> Vec<String> {
    vec![
        format!("{} ← {}", profile.role(), image.display()),
        format!("{}Buffer: {}", indent(1), buffer),
        format!("{}Encoded: {} bytes (image/jpeg)", indent(1), encoded_bytes),
        format!("{}Store: {}", indent(1), store.display()),
    ]
}

/// Format the role-store listing.
pub fn format_roles(entries: &[(String, usize)]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No stored roles".to_string()];
    }
    entries
        .iter()
        .map(|(role, size)| format!("{role} ({size} bytes)"))
        .collect()
}

pub fn print_inspect(
    image: &Path,
    natural: Dimensions,
    profile: AspectProfile,
    region: CropRegion,
) {
    for line in format_inspect(image, natural, profile, region) {
        println!("{line}");
    }
}

pub fn print_crop_result(
    profile: AspectProfile,
    image: &Path,
    buffer: Dimensions,
    encoded_bytes: usize,
    store: &Path,
) {
    for line in format_crop_result(profile, image, buffer, encoded_bytes, store) {
        println!("{line}");
    }
}

pub fn print_roles(entries: &[(String, usize)]) {
    for line in format_roles(entries) {
        println!("{line}");
    }
}
