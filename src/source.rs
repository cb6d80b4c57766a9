//! Image sources and encoded results.
//!
//! [`ImageSource`] is the decoded handle flowing into the pipeline: intrinsic
//! (natural) dimensions are fixed at decode time, while the displayed
//! dimensions are attached only once the image has been laid out on screen.
//! [`EncodedImage`] is what comes out the other end — a self-contained byte
//! sequence with an explicit MIME type, ready for a role store or a `data:`
//! URI.

use base64::{Engine as _, engine::general_purpose};
use image::DynamicImage;

use crate::cropping::Dimensions;

/// A decoded image plus its two dimension pairs.
///
/// Natural dimensions never change after decode. Displayed dimensions are
/// `None` until [`set_displayed`](Self::set_displayed) is called — the
/// rasterizer refuses to run before then. A new file selection replaces the
/// whole source; stale pixel data is never reused.
#[derive(Debug, Clone)]
pub struct ImageSource {
    image: DynamicImage,
    natural: Dimensions,
    displayed: Option<Dimensions>,
}

impl ImageSource {
    /// Wrap a decoded image. Natural dimensions are taken from the pixels.
    pub fn from_decoded(image: DynamicImage) -> Self {
        let natural = Dimensions::new(image.width(), image.height());
        Self {
            image,
            natural,
            displayed: None,
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn natural(&self) -> Dimensions {
        self.natural
    }

    pub fn displayed(&self) -> Option<Dimensions> {
        self.displayed
    }

    /// Record the on-screen render size. Called once layout has happened;
    /// may be called again if the image is re-laid-out at a new size.
    pub fn set_displayed(&mut self, dims: Dimensions) {
        self.displayed = Some(dims);
    }
}

/// An encoded still image with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    mime: String,
}

impl EncodedImage {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Render as a `data:` URI (base64 payload).
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Parse a `data:<mime>;base64,<payload>` URI back into bytes + MIME.
    pub fn from_data_uri(uri: &str) -> Result<Self, String> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| "missing data: scheme".to_string())?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| "missing ;base64, separator".to_string())?;
        let bytes = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| format!("bad base64 payload: {e}"))?;
        Ok(Self::new(bytes, mime))
    }
}
