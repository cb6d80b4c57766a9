//! File loading boundary.
//!
//! Turns a user-selected file into a decodable [`ImageSource`] plus the
//! `data:` URI equivalent. The boundary is deliberately quiet: no file chosen
//! is a no-op, and an unreadable or non-image file is swallowed with a
//! warn-level log — the only observable effect is that the displayed source
//! never updates. [`read_image`] is the strict inner path for callers that do
//! want the error.
//!
//! ## Cancellation
//!
//! Loads are asynchronous from the pipeline's point of view: a selection is
//! *begun*, and its result arrives later. [`LoadSequencer`] stamps every
//! selection with a generation ticket; a completion carrying a stale ticket
//! is discarded, so a superseded read can never overwrite newer state no
//! matter how late its callback fires.

use base64::{Engine as _, engine::general_purpose};
use std::path::Path;
use thiserror::Error;

use crate::source::ImageSource;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a supported image format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to decode image: {0}")]
    Decode(String),
}

/// A successfully loaded selection.
#[derive(Debug)]
pub struct LoadedImage {
    pub source: ImageSource,
    /// The file's bytes as a `data:` URI, for consumers that display the
    /// original rather than the decoded pixels.
    pub data_uri: String,
}

/// Read and decode an image file.
pub fn read_image(path: &Path) -> Result<LoadedImage, LoadError> {
    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes)
        .map_err(|e| LoadError::UnsupportedFormat(e.to_string()))?;
    let mime = format.to_mime_type();

    let decoded = image::load_from_memory(&bytes).map_err(|e| LoadError::Decode(e.to_string()))?;
    let data_uri = format!(
        "data:{mime};base64,{}",
        general_purpose::STANDARD.encode(&bytes)
    );

    Ok(LoadedImage {
        source: ImageSource::from_decoded(decoded),
        data_uri,
    })
}

/// The user-facing selection boundary: `None` (picker dismissed), unreadable
/// files, and non-image files all yield `None` without surfacing an error.
pub fn select_file(path: Option<&Path>) -> Option<LoadedImage> {
    let path = path?;
    match read_image(path) {
        Ok(loaded) => Some(loaded),
        Err(err) => {
            log::warn!("ignoring selection {}: {err}", path.display());
            None
        }
    }
}

/// Generation stamp for one in-flight selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Issues tickets and decides which completion is still current.
#[derive(Debug, Default)]
pub struct LoadSequencer {
    current: u64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection, invalidating every earlier ticket.
    pub fn begin(&mut self) -> LoadTicket {
        self.current += 1;
        LoadTicket(self.current)
    }

    /// Whether a completion with this ticket may still apply.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.current
    }
}
