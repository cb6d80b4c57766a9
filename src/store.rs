//! Role-keyed image stores.
//!
//! The rasterizer's sink: `set(role, image)` with last-write-wins semantics.
//! [`MemoryStore`] is the plain in-process mapping; [`PersistedStore`] adds a
//! durable JSON manifest with an explicit [`rehydrate`](PersistedStore::rehydrate)
//! step — a freshly constructed store is empty until told to load, so
//! consumers control when disk state becomes visible.
//!
//! ## Manifest format
//!
//! The manifest is a small JSON file mapping role names to `data:` URIs:
//!
//! ```json
//! { "version": 1, "entries": { "cover": "data:image/jpeg;base64,..." } }
//! ```
//!
//! The version field guards the format: a manifest written by an
//! incompatible build is ignored and the store starts empty rather than
//! misreading it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::profile::ImageRole;
use crate::source::EncodedImage;

/// Version of the manifest format. Bump to invalidate existing files when
/// the layout changes.
const MANIFEST_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sink for finished crops. One value per role; setting a role again
/// unconditionally overwrites the previous value.
pub trait ImageSink {
    fn set(&mut self, role: ImageRole, image: EncodedImage);
}

/// In-memory role store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<ImageRole, EncodedImage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: ImageRole) -> Option<&EncodedImage> {
        self.entries.get(&role)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ImageSink for MemoryStore {
    fn set(&mut self, role: ImageRole, image: EncodedImage) {
        self.entries.insert(role, image);
    }
}

/// On-disk manifest: role name → data URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreManifest {
    version: u32,
    entries: BTreeMap<String, String>,
}

impl Default for StoreManifest {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// Durable role store backed by a JSON manifest.
///
/// Construction does not read the file — call
/// [`rehydrate`](Self::rehydrate) to load what was persisted, and
/// [`save`](Self::save) to write the current state back.
#[derive(Debug)]
pub struct PersistedStore {
    path: PathBuf,
    manifest: StoreManifest,
}

impl PersistedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            manifest: StoreManifest::default(),
        }
    }

    /// Load persisted entries from disk, replacing the in-memory state.
    ///
    /// A missing file and a version-mismatched manifest both leave the store
    /// empty; only unreadable files and malformed JSON are errors.
    pub fn rehydrate(&mut self) -> Result<(), StoreError> {
        if !self.path.exists() {
            self.manifest = StoreManifest::default();
            return Ok(());
        }
        let raw = fs::read_to_string(&self.path)?;
        let manifest: StoreManifest = serde_json::from_str(&raw)?;
        if manifest.version != MANIFEST_VERSION {
            log::warn!(
                "discarding role store manifest {} (version {}, want {})",
                self.path.display(),
                manifest.version,
                MANIFEST_VERSION,
            );
            self.manifest = StoreManifest::default();
            return Ok(());
        }
        self.manifest = manifest;
        Ok(())
    }

    /// Write the current entries to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.manifest)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Decode the stored image for a role, if any. Entries that fail to
    /// parse (hand-edited manifests) read as absent.
    pub fn get(&self, role: ImageRole) -> Option<EncodedImage> {
        let uri = self.manifest.entries.get(role.as_str())?;
        EncodedImage::from_data_uri(uri).ok()
    }

    /// Role names with a stored entry, plus the entry's byte size.
    pub fn entries(&self) -> Vec<(String, usize)> {
        self.manifest
            .entries
            .iter()
            .map(|(role, uri)| {
                let size = EncodedImage::from_data_uri(uri)
                    .map(|img| img.bytes().len())
                    .unwrap_or(0);
                (role.clone(), size)
            })
            .collect()
    }
}

impl ImageSink for PersistedStore {
    fn set(&mut self, role: ImageRole, image: EncodedImage) {
        self.manifest
            .entries
            .insert(role.as_str().to_string(), image.to_data_uri());
    }
}
