//! # Cropkit
//!
//! Aspect-locked image cropping: pick an image, crop it to a role's fixed
//! aspect ratio, and export the selection as a full-resolution JPEG keyed by
//! that role ("cover" or "profile").
//!
//! # Architecture: One Pipeline Per Role
//!
//! Each [`pipeline::CropPipeline`] serves a single [`profile::AspectProfile`]
//! and moves an image through four stages:
//!
//! ```text
//! 1. Load     file       →  ImageSource     (decode, natural dimensions)
//! 2. Seed     layout     →  CropRegion      (centered, aspect-locked)
//! 3. Interact gestures   →  CropRegion      (session state machine)
//! 4. Settle   region     →  EncodedImage    (rasterize, store under role)
//! ```
//!
//! The stages are deliberately decoupled:
//!
//! - **Testability**: the solver and coordinate mapping are pure functions;
//!   the session consumes commands rather than being poked by UI callbacks;
//!   the rasterizer draws through a trait with a recording mock.
//! - **No stale state**: a new selection resets the crop before anything
//!   loads, and load completions carry generation tickets so a superseded
//!   read can never overwrite newer state.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`cropping`] | Pure crop geometry: unit-tagged regions, the initial-crop solver, coordinate mapping |
//! | [`session`] | Interactive crop state machine driven by a command stream |
//! | [`raster`] | Rasterization: displayed→natural mapping, density-scaled buffers, JPEG encode |
//! | [`source`] | Decoded image sources and encoded results (`data:` URI support) |
//! | [`loader`] | File-selection boundary with generation-ticketed cancellation |
//! | [`store`] | Role-keyed image stores: in-memory and JSON-persisted with explicit rehydrate |
//! | [`profile`] | Image roles and their aspect ratios, resolved once from config |
//! | [`pipeline`] | Wiring: loader → session → rasterizer → store |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI output formatting — pure format functions |
//!
//! # Design Decisions
//!
//! ## Explicit Coordinate Mapping
//!
//! Exports must be sharp at full resolution even though the user crops
//! against a scaled-down display of the image. The rasterizer therefore maps
//! twice, explicitly: the crop rectangle is scaled from displayed into
//! natural coordinates for the copy, and the output buffer is sized by the
//! same scale multiplied by the device pixel density (floored per axis).
//! Nothing relies on a drawing surface's transform state — the surface is
//! handed an exact source rectangle and an exact buffer size.
//!
//! ## Single-Owner Event Model
//!
//! All mutable state (session, source, store entries) has one owner and
//! changes only through `&mut self` calls applied one at a time. There are
//! no locks and no shared mutation. The only asynchronous edge — file
//! loading — is folded into this model with begin/complete calls and
//! generation tickets.
//!
//! ## JPEG-Only Export
//!
//! Exports are lossy JPEG at a configurable quality. Crops feed avatar and
//! banner slots where photographic content dominates; one format keeps the
//! store's `data:` URIs universally consumable.

pub mod config;
pub mod cropping;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod raster;
pub mod session;
pub mod source;
pub mod store;

pub use pipeline::{CropPipeline, ExportSettings};
pub use profile::{AspectProfile, ImageRole};
