//! Pipeline wiring: loader → session → rasterizer → role store.
//!
//! One [`CropPipeline`] serves one aspect profile. It owns the session and
//! the current image source, sequences load completions, and is the only
//! place a settled crop turns into a store write. All mutation happens
//! through `&mut self` — state has a single owner and events apply one at a
//! time, so no locking is involved anywhere.

use crate::config::CropConfig;
use crate::cropping::{CropRegion, Dimensions, PixelDensity, Rect};
use crate::loader::{LoadSequencer, LoadTicket};
use crate::profile::AspectProfile;
use crate::raster::{self, Quality, RasterError, RasterSurface};
use crate::session::{CropSession, SessionCommand, SessionState};
use crate::source::ImageSource;
use crate::store::ImageSink;

/// Resolved export settings for the rasterizer.
#[derive(Debug, Clone, Copy)]
pub struct ExportSettings {
    pub quality: Quality,
    pub density: PixelDensity,
}

impl ExportSettings {
    /// Build export settings from config values.
    pub fn from_config(config: &CropConfig) -> Self {
        Self {
            quality: Quality::new(config.export.quality),
            density: PixelDensity::new(config.export.density),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::from_config(&CropConfig::default())
    }
}

/// One image-acquisition → crop → export pipeline instance.
pub struct CropPipeline<S: RasterSurface> {
    profile: AspectProfile,
    export: ExportSettings,
    surface: S,
    session: CropSession,
    source: Option<ImageSource>,
    loads: LoadSequencer,
}

impl<S: RasterSurface> CropPipeline<S> {
    pub fn new(profile: AspectProfile, surface: S, export: ExportSettings) -> Self {
        Self {
            profile,
            export,
            surface,
            session: CropSession::new(profile.aspect()),
            source: None,
            loads: LoadSequencer::new(),
        }
    }

    pub fn profile(&self) -> AspectProfile {
        self.profile
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// The live crop region, unset between a new selection and the next
    /// solver run.
    pub fn region(&self) -> Option<CropRegion> {
        self.session.region()
    }

    pub fn source(&self) -> Option<&ImageSource> {
        self.source.as_ref()
    }

    /// A new file was selected. Clears the crop immediately (no stale overlay
    /// on the incoming image) and returns the ticket the eventual completion
    /// must present. The previous source stays displayed until the new one
    /// actually arrives — a failed read changes nothing.
    pub fn begin_selection(&mut self) -> LoadTicket {
        self.session.apply(SessionCommand::Reset);
        self.loads.begin()
    }

    /// A selection finished loading. Returns `false` when the ticket has been
    /// superseded by a newer selection — the stale result is discarded and no
    /// state changes.
    pub fn complete_load(&mut self, ticket: LoadTicket, source: ImageSource) -> bool {
        if !self.loads.is_current(ticket) {
            log::warn!("discarding stale image load for {}", self.profile.role());
            return false;
        }
        self.source = Some(source);
        self.session.apply(SessionCommand::SourceArrived);
        true
    }

    /// The current source was laid out at `displayed` size. Runs the solver
    /// and returns the seeded region; `None` when no source is loaded.
    pub fn display_at(&mut self, displayed: Dimensions) -> Option<CropRegion> {
        let source = self.source.as_mut()?;
        source.set_displayed(displayed);
        let natural = source.natural();
        self.session.apply(SessionCommand::ImageReady(natural));
        self.session.region()
    }

    /// Replace the live region with a user-driven candidate.
    pub fn adjust(&mut self, region: CropRegion) {
        self.session.apply(SessionCommand::Adjust(region));
    }

    /// The user stopped interacting: rasterize `region` (displayed-image
    /// pixels) and store the result under the profile's role.
    ///
    /// On any failure nothing is written — the store never sees a partial
    /// export.
    pub fn settle(&mut self, region: Rect, sink: &mut impl ImageSink) -> Result<(), RasterError> {
        let Some(committed) = self.session.apply(SessionCommand::Settle(region)) else {
            return Err(RasterError::MissingSource);
        };
        let source = self.source.as_ref().ok_or(RasterError::MissingSource)?;

        let encoded = raster::rasterize(
            source,
            committed,
            self.export.density,
            self.export.quality,
            &self.surface,
        )?;

        log::info!(
            "stored {} crop ({} bytes)",
            self.profile.role(),
            encoded.bytes().len(),
        );
        sink.set(self.profile.role(), encoded);
        Ok(())
    }
}
