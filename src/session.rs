//! Interactive crop session state machine.
//!
//! The session tracks the live crop region independently of any rendering.
//! Interaction sources (file picker, overlay gestures) do not mutate state
//! directly — they emit [`SessionCommand`]s consumed by a single
//! [`apply`](CropSession::apply) entry point, which keeps every transition
//! observable and testable.
//!
//! ```text
//! NoImage → AwaitingInitialCrop → Interacting ⇄ Settled
//! ```
//!
//! `Reset` (a new file selection) forces any state back to `NoImage`;
//! `Settle` is the only transition that commits a region for rasterization.

use crate::cropping::{AspectRatio, CropRegion, Dimensions, Rect, compute_initial_crop};

/// Where the session is in the crop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No image source selected, or a selection just replaced the old one.
    NoImage,
    /// A source has arrived but the solver hasn't seeded a region yet.
    /// The region is unset here — a stale overlay must never show on a
    /// freshly selected image.
    AwaitingInitialCrop,
    /// The user is dragging/resizing the region.
    Interacting,
    /// The user stopped interacting and the region was committed.
    Settled,
}

/// Commands driving the session. Each maps to one interaction event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionCommand {
    /// A new file was selected: clear the region, drop back to `NoImage`.
    Reset,
    /// The selected file produced a decodable source (not yet laid out).
    SourceArrived,
    /// The image finished loading with these natural dimensions: run the
    /// solver and install the initial region.
    ImageReady(Dimensions),
    /// The user moved or resized the region. Taken as-is — the overlay
    /// enforces the aspect lock, the session does not re-validate.
    Adjust(CropRegion),
    /// The user stopped interacting; the finalized absolute-pixel region
    /// should be committed.
    Settle(Rect),
}

/// Mutable crop state for one pipeline instance.
#[derive(Debug)]
pub struct CropSession {
    aspect: AspectRatio,
    state: SessionState,
    region: Option<CropRegion>,
}

impl CropSession {
    pub fn new(aspect: AspectRatio) -> Self {
        Self {
            aspect,
            state: SessionState::NoImage,
            region: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The live region, or `None` between a reset and the next solver run.
    pub fn region(&self) -> Option<CropRegion> {
        self.region
    }

    /// Apply one command. Returns the committed pixel rect for `Settle` when
    /// the session is in a state that can commit; `None` otherwise.
    ///
    /// A `Settle` before any image is ready is ignored here — the pipeline
    /// surfaces it as a missing-source error, since it can only come from a
    /// sequencing defect.
    pub fn apply(&mut self, command: SessionCommand) -> Option<Rect> {
        match command {
            SessionCommand::Reset => {
                self.region = None;
                self.state = SessionState::NoImage;
                None
            }
            SessionCommand::SourceArrived => {
                self.region = None;
                self.state = SessionState::AwaitingInitialCrop;
                None
            }
            SessionCommand::ImageReady(natural) => {
                self.region =
                    Some(compute_initial_crop(natural.width, natural.height, self.aspect));
                self.state = SessionState::Interacting;
                None
            }
            SessionCommand::Adjust(region) => {
                self.region = Some(region);
                self.state = SessionState::Interacting;
                None
            }
            SessionCommand::Settle(rect) => match self.state {
                SessionState::Interacting | SessionState::Settled => {
                    self.state = SessionState::Settled;
                    Some(rect)
                }
                SessionState::NoImage | SessionState::AwaitingInitialCrop => None,
            },
        }
    }
}
