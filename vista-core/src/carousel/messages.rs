//! Input events for one carousel mount.

use vista_model::{AssetOrigin, GalleryItemId};

use super::autoplay::TimerId;
use super::state::MountId;
use crate::loader::LoadOutcome;

#[derive(Debug, Clone)]
pub enum CarouselMessage {
    // Discrete controls
    Next,
    Previous,
    JumpTo(usize),
    ToggleAutoplay,

    // Timer
    AutoplayTick(TimerId),

    // Touch
    TouchStart(f32),
    TouchMove(f32),
    TouchEnd,
    TouchCancel,

    // Image load callbacks
    AssetFailed {
        item: GalleryItemId,
        origin: AssetOrigin,
    },

    // Overlay
    OpenZoom(GalleryItemId),
    CloseZoom,
    Download,

    // Lifecycle
    Loaded {
        mount: MountId,
        outcome: LoadOutcome,
    },
    Reload,
    Unmount,
}

impl CarouselMessage {
    /// Inputs that belong to the base carousel and are swallowed while the
    /// zoom overlay is open.
    pub fn is_base_input(&self) -> bool {
        matches!(
            self,
            CarouselMessage::Next
                | CarouselMessage::Previous
                | CarouselMessage::JumpTo(_)
                | CarouselMessage::ToggleAutoplay
                | CarouselMessage::TouchStart(_)
                | CarouselMessage::TouchMove(_)
                | CarouselMessage::TouchEnd
                | CarouselMessage::OpenZoom(_)
        )
    }
}
