//! Zoom overlay ownership.

use vista_model::GalleryItemId;

/// An open zoom overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomState {
    /// Stored by id so re-rendering always reflects the item's current
    /// asset status.
    pub item: GalleryItemId,
    /// Index the base carousel keeps showing while the overlay is open.
    pub frozen_index: usize,
    /// Autoplay was suspended on open and must be restarted on close.
    pub resume_autoplay: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayController {
    zoomed: Option<ZoomState>,
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opening while already open only swaps the item; the frozen index and
    /// the resume decision of the first open are kept.
    pub fn open(
        &mut self,
        item: GalleryItemId,
        frozen_index: usize,
        resume_autoplay: bool,
    ) {
        match &mut self.zoomed {
            Some(zoom) => zoom.item = item,
            None => {
                self.zoomed = Some(ZoomState {
                    item,
                    frozen_index,
                    resume_autoplay,
                });
            }
        }
    }

    pub fn close(&mut self) -> Option<ZoomState> {
        self.zoomed.take()
    }

    pub fn is_active(&self) -> bool {
        self.zoomed.is_some()
    }

    pub fn zoom(&self) -> Option<&ZoomState> {
        self.zoomed.as_ref()
    }

    pub fn zoomed_item(&self) -> Option<GalleryItemId> {
        self.zoomed.map(|zoom| zoom.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopen_keeps_first_frozen_index() {
        let mut overlay = OverlayController::new();
        overlay.open(GalleryItemId::from_u128(1), 2, true);
        overlay.open(GalleryItemId::from_u128(2), 4, false);

        let zoom = overlay.zoom().copied().expect("open");
        assert_eq!(zoom.item, GalleryItemId::from_u128(2));
        assert_eq!(zoom.frozen_index, 2);
        assert!(zoom.resume_autoplay);
    }

    #[test]
    fn close_is_unconditional() {
        let mut overlay = OverlayController::new();
        assert!(overlay.close().is_none());
        overlay.open(GalleryItemId::from_u128(1), 0, false);
        assert!(overlay.close().is_some());
        assert!(!overlay.is_active());
    }
}
