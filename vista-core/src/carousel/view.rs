//! Render snapshot of a carousel mount.
//!
//! The host renders whatever the latest `CarouselView` says; it holds no
//! state of its own besides the view.

use chrono::{DateTime, Utc};
use vista_model::GalleryItemId;

use super::assets::AssetView;
use super::state::{CarouselState, LoadPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PhaseView {
    #[default]
    Loading,
    /// Whole-widget error with a reload affordance.
    Error { message: String },
    /// Ready, but there is nothing to show.
    Empty,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideView {
    pub id: GalleryItemId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub asset: AssetView,
    pub active: bool,
}

/// Which navigation affordances are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlsView {
    pub arrows: bool,
    pub dots: bool,
    pub autoplay_toggle: bool,
}

/// Detail view of the zoomed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub id: GalleryItemId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub external_reference_id: String,
    pub created_at: DateTime<Utc>,
    pub asset: AssetView,
    pub can_download: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CarouselView {
    pub phase: PhaseView,
    pub slides: Vec<SlideView>,
    /// Slide shown by the base carousel. Frozen while the overlay is open.
    pub displayed_index: Option<usize>,
    pub autoplay_enabled: bool,
    pub controls: ControlsView,
    pub overlay: Option<OverlayView>,
}

impl CarouselView {
    pub fn active_slide(&self) -> Option<&SlideView> {
        self.displayed_index.and_then(|index| self.slides.get(index))
    }
}

impl CarouselState {
    /// Build the render snapshot for the current state.
    pub fn view(&self) -> CarouselView {
        let phase = match self.phase() {
            LoadPhase::Loading => PhaseView::Loading,
            LoadPhase::Error(message) => PhaseView::Error {
                message: message.clone(),
            },
            LoadPhase::Ready if self.items().is_empty() => PhaseView::Empty,
            LoadPhase::Ready => PhaseView::Ready,
        };
        if phase != PhaseView::Ready {
            return CarouselView {
                phase,
                ..CarouselView::default()
            };
        }

        let displayed_index = self
            .zoom()
            .map(|zoom| zoom.frozen_index)
            .or(self.current_index());

        let slides = self
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| SlideView {
                id: item.id,
                title: item.title.clone(),
                description: item.description.clone(),
                category: item.category.clone(),
                asset: self.resolve_asset(item),
                active: Some(index) == displayed_index,
            })
            .collect();

        let navigation = self.has_navigation();
        let overlay = self.zoomed_item().map(|item| {
            let asset = self.resolve_asset(item);
            OverlayView {
                id: item.id,
                title: item.title.clone(),
                description: item.description.clone(),
                category: item.category.clone(),
                external_reference_id: item.external_reference_id.clone(),
                created_at: item.created_at,
                can_download: !asset.is_broken(),
                asset,
            }
        });

        CarouselView {
            phase,
            slides,
            displayed_index,
            autoplay_enabled: self.autoplay_enabled(),
            controls: ControlsView {
                arrows: navigation,
                dots: navigation,
                autoplay_toggle: navigation,
            },
            overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::autoplay::ManualTickScheduler;
    use crate::config::CarouselConfig;
    use crate::demo::placeholder_items;

    fn state() -> CarouselState {
        CarouselState::new(
            &CarouselConfig::default(),
            Box::new(ManualTickScheduler::new()),
        )
    }

    #[test]
    fn loading_and_error_views_have_no_slides() {
        let mut state = state();
        assert_eq!(state.view().phase, PhaseView::Loading);
        state.fail("boom");
        let view = state.view();
        assert_eq!(
            view.phase,
            PhaseView::Error {
                message: "boom".into()
            }
        );
        assert!(view.slides.is_empty());
    }

    #[test]
    fn single_item_hides_every_control() {
        let mut state = state();
        state.load(placeholder_items().into_iter().take(1).collect());
        let view = state.view();
        assert_eq!(view.controls, ControlsView::default());
        assert!(!view.autoplay_enabled);
        assert_eq!(view.displayed_index, Some(0));
    }

    #[test]
    fn zoom_freezes_displayed_slide() {
        let mut state = state();
        state.load(placeholder_items());
        let timer = state.autoplay_timer().expect("running");
        let id = state.items()[0].id;
        state.open_zoom(id);
        state.autoplay_tick(timer);

        let view = state.view();
        assert_eq!(view.displayed_index, Some(0));
        assert!(view.slides[0].active);
        let overlay = view.overlay.expect("overlay");
        assert_eq!(overlay.id, id);
        assert!(overlay.can_download);

        state.close_zoom();
        assert_eq!(state.view().displayed_index, Some(1));
    }

    #[test]
    fn overlay_reflects_later_asset_failures() {
        let mut state = state();
        state.load(placeholder_items());
        let id = state.items()[1].id;
        state.open_zoom(id);
        state.record_asset_failure(id);

        let overlay = state.view().overlay.expect("overlay");
        assert!(matches!(overlay.asset, AssetView::Fallback(_)));
    }
}
