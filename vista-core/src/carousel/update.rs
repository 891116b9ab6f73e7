//! Single mutation entry point for carousel state.

use tracing::trace;
use vista_model::AssetOrigin;

use super::messages::CarouselMessage;
use super::state::{CarouselState, Direction};
use crate::download::DownloadRequest;
use crate::loader::LoadOutcome;

/// Follow-up work the host runtime performs after a message was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Save the zoomed item's asset to disk.
    Download(DownloadRequest),
    /// State was torn down; mount a fresh one and load again.
    Reload,
    /// State was torn down for good.
    Shutdown,
}

/// Apply one message. Messages are processed strictly one at a time in
/// arrival order, so every mutation sees the result of the previous one.
pub fn update(state: &mut CarouselState, message: CarouselMessage) -> Effect {
    if !state.is_mounted() {
        trace!(?message, "message after unmount ignored");
        return Effect::None;
    }

    if state.is_zoomed() && message.is_base_input() {
        trace!(?message, "base carousel input ignored while zoomed");
        return Effect::None;
    }

    match message {
        CarouselMessage::Next => state.advance(Direction::Next),
        CarouselMessage::Previous => state.advance(Direction::Previous),
        CarouselMessage::JumpTo(index) => state.jump_to(index),
        CarouselMessage::ToggleAutoplay => state.toggle_autoplay(),

        CarouselMessage::AutoplayTick(timer) => {
            state.autoplay_tick(timer);
        }

        CarouselMessage::TouchStart(x) => state.touch_start(x),
        CarouselMessage::TouchMove(x) => state.touch_move(x),
        CarouselMessage::TouchEnd => {
            state.touch_end();
        }
        CarouselMessage::TouchCancel => state.cancel_touch(),

        CarouselMessage::AssetFailed { item, origin } => match origin {
            AssetOrigin::Primary => {
                state.record_asset_failure(item);
            }
            AssetOrigin::Fallback => {
                state.record_fallback_failure(item);
            }
        },

        CarouselMessage::OpenZoom(id) => {
            state.open_zoom(id);
        }
        CarouselMessage::CloseZoom => state.close_zoom(),
        CarouselMessage::Download => {
            return download_request(state).map_or(Effect::None, Effect::Download);
        }

        CarouselMessage::Loaded { mount, outcome } => {
            if mount != state.mount_id() {
                trace!(?mount, "dropping load result addressed to a previous mount");
                return Effect::None;
            }
            match outcome {
                LoadOutcome::Items(items) | LoadOutcome::Placeholder(items) => {
                    state.load(items);
                }
                LoadOutcome::Failed(message) => state.fail(message),
            }
        }

        CarouselMessage::Reload => {
            state.teardown();
            return Effect::Reload;
        }
        CarouselMessage::Unmount => {
            state.teardown();
            return Effect::Shutdown;
        }
    }

    Effect::None
}

fn download_request(state: &CarouselState) -> Option<DownloadRequest> {
    let item = state.zoomed_item()?;
    let asset = state.resolve_asset(item);
    let url = asset.url()?;
    Some(DownloadRequest::for_item(item, url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::autoplay::ManualTickScheduler;
    use crate::config::CarouselConfig;
    use crate::demo::placeholder_items;

    fn loaded() -> (CarouselState, ManualTickScheduler) {
        let manual = ManualTickScheduler::new();
        let mut state =
            CarouselState::new(&CarouselConfig::default(), Box::new(manual.clone()));
        let mount = state.mount_id();
        update(
            &mut state,
            CarouselMessage::Loaded {
                mount,
                outcome: LoadOutcome::Items(placeholder_items()),
            },
        );
        (state, manual)
    }

    #[test]
    fn load_result_for_other_mount_is_dropped() {
        let manual = ManualTickScheduler::new();
        let mut state =
            CarouselState::new(&CarouselConfig::default(), Box::new(manual));
        let other = CarouselState::new(
            &CarouselConfig::default(),
            Box::new(ManualTickScheduler::new()),
        )
        .mount_id();

        update(
            &mut state,
            CarouselMessage::Loaded {
                mount: other,
                outcome: LoadOutcome::Items(placeholder_items()),
            },
        );
        assert!(!state.is_ready());
    }

    #[test]
    fn failed_outcome_enters_error_phase() {
        let mut state = CarouselState::new(
            &CarouselConfig::default(),
            Box::new(ManualTickScheduler::new()),
        );
        let mount = state.mount_id();
        update(
            &mut state,
            CarouselMessage::Loaded {
                mount,
                outcome: LoadOutcome::Failed("connection refused".into()),
            },
        );
        assert_eq!(
            state.phase(),
            &crate::carousel::LoadPhase::Error("connection refused".into())
        );
    }

    #[test]
    fn zoom_swallows_navigation_but_not_ticks() {
        let (mut state, _) = loaded();
        let timer = state.autoplay_timer().expect("running");
        let id = state.items()[0].id;

        update(&mut state, CarouselMessage::OpenZoom(id));
        update(&mut state, CarouselMessage::Next);
        update(&mut state, CarouselMessage::JumpTo(2));
        update(&mut state, CarouselMessage::ToggleAutoplay);
        assert_eq!(state.current_index(), Some(0));
        assert!(state.autoplay_enabled());

        update(&mut state, CarouselMessage::AutoplayTick(timer));
        assert_eq!(state.current_index(), Some(1));
        assert_eq!(state.zoom().map(|zoom| zoom.frozen_index), Some(0));
    }

    #[test]
    fn download_uses_resolved_source() {
        let (mut state, _) = loaded();
        let item = state.items()[0].clone();

        assert_eq!(update(&mut state, CarouselMessage::Download), Effect::None);

        update(&mut state, CarouselMessage::OpenZoom(item.id));
        update(
            &mut state,
            CarouselMessage::AssetFailed {
                item: item.id,
                origin: AssetOrigin::Primary,
            },
        );
        match update(&mut state, CarouselMessage::Download) {
            Effect::Download(request) => {
                assert_eq!(request.url, item.fallback_source_url);
                assert_eq!(request.item_id, item.id);
            }
            other => panic!("expected download effect, got {other:?}"),
        }
    }

    #[test]
    fn broken_item_cannot_be_downloaded() {
        let (mut state, _) = loaded();
        let id = state.items()[2].id;
        update(&mut state, CarouselMessage::OpenZoom(id));
        for origin in [AssetOrigin::Primary, AssetOrigin::Fallback] {
            update(&mut state, CarouselMessage::AssetFailed { item: id, origin });
        }
        assert_eq!(update(&mut state, CarouselMessage::Download), Effect::None);
    }

    #[test]
    fn unmount_tears_down_and_ignores_later_messages() {
        let (mut state, manual) = loaded();
        assert_eq!(update(&mut state, CarouselMessage::Unmount), Effect::Shutdown);
        assert_eq!(manual.active_count(), 0);

        assert_eq!(update(&mut state, CarouselMessage::Next), Effect::None);
        assert_eq!(state.current_index(), Some(0));
    }

    #[test]
    fn reload_tears_down_current_mount() {
        let (mut state, manual) = loaded();
        assert_eq!(update(&mut state, CarouselMessage::Reload), Effect::Reload);
        assert_eq!(manual.active_count(), 0);
        assert!(!state.is_mounted());
    }

    #[test]
    fn touch_started_before_zoom_does_not_swipe_after_close() {
        let (mut state, _) = loaded();
        let target = state.items()[1].id;

        update(&mut state, CarouselMessage::TouchStart(300.0));
        update(&mut state, CarouselMessage::TouchMove(100.0));
        update(&mut state, CarouselMessage::OpenZoom(target));
        update(&mut state, CarouselMessage::CloseZoom);
        update(&mut state, CarouselMessage::TouchEnd);

        assert_eq!(state.current_index(), Some(0));
        assert!(state.autoplay_enabled());
    }
}
