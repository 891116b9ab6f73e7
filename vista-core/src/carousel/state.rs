use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, trace, warn};
use vista_model::{GalleryItem, GalleryItemId};

use super::assets::{AssetResolver, AssetView};
use super::autoplay::{AutoplayScheduler, TickScheduler, TimerId};
use super::gesture::{GestureRecognizer, Swipe};
use super::overlay::{OverlayController, ZoomState};
use crate::config::CarouselConfig;

/// Navigation direction for `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Top-level lifecycle of one mount.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Error(String),
    Ready,
}

/// Identity of one widget mount. Results addressed to an earlier mount are
/// dropped after a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(u64);

impl MountId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        MountId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Carousel state for one widget mount: current index, autoplay, asset
/// fallbacks, the zoom overlay and the in-flight touch gesture.
#[derive(Debug)]
pub struct CarouselState {
    mount_id: MountId,
    mounted: bool,
    phase: LoadPhase,
    items: Vec<GalleryItem>,
    current_index: usize,
    autoplay: AutoplayScheduler,
    assets: AssetResolver,
    overlay: OverlayController,
    gesture: GestureRecognizer,
    autoplay_on_load: bool,
    pause_autoplay_on_zoom: bool,
}

impl CarouselState {
    /// Create an empty state in the `Loading` phase.
    pub fn new(config: &CarouselConfig, scheduler: Box<dyn TickScheduler>) -> Self {
        Self {
            mount_id: MountId::next(),
            mounted: true,
            phase: LoadPhase::Loading,
            items: Vec::new(),
            current_index: 0,
            autoplay: AutoplayScheduler::new(scheduler, config.autoplay_interval()),
            assets: AssetResolver::new(),
            overlay: OverlayController::new(),
            gesture: GestureRecognizer::new(config.swipe_threshold_px),
            autoplay_on_load: config.autoplay_on_load,
            pause_autoplay_on_zoom: config.pause_autoplay_on_zoom,
        }
    }

    pub fn mount_id(&self) -> MountId {
        self.mount_id
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// `None` until the gallery is ready, and for an empty gallery.
    pub fn current_index(&self) -> Option<usize> {
        (self.is_ready() && !self.items.is_empty()).then_some(self.current_index)
    }

    pub fn current_item(&self) -> Option<&GalleryItem> {
        self.current_index().and_then(|index| self.items.get(index))
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay.is_enabled()
    }

    pub fn autoplay_timer(&self) -> Option<TimerId> {
        self.autoplay.state().timer_id()
    }

    /// Arrows, dots and the autoplay toggle only exist for galleries with
    /// more than one item.
    pub fn has_navigation(&self) -> bool {
        self.is_ready() && self.items.len() > 1
    }

    pub fn item(&self, id: GalleryItemId) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: GalleryItemId) -> bool {
        self.item(id).is_some()
    }

    /// Install the loaded sequence. Only the first result of a mount is
    /// accepted; the sequence is read-only afterwards.
    pub fn load(&mut self, items: Vec<GalleryItem>) {
        if self.phase != LoadPhase::Loading {
            warn!(phase = ?self.phase, "ignoring gallery load outside the loading phase");
            return;
        }
        self.items = items;
        self.current_index = 0;
        self.phase = LoadPhase::Ready;
        info!(items = self.items.len(), "gallery ready");

        if self.autoplay_on_load && self.has_navigation() {
            self.autoplay.start();
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        if self.phase != LoadPhase::Loading {
            warn!(phase = ?self.phase, "ignoring load failure outside the loading phase");
            return;
        }
        let message = message.into();
        warn!(%message, "gallery failed to load");
        self.phase = LoadPhase::Error(message);
    }

    /// Manual navigation with wraparound. Always stops autoplay.
    pub fn advance(&mut self, direction: Direction) {
        if !self.has_navigation() {
            trace!(?direction, "advance ignored: nothing to navigate");
            return;
        }
        self.autoplay.stop();
        self.step(direction);
    }

    /// Select a slide directly. Out-of-range indices are ignored. Always
    /// stops autoplay.
    pub fn jump_to(&mut self, index: usize) {
        if !self.has_navigation() {
            trace!(index, "jump ignored: nothing to navigate");
            return;
        }
        if index >= self.items.len() {
            trace!(index, len = self.items.len(), "jump ignored: index out of range");
            return;
        }
        self.autoplay.stop();
        if index != self.current_index {
            debug!(from = self.current_index, to = index, "carousel index changed");
        }
        self.current_index = index;
    }

    /// Flip autoplay without moving. Turning on restarts the cadence from
    /// zero elapsed time.
    pub fn toggle_autoplay(&mut self) {
        if !self.has_navigation() {
            trace!("autoplay toggle ignored: nothing to navigate");
            return;
        }
        if self.autoplay.is_enabled() {
            self.autoplay.stop();
        } else {
            self.autoplay.start();
        }
    }

    /// Tick from the autoplay timer. Advances without touching the autoplay
    /// flag; ticks from a timer that is no longer live are dropped.
    pub fn autoplay_tick(&mut self, timer: TimerId) -> bool {
        if !self.autoplay.accepts(timer) {
            trace!(%timer, "dropping stale autoplay tick");
            return false;
        }
        if !self.has_navigation() {
            return false;
        }
        self.step(Direction::Next);
        true
    }

    fn step(&mut self, direction: Direction) {
        let len = self.items.len();
        let previous = self.current_index;
        self.current_index = match direction {
            Direction::Next => (previous + 1) % len,
            Direction::Previous => (previous + len - 1) % len,
        };
        debug!(from = previous, to = self.current_index, ?direction, "carousel index changed");
    }

    /// Open the zoom overlay on an item of the current sequence.
    pub fn open_zoom(&mut self, id: GalleryItemId) -> bool {
        if !self.is_ready() || !self.contains(id) {
            trace!(%id, "zoom ignored: item not in gallery");
            return false;
        }
        let suspend =
            self.pause_autoplay_on_zoom && !self.overlay.is_active() && self.autoplay.is_enabled();
        if suspend {
            self.autoplay.stop();
        }
        // Touch samples taken before the overlay opened must not complete
        // a swipe after it closes.
        self.gesture.reset();
        self.overlay.open(id, self.current_index, suspend);
        debug!(%id, "zoom opened");
        true
    }

    /// Close the overlay. `current_index` is untouched; a suspended autoplay
    /// resumes.
    pub fn close_zoom(&mut self) {
        let Some(zoom) = self.overlay.close() else {
            return;
        };
        debug!(id = %zoom.item, "zoom closed");
        if zoom.resume_autoplay && self.has_navigation() {
            self.autoplay.start();
        }
    }

    pub fn zoom(&self) -> Option<&ZoomState> {
        self.overlay.zoom()
    }

    pub fn is_zoomed(&self) -> bool {
        self.overlay.is_active()
    }

    pub fn zoomed_item(&self) -> Option<&GalleryItem> {
        self.overlay.zoomed_item().and_then(|id| self.item(id))
    }

    /// The item's primary source failed to render. Idempotent; ids outside
    /// the current sequence are ignored.
    pub fn record_asset_failure(&mut self, id: GalleryItemId) -> bool {
        if !self.contains(id) {
            trace!(%id, "asset failure for unknown item ignored");
            return false;
        }
        let switched = self.assets.record_primary_failure(id);
        if switched {
            warn!(%id, "primary asset failed, switching to fallback");
        }
        switched
    }

    /// The fallback source failed too; the item renders as broken.
    pub fn record_fallback_failure(&mut self, id: GalleryItemId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let broken = self.assets.record_fallback_failure(id);
        if broken {
            warn!(%id, "fallback asset failed, item is broken");
        }
        broken
    }

    pub fn resolve_asset(&self, item: &GalleryItem) -> AssetView {
        self.assets.resolve(item)
    }

    pub fn failed_primary_count(&self) -> usize {
        self.assets.failed_primary().len()
    }

    pub fn is_primary_failed(&self, id: GalleryItemId) -> bool {
        self.assets.is_primary_failed(&id)
    }

    pub fn touch_start(&mut self, x: f32) {
        self.gesture.begin(x);
    }

    pub fn touch_move(&mut self, x: f32) {
        self.gesture.update(x);
    }

    /// Complete the touch gesture and navigate if it was a swipe.
    pub fn touch_end(&mut self) -> Option<Swipe> {
        let swipe = self.gesture.finish();
        if let Some(swipe) = swipe {
            trace!(?swipe, "swipe recognized");
            self.advance(swipe.direction());
        }
        swipe
    }

    pub fn cancel_touch(&mut self) {
        self.gesture.reset();
    }

    /// Unmount path: the timer is cancelled before anything else.
    pub fn teardown(&mut self) {
        self.autoplay.stop();
        self.gesture.reset();
        if self.mounted {
            info!(items = self.items.len(), "carousel unmounted");
        }
        self.mounted = false;
    }
}
