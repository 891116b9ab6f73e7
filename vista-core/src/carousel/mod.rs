//! Carousel interaction engine.
//!
//! `CarouselState` owns the item sequence and arbitrates four input sources
//! (autoplay ticks, touch gestures, discrete controls and image-load
//! callbacks) into index transitions. All mutation goes through
//! [`update`], one message at a time; rendering reads [`CarouselView`]
//! snapshots.

pub mod assets;
pub mod autoplay;
pub mod gesture;
pub mod messages;
pub mod overlay;
pub mod state;
pub mod update;
pub mod view;

pub use assets::{AssetResolver, AssetView};
pub use autoplay::{
    Autoplay, AutoplayScheduler, ManualTickScheduler, TickScheduler,
    TimerHandle, TimerId,
};
pub use gesture::{GestureRecognizer, Swipe};
pub use messages::CarouselMessage;
pub use overlay::{OverlayController, ZoomState};
pub use state::{CarouselState, Direction, LoadPhase, MountId};
pub use update::{Effect, update};
pub use view::{CarouselView, ControlsView, OverlayView, PhaseView, SlideView};
