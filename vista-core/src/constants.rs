//! Carousel constants
//!
//! Compiled defaults for carousel behaviour. `CarouselConfig` falls back to
//! these when a field is not overridden.

/// Autoplay cadence.
pub mod autoplay {
    /// Interval between automatic advances (ms).
    pub const INTERVAL_MS: u64 = 4_000;
    /// Whether a freshly loaded gallery starts in the playing state.
    pub const ENABLED_ON_LOAD: bool = true;
    /// Suspend the timer while the zoom overlay is open.
    pub const PAUSE_ON_ZOOM: bool = false;
}

/// Touch gesture recognition.
pub mod gesture {
    /// Minimum horizontal displacement (px) for a completed touch to count
    /// as a swipe. Anything at or below is a tap.
    pub const SWIPE_THRESHOLD_PX: f32 = 50.0;
}

/// Data-fetch contract.
pub mod fetch {
    /// Number of items requested from the data service.
    pub const PAGE_SIZE: usize = 12;
    /// Gallery collection endpoint, relative to the API base URL.
    pub const GALLERY_PATH: &str = "/api/v1/gallery";
    pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
}

/// Download action in the zoom overlay.
pub mod download {
    pub const DEFAULT_DIR: &str = "downloads";
    /// Used when the asset URL carries no usable extension.
    pub const DEFAULT_EXTENSION: &str = "jpg";
}
