//! Carousel configuration
//!
//! `CarouselConfig` is deserialized with `#[serde(default)]`, so partial
//! payloads only override the fields they name.

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::constants::{autoplay, download, fetch, gesture};
use crate::error::GalleryError;

/// Source that produced the carousel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Tunables for a carousel widget instance.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Time between automatic advances while autoplay is on.
    pub autoplay_interval_ms: u64,
    /// Net horizontal displacement a touch needs to count as a swipe.
    pub swipe_threshold_px: f32,
    /// How many items the loader requests from the data service.
    pub page_size: usize,
    /// Start autoplaying as soon as a multi-item gallery is ready.
    pub autoplay_on_load: bool,
    /// Suspend autoplay while the zoom overlay is open and resume it on close.
    /// Off by default: the slideshow keeps advancing behind the overlay.
    pub pause_autoplay_on_zoom: bool,
    /// Base URL of the gallery data service.
    pub api_base_url: String,
    /// Directory the zoom overlay's download action writes into.
    pub download_dir: PathBuf,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: autoplay::INTERVAL_MS,
            swipe_threshold_px: gesture::SWIPE_THRESHOLD_PX,
            page_size: fetch::PAGE_SIZE,
            autoplay_on_load: autoplay::ENABLED_ON_LOAD,
            pause_autoplay_on_zoom: autoplay::PAUSE_ON_ZOOM,
            api_base_url: fetch::DEFAULT_BASE_URL.to_string(),
            download_dir: PathBuf::from(download::DEFAULT_DIR),
        }
    }
}

impl CarouselConfig {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    /// Reject values the engine cannot operate with.
    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.autoplay_interval_ms == 0 {
            return Err(GalleryError::InvalidConfig(
                "autoplay_interval_ms must be greater than zero".into(),
            ));
        }
        if self.page_size == 0 {
            return Err(GalleryError::InvalidConfig(
                "page_size must be greater than zero".into(),
            ));
        }
        if !self.swipe_threshold_px.is_finite() || self.swipe_threshold_px < 0.0 {
            return Err(GalleryError::InvalidConfig(format!(
                "swipe_threshold_px must be a finite, non-negative number (got {})",
                self.swipe_threshold_px
            )));
        }
        Ok(())
    }

    /// Load configuration overrides using environment variables.
    /// Evaluation order:
    /// 1) `$VISTA_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$VISTA_CONFIG_JSON` (inline JSON),
    /// 3) the first default file candidate that exists,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        let (config, source) = Self::resolve_from_env()?;
        config
            .validate()
            .with_context(|| format!("invalid carousel config from {source:?}"))?;
        Ok((config, source))
    }

    fn resolve_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        if let Ok(path_str) = env::var("VISTA_CONFIG_PATH")
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var("VISTA_CONFIG_JSON")
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .context("failed to parse VISTA_CONFIG_JSON")?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read carousel config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid carousel config {}", path.display())
            }),
            Some("toml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid carousel config {}: {}", path.display(), err)
            }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        // Try TOML first, then JSON.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse carousel config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid carousel config json: {err}"))
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] =
            &["vista.toml", "vista.json", "config/vista.toml"];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}
