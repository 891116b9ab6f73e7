#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use vista_core::api::GallerySource;
use vista_core::carousel::{
    CarouselMessage, CarouselState, CarouselView, ManualTickScheduler, update,
};
use vista_core::config::CarouselConfig;
use vista_core::loader::LoadOutcome;
use vista_core::{GalleryError, GalleryItem, GalleryItemId, Result};

pub fn item(n: usize) -> GalleryItem {
    GalleryItem {
        id: GalleryItemId::from_u128(0x5000 + n as u128),
        title: format!("Slide {n}"),
        description: format!("Description for slide {n}"),
        primary_source_url: format!("https://cdn.gallery.test/full/{n}.jpg"),
        fallback_source_url: format!("https://cdn.gallery.test/thumb/{n}.jpg"),
        category: "test".to_string(),
        display_order: n as i32,
        created_at: DateTime::<Utc>::from_timestamp(1_700_000_000 + n as i64, 0)
            .unwrap_or_default(),
        external_reference_id: format!("REF-{n:04}"),
    }
}

pub fn gallery(len: usize) -> Vec<GalleryItem> {
    (0..len).map(item).collect()
}

/// A mounted state with `len` items delivered through `update`, driven by a
/// manual scheduler.
pub fn ready_with(
    len: usize,
    config: &CarouselConfig,
) -> (CarouselState, ManualTickScheduler) {
    let manual = ManualTickScheduler::new();
    let mut state = CarouselState::new(config, Box::new(manual.clone()));
    let mount = state.mount_id();
    update(
        &mut state,
        CarouselMessage::Loaded {
            mount,
            outcome: LoadOutcome::Items(gallery(len)),
        },
    );
    (state, manual)
}

pub fn ready(len: usize) -> (CarouselState, ManualTickScheduler) {
    ready_with(len, &CarouselConfig::default())
}

/// Gallery service stand-in that answers every fetch with the same page,
/// optionally failing the first few calls.
#[derive(Debug)]
pub struct StaticSource {
    items: Vec<GalleryItem>,
    failures: usize,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(items: Vec<GalleryItem>) -> Arc<Self> {
        Self::failing_first(0, items)
    }

    pub fn failing_first(failures: usize, items: Vec<GalleryItem>) -> Arc<Self> {
        Arc::new(Self {
            items,
            failures,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GallerySource for StaticSource {
    async fn fetch_first(&self, limit: usize) -> Result<Vec<GalleryItem>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(GalleryError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                url: "http://gallery.test/api/v1/gallery".to_string(),
            });
        }
        Ok(self.items.iter().take(limit).cloned().collect())
    }
}

/// Wait until the published view satisfies `predicate`.
pub async fn wait_for(
    views: &mut watch::Receiver<CarouselView>,
    predicate: impl FnMut(&CarouselView) -> bool,
) -> CarouselView {
    match tokio::time::timeout(Duration::from_millis(100), views.wait_for(predicate)).await
    {
        Ok(Ok(view)) => view.clone(),
        Ok(Err(_)) => panic!("carousel task ended before the expected view"),
        Err(_) => panic!("timed out waiting for the expected view"),
    }
}
