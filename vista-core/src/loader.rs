//! Gallery loader: one fetch per mount.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use vista_model::GalleryItem;

use crate::api::GallerySource;
use crate::demo::placeholder_items;

/// Result of the initial fetch, as delivered to the carousel.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The service returned a non-empty page; kept verbatim.
    Items(Vec<GalleryItem>),
    /// The service returned nothing; the built-in set stands in.
    Placeholder(Vec<GalleryItem>),
    /// The fetch failed. Terminal for the mount until a reload.
    Failed(String),
}

impl LoadOutcome {
    pub fn items(&self) -> Option<&[GalleryItem]> {
        match self {
            LoadOutcome::Items(items) | LoadOutcome::Placeholder(items) => {
                Some(items)
            }
            LoadOutcome::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GalleryLoader {
    source: Arc<dyn GallerySource>,
    page_size: usize,
}

impl GalleryLoader {
    pub fn new(source: Arc<dyn GallerySource>, page_size: usize) -> Self {
        Self { source, page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Single attempt; no retry.
    pub async fn load(&self) -> LoadOutcome {
        let started = Instant::now();
        match self.source.fetch_first(self.page_size).await {
            Ok(items) if items.is_empty() => {
                info!(
                    elapsed = ?started.elapsed(),
                    "gallery service returned no items, using placeholders"
                );
                LoadOutcome::Placeholder(placeholder_items())
            }
            Ok(items) => {
                for item in &items {
                    if let Err(err) = item.validate() {
                        warn!(id = %item.id, %err, "gallery item will not render");
                    }
                }
                info!(items = items.len(), elapsed = ?started.elapsed(), "gallery fetched");
                LoadOutcome::Items(items)
            }
            Err(err) => {
                warn!(%err, elapsed = ?started.elapsed(), "gallery fetch failed");
                LoadOutcome::Failed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GalleryError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct RecordingSource {
        items: Vec<GalleryItem>,
        fail: bool,
        limits: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl GallerySource for RecordingSource {
        async fn fetch_first(&self, limit: usize) -> Result<Vec<GalleryItem>> {
            self.limits
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(limit);
            if self.fail {
                return Err(GalleryError::InvalidConfig("offline".into()));
            }
            Ok(self.items.clone())
        }
    }

    fn source(items: Vec<GalleryItem>, fail: bool) -> Arc<RecordingSource> {
        Arc::new(RecordingSource {
            items,
            fail,
            limits: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn non_empty_page_is_kept_verbatim() {
        let mut items = placeholder_items();
        items.reverse();
        let source = source(items.clone(), false);
        let loader = GalleryLoader::new(source.clone(), 5);

        assert_eq!(loader.load().await, LoadOutcome::Items(items));
        assert_eq!(*source.limits.lock().expect("lock"), vec![5]);
    }

    #[tokio::test]
    async fn empty_page_becomes_placeholders() {
        let loader = GalleryLoader::new(source(Vec::new(), false), 12);
        match loader.load().await {
            LoadOutcome::Placeholder(items) => assert_eq!(items, placeholder_items()),
            other => panic!("expected placeholders, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_is_reported_once_without_retry() {
        let source = source(Vec::new(), true);
        let loader = GalleryLoader::new(source.clone(), 12);

        let outcome = loader.load().await;
        assert!(matches!(outcome, LoadOutcome::Failed(ref msg) if msg.contains("offline")));
        assert_eq!(source.limits.lock().expect("lock").len(), 1);
    }
}
