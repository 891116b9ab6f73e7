//! Per-item primary/fallback source selection.
//!
//! A primary failure flips the item to its fallback for good. Fallback
//! failures are terminal: the item renders as broken from then on.

use std::collections::HashSet;

use vista_model::{AssetOrigin, GalleryItem, GalleryItemId};

/// What a slide should render for its image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetView {
    Primary(String),
    Fallback(String),
    Broken,
}

impl AssetView {
    pub fn url(&self) -> Option<&str> {
        match self {
            AssetView::Primary(url) | AssetView::Fallback(url) => Some(url.as_str()),
            AssetView::Broken => None,
        }
    }

    pub fn origin(&self) -> Option<AssetOrigin> {
        match self {
            AssetView::Primary(_) => Some(AssetOrigin::Primary),
            AssetView::Fallback(_) => Some(AssetOrigin::Fallback),
            AssetView::Broken => None,
        }
    }

    pub fn is_broken(&self) -> bool {
        matches!(self, AssetView::Broken)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetResolver {
    failed_primary: HashSet<GalleryItemId>,
    broken: HashSet<GalleryItemId>,
}

impl AssetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, item: &GalleryItem) -> AssetView {
        if !self.failed_primary.contains(&item.id) {
            AssetView::Primary(item.primary_source_url.clone())
        } else if self.broken.contains(&item.id) {
            AssetView::Broken
        } else {
            AssetView::Fallback(item.fallback_source_url.clone())
        }
    }

    /// Returns `true` when this call switched the item to its fallback.
    pub fn record_primary_failure(&mut self, id: GalleryItemId) -> bool {
        self.failed_primary.insert(id)
    }

    /// Only meaningful once the item is on its fallback; a late report for
    /// an item still on its primary is ignored.
    pub fn record_fallback_failure(&mut self, id: GalleryItemId) -> bool {
        if !self.failed_primary.contains(&id) {
            return false;
        }
        self.broken.insert(id)
    }

    pub fn is_primary_failed(&self, id: &GalleryItemId) -> bool {
        self.failed_primary.contains(id)
    }

    pub fn failed_primary(&self) -> &HashSet<GalleryItemId> {
        &self.failed_primary
    }
}
