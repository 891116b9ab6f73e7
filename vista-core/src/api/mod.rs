//! Data-fetch contract consumed by the gallery loader.

use async_trait::async_trait;
use std::fmt::Debug;
use vista_model::GalleryItem;

use crate::error::Result;

pub mod http;

pub use http::HttpGallerySource;

/// Remote collection of gallery items. Only the first page is ever read.
#[async_trait]
pub trait GallerySource: Send + Sync + Debug {
    /// Fetch up to `limit` items, in the order the service wants them shown.
    async fn fetch_first(&self, limit: usize) -> Result<Vec<GalleryItem>>;
}
