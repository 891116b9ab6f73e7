use chrono::{DateTime, Utc};

use crate::error::ModelError;
use crate::ids::GalleryItemId;

/// One image entry of the gallery: two candidate sources plus display
/// metadata. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GalleryItem {
    pub id: GalleryItemId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub primary_source_url: String,
    pub fallback_source_url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    /// Only meaningful to the service that produced the page; the carousel
    /// keeps insertion order after load.
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub external_reference_id: String,
}

impl GalleryItem {
    /// Source URL for the given origin.
    pub fn source(&self, origin: AssetOrigin) -> &str {
        match origin {
            AssetOrigin::Primary => &self.primary_source_url,
            AssetOrigin::Fallback => &self.fallback_source_url,
        }
    }

    /// Basic sanity checks applied to items received from a remote service.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.primary_source_url.trim().is_empty()
            && self.fallback_source_url.trim().is_empty()
        {
            return Err(ModelError::InvalidItem(format!(
                "item {} has no image source",
                self.id
            )));
        }
        Ok(())
    }
}

/// Which of an item's two candidate sources a render used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssetOrigin {
    Primary,
    Fallback,
}

/// Body of the "first N items" response of the data service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalleryPage {
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<GalleryItem>,
}
