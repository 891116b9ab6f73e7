//! Convenience re-exports of the model types.
//! `use vista_model::prelude::*;` brings in everything the engine touches.

pub use super::error::ModelError;
pub use super::ids::GalleryItemId;
pub use super::item::{AssetOrigin, GalleryItem, GalleryPage};
