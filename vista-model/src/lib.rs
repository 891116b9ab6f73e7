//! Core data model definitions shared across Vista crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod error;
pub mod ids;
pub mod item;
pub mod prelude;

pub use error::{ModelError, Result as ModelResult};
pub use ids::GalleryItemId;
pub use item::{AssetOrigin, GalleryItem, GalleryPage};
