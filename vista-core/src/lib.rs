//! # Vista Core
//!
//! Carousel interaction engine for the Vista gallery widget.
//!
//! A mounted carousel owns an ordered sequence of gallery items and arbitrates
//! four independent input sources into a single current index:
//!
//! - **Autoplay**: one repeating timer advances the slideshow at a fixed
//!   cadence. Manual navigation stops it; only the toggle restarts it.
//! - **Touch gestures**: net horizontal displacement beyond a threshold
//!   becomes a next/previous command.
//! - **Discrete controls**: arrows, indicator dots, the autoplay toggle and
//!   click-to-zoom.
//! - **Image load callbacks**: a failed primary source flips the item to its
//!   fallback for good.
//!
//! ## Architecture
//!
//! - [`carousel`]: state machine, autoplay scheduler, gesture recognizer,
//!   asset resolver, zoom overlay, the [`carousel::update`] entry point and
//!   [`carousel::CarouselView`] render snapshots.
//! - [`loader`] / [`api`]: the single initial fetch and the data-fetch
//!   contract it runs against.
//! - [`runtime`]: tokio event queue and timer supervision for embedding.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use vista_core::{
//!     api::HttpGallerySource, carousel::CarouselMessage, config::CarouselConfig,
//!     runtime::CarouselRuntime,
//! };
//!
//! async fn embed() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CarouselConfig::default();
//!     let source = Arc::new(HttpGallerySource::new(config.api_base_url.clone())?);
//!     let mounted = CarouselRuntime::new(config, source)?.mount();
//!
//!     mounted.handle.send(CarouselMessage::Next);
//!     println!("showing {:?}", mounted.views.borrow().displayed_index);
//!
//!     mounted.unmount().await;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Data-fetch contract and its HTTP implementation
pub mod api;

/// Carousel state machine and its input arbitration
pub mod carousel;

/// Widget configuration loading and validation
pub mod config;

/// Compiled defaults
pub mod constants;

/// Placeholder content for empty galleries
pub mod demo;

/// Zoom overlay download action
pub mod download;

/// Error types and error handling utilities
pub mod error;

/// Initial gallery fetch
pub mod loader;

/// Event queue and timer supervision
pub mod runtime;

pub use error::{GalleryError, Result};
pub use vista_model::{AssetOrigin, GalleryItem, GalleryItemId};
