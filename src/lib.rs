//! Galleria - core logic for an Unsplash photo gallery client.
//!
//! This crate provides the non-UI application core: paged photo feed loading,
//! locally persisted favorites with change notification, a bounded in-memory
//! image cache, and detail-view navigation. Screens embed it through the
//! services in [`application`] and the ports in [`domain`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the feed, favorites, and navigation services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = "galleria";
