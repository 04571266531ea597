#![forbid(unsafe_code)]

//! Core domain model and sync logic for Stride, a map-based workout log.
//!
//! This crate provides:
//! - Domain types (workouts, coordinates, running/cycling variants)
//! - Derived metrics (pace, speed)
//! - The in-memory workout store and the controller that keeps map
//!   markers, the list panel, and the persisted snapshot in sync
//! - Capability ports for the map, list view, geolocation, and storage,
//!   with headless/file adapters
//! - Snapshot persistence and CSV export

pub mod types;
pub mod error;
pub mod metrics;
pub mod store;
pub mod map;
pub mod view;
pub mod geo;
pub mod snapshot;
pub mod controller;
pub mod config;
pub mod logging;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use store::WorkoutStore;
pub use map::{HeadlessMap, MapPort, MarkerHandle, MarkerRegistry, Pan, Popup, TileLayer};
pub use view::{ConsoleView, ListView};
pub use geo::{DeniedLocator, FixedLocator, Geolocator};
pub use snapshot::{JsonFileStore, MemoryStore, SnapshotStore, STORAGE_KEY};
pub use controller::{App, FormInput, ListClick};
pub use config::Config;
pub use export::export_csv;
