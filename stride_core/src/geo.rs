//! Geolocation capability.
//!
//! A single-shot position request: either a coordinate pair or a
//! permission/unavailability failure. Injected into the controller so
//! tests and the CLI never reach for a real positioning service.

use crate::types::LatLng;
use crate::{Error, Result};

/// Device geolocation, requested once at startup
pub trait Geolocator {
    fn current_position(&mut self) -> Result<LatLng>;
}

/// Locator that reports a pre-configured coordinate.
///
/// Stands in for device geolocation where none exists (CLI, tests).
#[derive(Clone, Copy, Debug)]
pub struct FixedLocator {
    position: LatLng,
}

impl FixedLocator {
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

impl Geolocator for FixedLocator {
    fn current_position(&mut self) -> Result<LatLng> {
        Ok(self.position)
    }
}

/// Locator that always fails, as when the user denies the permission
/// prompt.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeniedLocator;

impl Geolocator for DeniedLocator {
    fn current_position(&mut self) -> Result<LatLng> {
        Err(Error::Geolocation("position request denied".into()))
    }
}
