//! Core domain types for Stride.
//!
//! This module defines the fundamental types used throughout the system:
//! - Coordinates
//! - Workout records and their running/cycling variants
//! - Construction-time validation and description formatting

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{metrics, Error, Result};

// ============================================================================
// Coordinates
// ============================================================================

/// A latitude/longitude pair in decimal degrees
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

// ============================================================================
// Workout Types
// ============================================================================

/// Workout discriminant
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Capitalized label used in descriptions ("Running", "Cycling")
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    /// Lowercase name used for CSS-style class tags and CSV rows
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Emoji badge shown in popups and list entries
    pub fn badge(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃",
            WorkoutKind::Cycling => "🚴",
        }
    }
}

/// Variant-specific payload plus the metric derived from it at construction.
///
/// Exactly one variant is populated per workout, selected by the `kind`
/// tag. Derived metrics are persisted with the record and never
/// recomputed on load.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkoutDetails {
    Running {
        /// Steps per minute
        cadence: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        /// Metres climbed
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// One logged activity, immutable after construction apart from the
/// interaction counter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub coords: LatLng,
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(flatten)]
    pub details: WorkoutDetails,
    pub description: String,
    #[serde(default)]
    pub click_count: u32,
}

impl Workout {
    /// Construct a running workout stamped with the current time
    pub fn running(
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        cadence: f64,
    ) -> Result<Self> {
        Self::running_at(coords, distance_km, duration_min, cadence, Utc::now())
    }

    /// Construct a running workout with an explicit creation time
    pub fn running_at(
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        cadence: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        validate_primaries(distance_km, duration_min)?;
        validate_variant_field("cadence", cadence)?;

        Ok(Self {
            id: Uuid::new_v4(),
            created_at,
            coords,
            distance_km,
            duration_min,
            details: WorkoutDetails::Running {
                cadence,
                pace_min_per_km: metrics::pace_min_per_km(distance_km, duration_min),
            },
            description: describe(WorkoutKind::Running, created_at),
            click_count: 0,
        })
    }

    /// Construct a cycling workout stamped with the current time
    pub fn cycling(
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Result<Self> {
        Self::cycling_at(coords, distance_km, duration_min, elevation_gain_m, Utc::now())
    }

    /// Construct a cycling workout with an explicit creation time
    pub fn cycling_at(
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        validate_primaries(distance_km, duration_min)?;
        validate_variant_field("elevation gain", elevation_gain_m)?;

        Ok(Self {
            id: Uuid::new_v4(),
            created_at,
            coords,
            distance_km,
            duration_min,
            details: WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h: metrics::speed_km_per_h(distance_km, duration_min),
            },
            description: describe(WorkoutKind::Cycling, created_at),
            click_count: 0,
        })
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    /// Record one interaction with this workout's marker or list entry
    pub fn register_click(&mut self) {
        self.click_count += 1;
    }
}

// ============================================================================
// Validation and description formatting
// ============================================================================

fn validate_primaries(distance_km: f64, duration_min: f64) -> Result<()> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(Error::Validation(format!(
            "distance must be a positive number, got {}",
            distance_km
        )));
    }
    if !duration_min.is_finite() || duration_min <= 0.0 {
        return Err(Error::Validation(format!(
            "duration must be a positive number, got {}",
            duration_min
        )));
    }
    Ok(())
}

fn validate_variant_field(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::Validation(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Human-readable label, e.g. "Running on April 14".
///
/// Uses the calendar day-of-month.
pub fn describe(kind: WorkoutKind, at: DateTime<Utc>) -> String {
    format!(
        "{} on {} {}",
        kind.label(),
        MONTHS[at.month0() as usize],
        at.day()
    )
}
