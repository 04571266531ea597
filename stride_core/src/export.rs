//! CSV export of the workout log.
//!
//! Flattens the snapshot into one row per workout for use outside the
//! application. The export is a report, not a backup: the JSON snapshot
//! remains the durable format, so the file is rewritten whole each time.

use std::path::Path;

use crate::types::{Workout, WorkoutDetails};
use crate::Result;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    kind: &'static str,
    date: String,
    lat: f64,
    lng: f64,
    distance_km: f64,
    duration_min: f64,
    cadence: Option<f64>,
    elevation_gain_m: Option<f64>,
    pace_min_per_km: Option<f64>,
    speed_km_per_h: Option<f64>,
    clicks: u32,
    description: String,
}

impl From<&Workout> for CsvRow {
    fn from(workout: &Workout) -> Self {
        let (cadence, elevation_gain_m, pace_min_per_km, speed_km_per_h) = match workout.details {
            WorkoutDetails::Running {
                cadence,
                pace_min_per_km,
            } => (Some(cadence), None, Some(pace_min_per_km), None),
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => (None, Some(elevation_gain_m), None, Some(speed_km_per_h)),
        };

        CsvRow {
            id: workout.id.to_string(),
            kind: workout.kind().as_str(),
            date: workout.created_at.to_rfc3339(),
            lat: workout.coords.lat,
            lng: workout.coords.lng,
            distance_km: workout.distance_km,
            duration_min: workout.duration_min,
            cadence,
            elevation_gain_m,
            pace_min_per_km,
            speed_km_per_h,
            clicks: workout.click_count,
            description: workout.description.clone(),
        }
    }
}

/// Write the workout sequence to `path` as CSV, in store order.
///
/// Returns the number of rows written. The file is replaced, headers
/// included, and synced to disk before returning.
pub fn export_csv(workouts: &[Workout], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    for workout in workouts {
        writer.serialize(CsvRow::from(workout))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} workouts to {:?}", workouts.len(), path);
    Ok(workouts.len())
}
