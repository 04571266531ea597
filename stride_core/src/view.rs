//! List panel and form boundary.
//!
//! The DOM layer is an external collaborator; the controller drives it
//! through the `ListView` trait. Formatting helpers live here so every
//! surface (popup text aside) renders workouts the same way. Display
//! rounding happens here and only here: pace and speed both show one
//! decimal, while the stored values stay unrounded.

use uuid::Uuid;

use crate::types::{Workout, WorkoutDetails, WorkoutKind};

/// UI boundary consumed by the controller: the workout list panel plus
/// the input form's visibility state.
pub trait ListView {
    /// Append a rendered entry for the workout, tagged with its id
    fn render_entry(&mut self, workout: &Workout);

    /// Remove the entry owned by `id`, if rendered
    fn remove_entry(&mut self, id: Uuid);

    /// Drop every rendered entry
    fn clear(&mut self);

    /// Reveal the input form and focus the distance field
    fn show_form(&mut self);

    /// Hide the form and reset its fields
    fn hide_form(&mut self);

    /// Swap which variant-specific input (cadence vs. elevation) is
    /// visible and required
    fn set_kind_fields(&mut self, kind: WorkoutKind);

    /// Surface a blocking, user-visible message
    fn alert(&mut self, message: &str);
}

// ============================================================================
// Display formatting
// ============================================================================

/// Title line for list entries, e.g. "🏃 Running on April 14"
pub fn entry_title(workout: &Workout) -> String {
    format!("{} {}", workout.kind().badge(), workout.description)
}

/// Stat line for list entries, one decimal on derived metrics
pub fn entry_summary(workout: &Workout) -> String {
    match workout.details {
        WorkoutDetails::Running {
            cadence,
            pace_min_per_km,
        } => format!(
            "{} km · {} min · {:.1} min/km · {} spm",
            workout.distance_km, workout.duration_min, pace_min_per_km, cadence
        ),
        WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => format!(
            "{} km · {} min · {:.1} km/h · {} m climbed",
            workout.distance_km, workout.duration_min, speed_km_per_h, elevation_gain_m
        ),
    }
}

// ============================================================================
// Console adapter
// ============================================================================

/// List view for hosts without a DOM.
///
/// Keeps the rendered-entry and form state the controller expects a real
/// panel to hold, and surfaces alerts on stderr. Controller tests read
/// the recorded state back through the accessors.
#[derive(Debug, Default)]
pub struct ConsoleView {
    entries: Vec<Uuid>,
    alerts: Vec<String>,
    form_visible: bool,
    active_kind: Option<WorkoutKind>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of currently rendered entries, in render order
    pub fn entries(&self) -> &[Uuid] {
        &self.entries
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn active_kind(&self) -> Option<WorkoutKind> {
        self.active_kind
    }
}

impl ListView for ConsoleView {
    fn render_entry(&mut self, workout: &Workout) {
        self.entries.push(workout.id);
        tracing::debug!(id = %workout.id, "{}: {}", entry_title(workout), entry_summary(workout));
    }

    fn remove_entry(&mut self, id: Uuid) {
        self.entries.retain(|e| *e != id);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn show_form(&mut self) {
        self.form_visible = true;
    }

    fn hide_form(&mut self) {
        self.form_visible = false;
    }

    fn set_kind_fields(&mut self, kind: WorkoutKind) {
        self.active_kind = Some(kind);
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
        self.alerts.push(message.to_string());
    }
}
