//! In-memory workout collection.
//!
//! The store is the single source of truth during a session: created
//! empty, hydrated once from storage, and mutated only by the
//! application controller. Insertion order is preserved (newest last)
//! and ids are unique, so a `Vec` with id lookups is the right shape.

use uuid::Uuid;

use crate::types::Workout;

/// Ordered collection of workout records
#[derive(Clone, Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the end. The caller guarantees the id is fresh.
    pub fn append(&mut self, workout: Workout) {
        debug_assert!(
            self.find_by_id(workout.id).is_none(),
            "duplicate workout id {}",
            workout.id
        );
        self.workouts.push(workout);
    }

    /// Remove the matching record if present. Removing an unknown id is
    /// a no-op; returns whether a record was removed.
    pub fn remove_by_id(&mut self, id: Uuid) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        self.workouts.len() != before
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: Uuid) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id == id)
    }

    /// The ordered sequence, for rendering and serialization
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    /// Overwrite the entire collection. Used only during hydration.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
