//! Application controller.
//!
//! The controller is the only component with cross-cutting knowledge: it
//! owns the store, the marker registry, and the pending map click, and
//! keeps the three views of the data (map markers, list panel, persisted
//! snapshot) consistent as workouts are created and deleted.
//!
//! Every entry point is a synchronous run-to-completion event handler;
//! geolocation is the single asynchronous step and it resolves inside
//! `start`. User-recoverable failures (denied location, bad form input)
//! are surfaced through `ListView::alert` and leave all state untouched;
//! storage IO failures propagate as errors.

use uuid::Uuid;

use crate::config::MapConfig;
use crate::geo::Geolocator;
use crate::map::{MapPort, MarkerRegistry, Pan, Popup};
use crate::snapshot::{decode_workouts, encode_workouts, SnapshotStore, STORAGE_KEY};
use crate::store::WorkoutStore;
use crate::types::{LatLng, Workout, WorkoutKind};
use crate::view::ListView;
use crate::{Error, Result};

/// Alert shown when the position request fails
const GEOLOCATION_ALERT: &str = "Could not get your position";

/// Alert shown when form validation rejects the submitted fields
const VALIDATION_ALERT: &str = "Inputs have to be positive numbers!";

/// Raw numeric fields as read from the input form. `None` means the
/// field was left empty or unparseable.
#[derive(Clone, Copy, Debug)]
pub struct FormInput {
    pub kind: WorkoutKind,
    pub distance_km: Option<f64>,
    pub duration_min: Option<f64>,
    pub cadence: Option<f64>,
    pub elevation_gain_m: Option<f64>,
}

/// Click target within the workout list panel
#[derive(Clone, Copy, Debug)]
pub enum ListClick {
    /// The entry's delete control
    Delete(Uuid),
    /// Anywhere else on the entry: re-centre the map on the workout
    Select(Uuid),
}

/// The application controller, generic over the four injected
/// capabilities so hosts and tests choose their own adapters.
pub struct App<M, V, S, G> {
    map: M,
    view: V,
    storage: S,
    locator: G,
    map_config: MapConfig,
    store: WorkoutStore,
    markers: MarkerRegistry,
    pending_click: Option<LatLng>,
    map_ready: bool,
    form_open: bool,
}

impl<M, V, S, G> App<M, V, S, G>
where
    M: MapPort,
    V: ListView,
    S: SnapshotStore,
    G: Geolocator,
{
    pub fn new(map: M, view: V, storage: S, locator: G, map_config: MapConfig) -> Self {
        Self {
            map,
            view,
            storage,
            locator,
            map_config,
            store: WorkoutStore::new(),
            markers: MarkerRegistry::default(),
            pending_click: None,
            map_ready: false,
            form_open: false,
        }
    }

    /// Startup: hydrate the store, render the list, then request the
    /// device position once. On success the map is initialized and every
    /// stored workout is replayed as a marker; on failure the session
    /// stays map-less and the user is alerted.
    pub fn start(&mut self) -> Result<()> {
        self.hydrate()?;

        for workout in self.store.all() {
            self.view.render_entry(workout);
        }

        match self.locator.current_position() {
            Ok(position) => {
                tracing::info!(lat = position.lat, lng = position.lng, "position acquired");
                self.map
                    .init(position, self.map_config.start_zoom, &self.map_config.tile_layer());
                self.map_ready = true;
                self.replay_markers();
            }
            Err(e) => {
                tracing::warn!("Geolocation failed: {}. Continuing without a map.", e);
                self.view.alert(GEOLOCATION_ALERT);
            }
        }

        Ok(())
    }

    /// Map click: cache the coordinates and open the form. Repeated
    /// clicks before submission overwrite the pending coordinates.
    pub fn map_click(&mut self, coords: LatLng) {
        if !self.map_ready {
            tracing::debug!("map click ignored: map not ready");
            return;
        }
        self.pending_click = Some(coords);
        self.form_open = true;
        self.view.show_form();
    }

    /// Form kind control changed: swap the variant-specific input field.
    /// Pure UI state; the store is not involved.
    pub fn toggle_kind(&mut self, kind: WorkoutKind) {
        self.view.set_kind_fields(kind);
    }

    /// Form submit. Returns the new workout's id, or `None` when the
    /// submission was ignored (no open form) or rejected by validation
    /// (alert raised, form left open, store untouched).
    pub fn submit_form(&mut self, input: &FormInput) -> Result<Option<Uuid>> {
        if !self.form_open {
            tracing::debug!("form submit ignored: no form open");
            return Ok(None);
        }
        let Some(coords) = self.pending_click else {
            tracing::debug!("form submit ignored: no pending map click");
            return Ok(None);
        };

        let workout = match build_workout(coords, input) {
            Ok(workout) => workout,
            Err(Error::Validation(reason)) => {
                tracing::debug!(%reason, "form rejected");
                self.view.alert(VALIDATION_ALERT);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let id = workout.id;
        let handle = self.map.add_marker(workout.coords, &Popup::for_workout(&workout));
        self.markers.insert(id, handle);
        self.view.render_entry(&workout);
        self.store.append(workout);

        self.pending_click = None;
        self.form_open = false;
        self.view.hide_form();

        self.persist()?;
        tracing::info!(%id, "workout logged");
        Ok(Some(id))
    }

    /// Click inside the list panel: delete the owning workout, or
    /// re-centre the map on it.
    pub fn list_click(&mut self, click: ListClick) -> Result<()> {
        match click {
            ListClick::Delete(id) => self.delete_workout(id),
            ListClick::Select(id) => self.focus_workout(id),
        }
    }

    fn delete_workout(&mut self, id: Uuid) -> Result<()> {
        if !self.store.remove_by_id(id) {
            tracing::debug!(%id, "delete ignored: unknown workout");
            return Ok(());
        }

        self.view.remove_entry(id);
        if let Some(handle) = self.markers.remove(id) {
            self.map.remove_marker(handle);
        }

        self.persist()?;
        tracing::info!(%id, "workout deleted");
        Ok(())
    }

    fn focus_workout(&mut self, id: Uuid) -> Result<()> {
        if !self.map_ready {
            tracing::debug!(%id, "focus ignored: map not ready");
            return Ok(());
        }
        let Some(workout) = self.store.find_by_id_mut(id) else {
            tracing::debug!(%id, "focus ignored: unknown workout");
            return Ok(());
        };

        workout.register_click();
        let coords = workout.coords;
        self.map.set_view(
            coords,
            self.map_config.focus_zoom,
            Pan::animated(self.map_config.pan_duration_secs),
        );

        self.persist()
    }

    /// Clear persisted storage and return to the fresh-start state: an
    /// empty store, no markers, an empty list.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.remove(STORAGE_KEY)?;

        for (_, handle) in self.markers.drain() {
            self.map.remove_marker(handle);
        }
        self.store.replace_all(Vec::new());
        self.view.clear();
        self.pending_click = None;
        self.form_open = false;

        tracing::info!("storage cleared");
        Ok(())
    }

    fn hydrate(&mut self) -> Result<()> {
        if let Some(raw) = self.storage.load(STORAGE_KEY)? {
            let workouts = decode_workouts(&raw);
            tracing::info!("Hydrated {} workouts from storage", workouts.len());
            self.store.replace_all(workouts);
        }
        Ok(())
    }

    /// Markers are not persisted; replay them from the store once the
    /// map is up.
    fn replay_markers(&mut self) {
        for workout in self.store.all() {
            let handle = self
                .map
                .add_marker(workout.coords, &Popup::for_workout(workout));
            self.markers.insert(workout.id, handle);
        }
    }

    fn persist(&mut self) -> Result<()> {
        let raw = encode_workouts(self.store.all())?;
        self.storage.save(STORAGE_KEY, &raw)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Validate the submitted fields and construct the matching workout
/// variant. All numeric fields must be present and finite; distance and
/// duration must be positive, the variant field non-negative.
fn build_workout(coords: LatLng, input: &FormInput) -> Result<Workout> {
    let distance_km = require("distance", input.distance_km)?;
    let duration_min = require("duration", input.duration_min)?;

    match input.kind {
        WorkoutKind::Running => {
            let cadence = require("cadence", input.cadence)?;
            Workout::running(coords, distance_km, duration_min, cadence)
        }
        WorkoutKind::Cycling => {
            let elevation_gain_m = require("elevation", input.elevation_gain_m)?;
            Workout::cycling(coords, distance_km, duration_min, elevation_gain_m)
        }
    }
}

fn require(name: &str, field: Option<f64>) -> Result<f64> {
    field.ok_or_else(|| Error::Validation(format!("{} is required", name)))
}
