//! Map capability: view control, markers, popups.
//!
//! The mapping library itself is an external collaborator. The
//! controller talks to it through the `MapPort` trait, which covers
//! exactly what the sync logic needs: initialize the view, re-centre it,
//! and add/remove markers. Click events flow the other way - the host
//! delivers them by calling `App::map_click` directly.

use std::collections::HashMap;

use uuid::Uuid;

use crate::types::{LatLng, Workout};

// ============================================================================
// Map configuration values
// ============================================================================

/// Tile layer used when the map is initialized
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png".into(),
            max_zoom: 19,
            attribution:
                "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
                    .into(),
        }
    }
}

/// Popup content and presentation options bound to a marker
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    pub content: String,
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub style_class: String,
}

impl Popup {
    /// Popup for a workout marker: the record's badge and description,
    /// styled per kind, pinned open.
    pub fn for_workout(workout: &Workout) -> Self {
        Self {
            content: format!("{} {}", workout.kind().badge(), workout.description),
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            style_class: format!("{}-popup", workout.kind().as_str()),
        }
    }
}

/// Pan behaviour for view changes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pan {
    pub animate: bool,
    pub duration_secs: f64,
}

impl Pan {
    pub fn instant() -> Self {
        Self {
            animate: false,
            duration_secs: 0.0,
        }
    }

    pub fn animated(duration_secs: f64) -> Self {
        Self {
            animate: true,
            duration_secs,
        }
    }
}

// ============================================================================
// Map port
// ============================================================================

/// Opaque handle to a rendered marker, issued by the map adapter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// External mapping capability consumed by the controller
pub trait MapPort {
    /// Create the map centred on `center` with the given tile layer
    fn init(&mut self, center: LatLng, zoom: u8, tiles: &TileLayer);

    /// Re-centre the current view
    fn set_view(&mut self, center: LatLng, zoom: u8, pan: Pan);

    /// Place a marker with a bound popup
    fn add_marker(&mut self, coords: LatLng, popup: &Popup) -> MarkerHandle;

    /// Remove a previously placed marker
    fn remove_marker(&mut self, handle: MarkerHandle);
}

// ============================================================================
// Marker registry
// ============================================================================

/// Workout id -> marker handle mapping.
///
/// Never persisted; rebuilt each session as markers are (re-)rendered.
/// Exists solely so deletion can locate the right marker.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: HashMap<Uuid, MarkerHandle>,
}

impl MarkerRegistry {
    pub fn insert(&mut self, id: Uuid, handle: MarkerHandle) {
        self.entries.insert(id, handle);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<MarkerHandle> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: Uuid) -> Option<MarkerHandle> {
        self.entries.get(&id).copied()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (Uuid, MarkerHandle)> + '_ {
        self.entries.drain()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Headless adapter
// ============================================================================

/// Map adapter that tracks view and marker state without rendering.
///
/// Used by the CLI (no map surface to draw on) and by controller tests
/// to observe what a real map would have been asked to do.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    next_handle: u64,
    markers: HashMap<MarkerHandle, LatLng>,
    view: Option<(LatLng, u8)>,
    initialized: bool,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current view centre and zoom, if the map has been initialized
    pub fn view(&self) -> Option<(LatLng, u8)> {
        self.view
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker_at(&self, handle: MarkerHandle) -> Option<LatLng> {
        self.markers.get(&handle).copied()
    }
}

impl MapPort for HeadlessMap {
    fn init(&mut self, center: LatLng, zoom: u8, tiles: &TileLayer) {
        self.view = Some((center, zoom));
        self.initialized = true;
        tracing::debug!(
            lat = center.lat,
            lng = center.lng,
            zoom,
            tiles = %tiles.url_template,
            "map initialized"
        );
    }

    fn set_view(&mut self, center: LatLng, zoom: u8, pan: Pan) {
        self.view = Some((center, zoom));
        tracing::debug!(
            lat = center.lat,
            lng = center.lng,
            zoom,
            animate = pan.animate,
            "map view moved"
        );
    }

    fn add_marker(&mut self, coords: LatLng, popup: &Popup) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.markers.insert(handle, coords);
        tracing::debug!(lat = coords.lat, lng = coords.lng, popup = %popup.content, "marker added");
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
        tracing::debug!(?handle, "marker removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Workout;

    #[test]
    fn test_popup_for_workout() {
        let at = chrono::Utc::now();
        let w = Workout::running_at(LatLng::new(51.5, -0.09), 5.0, 25.0, 180.0, at).unwrap();
        let popup = Popup::for_workout(&w);

        assert!(popup.content.starts_with("🏃 Running on "));
        assert_eq!(popup.style_class, "running-popup");
        assert_eq!(popup.max_width, 250);
        assert_eq!(popup.min_width, 100);
        assert!(!popup.auto_close);
        assert!(!popup.close_on_click);
    }

    #[test]
    fn test_headless_map_tracks_markers() {
        let mut map = HeadlessMap::new();
        map.init(LatLng::new(51.505, -0.09), 13, &TileLayer::default());
        assert!(map.is_initialized());

        let w = Workout::cycling(LatLng::new(48.85, 2.35), 20.0, 60.0, 400.0).unwrap();
        let handle = map.add_marker(w.coords, &Popup::for_workout(&w));
        assert_eq!(map.marker_count(), 1);
        assert_eq!(map.marker_at(handle), Some(w.coords));

        map.remove_marker(handle);
        assert_eq!(map.marker_count(), 0);
    }

    #[test]
    fn test_headless_map_issues_distinct_handles() {
        let mut map = HeadlessMap::new();
        let w = Workout::running(LatLng::new(51.5, -0.09), 5.0, 25.0, 180.0).unwrap();
        let popup = Popup::for_workout(&w);

        let a = map.add_marker(w.coords, &popup);
        let b = map.add_marker(w.coords, &popup);
        assert_ne!(a, b);
    }

    #[test]
    fn test_marker_registry_roundtrip() {
        let mut registry = MarkerRegistry::default();
        let id = Uuid::new_v4();
        registry.insert(id, MarkerHandle::new(7));

        assert_eq!(registry.get(id), Some(MarkerHandle::new(7)));
        assert_eq!(registry.remove(id), Some(MarkerHandle::new(7)));
        assert_eq!(registry.remove(id), None);
        assert!(registry.is_empty());
    }
}
