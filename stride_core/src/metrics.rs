//! Derived performance metrics.
//!
//! Both metrics are pure functions of the two primary inputs and are
//! computed exactly once, when a workout is constructed. No rounding
//! happens here; display rounding is applied at the presentation
//! boundary (see `view`).

/// Minutes needed to cover one kilometre.
///
/// Invariant: `pace_min_per_km(d, t) * d == t` for all `d > 0`.
pub fn pace_min_per_km(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Distance/duration quotient for cycling workouts.
///
/// Invariant: `speed_km_per_h(d, t) * t == d` for all `t > 0`.
pub fn speed_km_per_h(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / duration_min
}
