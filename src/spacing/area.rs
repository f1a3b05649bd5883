//! Distance to drainage-area conversion

use std::f64::consts::PI;

/// Square metres in one acre
pub const SQUARE_METERS_PER_ACRE: f64 = 4046.86;

/// Convert a nearest-neighbor distance (metres) into acres.
///
/// The distance is treated as the diameter of a circular drainage area:
/// `area = π·(d/2)² / 4046.86`.
///
/// Non-finite input propagates: `+∞` (no neighbor) yields `+∞` and NaN
/// yields NaN, so the caller decides how to bucket it.
pub fn distance_to_acres(distance: f64) -> f64 {
    let radius_m = distance / 2.0;
    let area_m2 = PI * radius_m.powi(2);
    area_m2 / SQUARE_METERS_PER_ACRE
}
