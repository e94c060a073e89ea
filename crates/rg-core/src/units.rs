//! Unit conversions.
//!
//! Several tuning constants are expressed "per frame" at a 60 Hz reference
//! rate; [`per_frame`] turns them into a frame-rate independent factor.

/// World units per metre.
pub const UNITS_PER_METER: f64 = 5.0;

/// World units travelled per second at one knot of boat speed.
pub const UNITS_PER_SEC_PER_KNOT: f64 = 15.0;

/// Reference frame rate the per-frame constants were tuned at.
pub const REFERENCE_FPS: f64 = 60.0;

#[inline]
pub fn knots_to_units_per_sec(knots: f64) -> f64 {
    knots * UNITS_PER_SEC_PER_KNOT
}

#[inline]
pub fn units_per_sec_to_knots(units: f64) -> f64 {
    units / UNITS_PER_SEC_PER_KNOT
}

#[inline]
pub fn units_to_meters(units: f64) -> f64 {
    units / UNITS_PER_METER
}

/// Compound a per-frame multiplier over `dt` seconds.
#[inline]
pub fn per_frame(factor: f64, dt: f64) -> f64 {
    factor.powf(dt * REFERENCE_FPS)
}

/// Convert a per-second blend fraction into the fraction for a `dt` step.
#[inline]
pub fn blend_for(alpha_per_sec: f64, dt: f64) -> f64 {
    1.0 - (1.0 - alpha_per_sec.clamp(0.0, 1.0)).powf(dt)
}
