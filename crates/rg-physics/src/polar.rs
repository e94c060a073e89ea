//! Boat speed polars.
//!
//! A polar gives the speed a well-sailed boat reaches for a true wind angle
//! and true wind speed.  Lookup is bilinear: first along the angle axis
//! within each of the two bracketing wind bands, then between the bands.
//! Below the lightest band the speed scales linearly from zero; above the
//! strongest band it is clamped.

use rg_core::geom::lerp;

use crate::{PolarError, PolarResult};

/// Angle breakpoints of the built-in table, degrees off the wind.
const J111_ANGLES: [f64; 14] =
    [0.0, 30.0, 38.0, 45.0, 52.0, 60.0, 75.0, 90.0, 110.0, 120.0, 135.0, 150.0, 165.0, 180.0];

/// Wind-speed bands of the built-in table, knots.
const J111_WINDS: [f64; 7] = [6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 20.0];

#[rustfmt::skip]
const J111_JIB: [[f64; 14]; 7] = [
    /*  6 kn */ [0.00, 0.00, 4.70, 4.93, 5.18, 5.29, 5.36,  5.46, 4.94, 4.65, 4.08, 3.51, 3.26, 3.01],
    /*  8 kn */ [0.00, 0.00, 5.80, 6.09, 6.41, 6.55, 6.65,  6.79, 6.17, 5.82, 5.12, 4.42, 4.11, 3.80],
    /* 10 kn */ [0.00, 0.00, 6.66, 7.00, 7.38, 7.56, 7.70,  7.89, 7.20, 6.80, 6.00, 5.20, 4.85, 4.50],
    /* 12 kn */ [0.00, 0.00, 7.23, 7.60, 8.02, 8.22, 8.38,  8.60, 7.85, 7.42, 6.56, 5.69, 5.31, 4.93],
    /* 14 kn */ [0.00, 0.00, 7.52, 7.91, 8.36, 8.57, 8.76,  9.01, 8.25, 7.81, 6.91, 6.01, 5.62, 5.23],
    /* 16 kn */ [0.00, 0.00, 7.76, 8.18, 8.66, 8.90, 9.13,  9.42, 8.68, 8.24, 7.32, 6.39, 6.00, 5.61],
    /* 20 kn */ [0.00, 0.00, 8.20, 8.70, 9.26, 9.60, 9.98, 10.43, 9.77, 9.35, 8.40, 7.42, 7.04, 6.66],
];

#[rustfmt::skip]
const J111_SPINNAKER: [[f64; 14]; 7] = [
    /*  6 kn */ [0.00, 0.00, 0.50, 1.00, 1.50, 2.00, 3.00,  5.46,  5.50,  5.48,  5.25, 4.72, 4.365, 4.01],
    /*  8 kn */ [0.00, 0.00, 0.60, 1.20, 1.80, 2.40, 3.50,  6.79,  6.87,  6.85,  6.58, 5.94, 5.50,  5.06],
    /* 10 kn */ [0.00, 0.00, 0.70, 1.40, 2.10, 2.80, 4.00,  7.89,  8.01,  8.01,  7.72, 6.99, 6.495, 6.00],
    /* 12 kn */ [0.00, 0.00, 0.80, 1.60, 2.40, 3.20, 4.50,  8.60,  8.74,  8.75,  8.44, 7.65, 7.115, 6.58],
    /* 14 kn */ [0.00, 0.00, 0.90, 1.80, 2.70, 3.60, 5.00,  9.01,  9.18,  9.20,  8.89, 8.08, 7.53,  6.98],
    /* 16 kn */ [0.00, 0.00, 1.00, 2.00, 3.00, 4.00, 5.50,  9.42,  9.66,  9.70,  9.42, 8.59, 8.03,  7.47],
    /* 20 kn */ [0.00, 0.00, 1.20, 2.40, 3.60, 4.80, 6.50, 10.43, 10.87, 11.01, 10.81, 9.98, 9.43,  8.88],
];

/// Polar table for one sail plan: `rows[band][angle]`.
#[derive(Clone, Debug)]
struct SailTable {
    rows: Vec<Vec<f64>>,
}

impl SailTable {
    fn from_fixed(rows: &[[f64; 14]; 7]) -> Self {
        Self { rows: rows.iter().map(|r| r.to_vec()).collect() }
    }
}

/// Speed polar with separate jib and spinnaker tables.
#[derive(Clone, Debug)]
pub struct PolarModel {
    /// Degrees, strictly increasing from 0 to 180.
    angles: Vec<f64>,
    /// Knots, strictly increasing and positive.
    winds: Vec<f64>,
    jib: SailTable,
    spinnaker: SailTable,
}

impl Default for PolarModel {
    fn default() -> Self {
        Self::j111()
    }
}

impl PolarModel {
    /// The built-in sportboat polar.
    pub fn j111() -> Self {
        Self {
            angles: J111_ANGLES.to_vec(),
            winds: J111_WINDS.to_vec(),
            jib: SailTable::from_fixed(&J111_JIB),
            spinnaker: SailTable::from_fixed(&J111_SPINNAKER),
        }
    }

    /// A custom polar.  `jib` and `spinnaker` are indexed `[wind][angle]`.
    pub fn new(
        angles:    Vec<f64>,
        winds:     Vec<f64>,
        jib:       Vec<Vec<f64>>,
        spinnaker: Vec<Vec<f64>>,
    ) -> PolarResult<Self> {
        check_axis("angle", &angles)?;
        check_axis("wind", &winds)?;

        let (first, last) = (angles[0], angles[angles.len() - 1]);
        if first != 0.0 || last != 180.0 {
            return Err(PolarError::AngleRange { first, last });
        }
        if winds[0] <= 0.0 {
            return Err(PolarError::NonPositiveWind(winds[0]));
        }
        check_table("jib", &jib, winds.len(), angles.len())?;
        check_table("spinnaker", &spinnaker, winds.len(), angles.len())?;

        Ok(Self { angles, winds, jib: SailTable { rows: jib }, spinnaker: SailTable { rows: spinnaker } })
    }

    /// Target speed in knots for true wind angle `twa` (radians, sign
    /// ignored) and true wind speed `tws` (knots).
    pub fn target_speed(&self, twa: f64, spinnaker: bool, tws: f64) -> f64 {
        let table = if spinnaker { &self.spinnaker } else { &self.jib };
        let deg = twa.abs().to_degrees().min(180.0);
        let tws = tws.max(0.0);

        let lightest = self.winds[0];
        let strongest = self.winds[self.winds.len() - 1];

        if tws <= lightest {
            let at_lightest = self.along_angle(&table.rows[0], deg);
            return lerp(0.0, at_lightest, tws / lightest);
        }
        if tws >= strongest {
            return self.along_angle(&table.rows[self.winds.len() - 1], deg);
        }

        let (i, t) = bracket(&self.winds, tws);
        let lo = self.along_angle(&table.rows[i], deg);
        let hi = self.along_angle(&table.rows[i + 1], deg);
        lerp(lo, hi, t)
    }

    /// Jib and spinnaker speeds mixed by deployment `progress` in `[0, 1]`.
    ///
    /// Drive from the jib fades out over the first half of a hoist and the
    /// spinnaker only pulls over the second half, so a hoist in progress
    /// costs speed.
    pub fn blended_speed(&self, twa: f64, progress: f64, tws: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        let jib_factor = (1.0 - 2.0 * p).max(0.0);
        let spin_factor = (2.0 * (p - 0.5)).max(0.0);

        let mut speed = 0.0;
        if jib_factor > 0.0 {
            speed += self.target_speed(twa, false, tws) * jib_factor;
        }
        if spin_factor > 0.0 {
            speed += self.target_speed(twa, true, tws) * spin_factor;
        }
        speed
    }

    /// Best velocity made good toward (or away from) the wind on one band of
    /// the jib table, as `(twa_radians, vmg_knots)`.  Used by the AI to pick
    /// tacking angles.
    pub fn best_vmg(&self, tws: f64, upwind: bool) -> (f64, f64) {
        let mut best = (0.0, 0.0);
        let (lo, hi) = if upwind { (25, 80) } else { (100, 180) };
        for deg in lo..=hi {
            let twa = (deg as f64).to_radians();
            let spinnaker = !upwind;
            let vmg = (self.target_speed(twa, spinnaker, tws) * twa.cos()).abs();
            if vmg > best.1 {
                best = (twa, vmg);
            }
        }
        best
    }

    fn along_angle(&self, row: &[f64], deg: f64) -> f64 {
        let (i, t) = bracket(&self.angles, deg);
        lerp(row[i], row[i + 1], t)
    }
}

/// Index `i` and fraction `t` such that `x` lies `t` of the way from
/// `axis[i]` to `axis[i + 1]`.  `x` must lie within the axis.
fn bracket(axis: &[f64], x: f64) -> (usize, f64) {
    let last = axis.len() - 2;
    let i = axis[1..].iter().position(|&b| x <= b).unwrap_or(last).min(last);
    let t = ((x - axis[i]) / (axis[i + 1] - axis[i])).clamp(0.0, 1.0);
    (i, t)
}

fn check_axis(axis: &'static str, values: &[f64]) -> PolarResult<()> {
    if values.len() < 2 {
        return Err(PolarError::TooFewBreakpoints { axis, got: values.len() });
    }
    for (index, pair) in values.windows(2).enumerate() {
        if !(pair[1] > pair[0]) {
            return Err(PolarError::NotIncreasing { axis, index: index + 1 });
        }
    }
    Ok(())
}

fn check_table(table: &'static str, rows: &[Vec<f64>], bands: usize, angles: usize) -> PolarResult<()> {
    if rows.len() != bands {
        return Err(PolarError::ShapeMismatch { table, expected: bands, got: rows.len() });
    }
    for row in rows {
        if row.len() != angles {
            return Err(PolarError::ShapeMismatch { table, expected: angles, got: row.len() });
        }
        if let Some(&value) = row.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(PolarError::InvalidSpeed { table, value });
        }
    }
    Ok(())
}
