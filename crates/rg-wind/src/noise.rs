//! Smooth deterministic noise for the base wind.

const OCTAVES: usize = 3;
const PHASE_STEP: f64 = 13.2;

/// Sum of three sine octaves (frequency doubling, amplitude halving) with
/// fixed phase offsets, normalized to `[-1, 1]`.
pub fn fractal_noise(t: f64) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut norm = 0.0;
    for i in 0..OCTAVES {
        total += (t * frequency + i as f64 * PHASE_STEP).sin() * amplitude;
        norm += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    total / norm
}
