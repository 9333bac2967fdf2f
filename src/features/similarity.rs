//! Weighted-distance similarity between behavioral feature records.

use super::BehavioralFeatures;

/// Per-dimension weights: movement speed and height discriminate better
/// than the categorical codes, so they count double.
const WEIGHTS: [f64; BehavioralFeatures::DIM] = [2.0, 2.0, 1.0, 1.0, 1.0];

/// Calibration constant: weighted distance at which two records are
/// considered completely different.
const MAX_DISTANCE: f64 = 10.0;

/// Behavioral similarity in [0, 1]: 1.0 for identical records, 0.0 for
/// completely different ones. Symmetric, never negative.
pub fn similarity(a: &BehavioralFeatures, b: &BehavioralFeatures) -> f64 {
    let va = a.encode();
    let vb = b.encode();

    let mut sum = 0.0;
    for i in 0..BehavioralFeatures::DIM {
        let d = (va[i] - vb[i]) * WEIGHTS[i];
        sum += d * d;
    }
    let distance = sum.sqrt();

    (1.0 - distance / MAX_DISTANCE).max(0.0)
}
