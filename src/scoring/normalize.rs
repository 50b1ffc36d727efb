/// Upper end of the normalized scale; the lower end is 0.
pub const SCALE_MAX: f64 = 10.0;

/// Min-max rescale into `[0, SCALE_MAX]`, fit on `values` alone.
///
/// A constant column (including a single value) maps every entry to 0.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Halved so that extreme finite columns cannot overflow to infinity.
    let half_range = max / 2.0 - min / 2.0;

    values
        .iter()
        .map(|&v| {
            if half_range > 0.0 {
                ((v / 2.0 - min / 2.0) / half_range * SCALE_MAX).clamp(0.0, SCALE_MAX)
            } else {
                0.0
            }
        })
        .collect()
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
