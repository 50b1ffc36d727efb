use super::config::{FilterBounds, TierWeights};

const SUM_TOLERANCE: f64 = 1e-6;

/// Validate scoring parameters before a run.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(weights: &TierWeights, bounds: &FilterBounds) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, weight) in weights.as_array().iter().enumerate() {
        if !weight.is_finite() {
            errors.push(format!("weights.tier{}: must be a finite number", i + 1));
        } else if *weight < 0.0 {
            errors.push(format!("weights.tier{}: must be non-negative", i + 1));
        }
    }

    let named = [
        ("filters.min_minutes", bounds.min_minutes),
        ("filters.max_minutes", bounds.max_minutes),
        ("filters.max_age", bounds.max_age),
    ];
    for (name, value) in named {
        if !value.is_finite() {
            errors.push(format!("{}: must be a finite number", name));
        } else if value < 0.0 {
            errors.push(format!("{}: must be non-negative", name));
        }
    }

    if bounds.min_minutes > bounds.max_minutes {
        errors.push(format!(
            "filters: min_minutes ({}) is greater than max_minutes ({})",
            bounds.min_minutes, bounds.max_minutes
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Non-fatal remarks about a weight triple.
///
/// Weights that do not add up to 1 still score; the result just is not a
/// weighted average any more.
pub fn weight_warnings(weights: &TierWeights) -> Vec<String> {
    let mut warnings = Vec::new();
    let sum = weights.sum();
    if sum.is_finite() && (sum - 1.0).abs() > SUM_TOLERANCE {
        warnings.push(format!(
            "tier weights sum to {} rather than 1; final scores will not stay within 0-10",
            sum
        ));
    }
    if weights.as_array().iter().all(|w| *w == 0.0) {
        warnings.push("all tier weights are zero; every final score will be 0".to_string());
    }
    warnings
}
