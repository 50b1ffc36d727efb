use serde::{Deserialize, Serialize};

/// Weights applied to the three tier averages.
///
/// The engine uses them as given; a triple that does not sum to 1 still
/// scores, it just stops being a convex combination.
///
/// Example YAML:
/// ```yaml
/// weights:
///   tier1: 0.5
///   tier2: 0.3
///   tier3: 0.2
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierWeights {
    #[serde(default = "default_tier1")]
    pub tier1: f64,
    #[serde(default = "default_tier2")]
    pub tier2: f64,
    #[serde(default = "default_tier3")]
    pub tier3: f64,
}

fn default_tier1() -> f64 {
    0.5
}

fn default_tier2() -> f64 {
    0.3
}

fn default_tier3() -> f64 {
    0.2
}

impl TierWeights {
    pub fn new(tier1: f64, tier2: f64, tier3: f64) -> Self {
        Self { tier1, tier2, tier3 }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.tier1, self.tier2, self.tier3]
    }

    pub fn sum(&self) -> f64 {
        self.tier1 + self.tier2 + self.tier3
    }

    /// Parse a comma separated triple such as "0.5,0.3,0.2"
    pub fn parse(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected three comma separated weights, got '{}'", s));
        }
        let mut values = [0.0; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|e| format!("invalid weight '{}': {}", part, e))?;
        }
        Ok(Self::new(values[0], values[1], values[2]))
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            tier1: default_tier1(),
            tier2: default_tier2(),
            tier3: default_tier3(),
        }
    }
}

/// Row filter bounds: inclusive minutes range and an inclusive age ceiling.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterBounds {
    #[serde(default = "default_min_minutes")]
    pub min_minutes: f64,
    #[serde(default = "default_max_minutes")]
    pub max_minutes: f64,
    #[serde(default = "default_max_age")]
    pub max_age: f64,
}

fn default_min_minutes() -> f64 {
    0.0
}

fn default_max_minutes() -> f64 {
    10_000.0
}

fn default_max_age() -> f64 {
    40.0
}

impl Default for FilterBounds {
    fn default() -> Self {
        Self {
            min_minutes: default_min_minutes(),
            max_minutes: default_max_minutes(),
            max_age: default_max_age(),
        }
    }
}

impl FilterBounds {
    /// Missing values never pass: `None` for either field rejects the row.
    pub fn accepts(&self, minutes: Option<f64>, age: Option<f64>) -> bool {
        let minutes_ok = minutes
            .map(|m| m >= self.min_minutes && m <= self.max_minutes)
            .unwrap_or(false);
        let age_ok = age.map(|a| a <= self.max_age).unwrap_or(false);
        minutes_ok && age_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = TierWeights::default();
        assert_eq!(weights.as_array(), [0.5, 0.3, 0.2]);
        assert!((weights.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_weights() {
        let weights = TierWeights::parse("0.6, 0.3 ,0.1").unwrap();
        assert_eq!(weights, TierWeights::new(0.6, 0.3, 0.1));
    }

    #[test]
    fn test_parse_weights_wrong_arity() {
        let err = TierWeights::parse("0.5,0.5").unwrap_err();
        assert!(err.contains("three"));
    }

    #[test]
    fn test_parse_weights_bad_number() {
        let err = TierWeights::parse("0.5,abc,0.2").unwrap_err();
        assert!(err.contains("abc"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = FilterBounds {
            min_minutes: 500.0,
            max_minutes: 1000.0,
            max_age: 23.0,
        };
        assert!(bounds.accepts(Some(500.0), Some(23.0)));
        assert!(bounds.accepts(Some(1000.0), Some(18.0)));
        assert!(!bounds.accepts(Some(499.0), Some(20.0)));
        assert!(!bounds.accepts(Some(1001.0), Some(20.0)));
        assert!(!bounds.accepts(Some(700.0), Some(23.5)));
    }

    #[test]
    fn test_missing_values_never_pass() {
        let bounds = FilterBounds::default();
        assert!(!bounds.accepts(None, Some(20.0)));
        assert!(!bounds.accepts(Some(900.0), None));
    }

    #[test]
    fn test_partial_weights_parse() {
        let yaml = "tier1: 0.6\n";
        let weights: TierWeights = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(weights, TierWeights::new(0.6, 0.3, 0.2));
    }

    #[test]
    fn test_partial_bounds_parse() {
        let yaml = "max_age: 23\n";
        let bounds: FilterBounds = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(bounds.max_age, 23.0);
        assert_eq!(bounds.min_minutes, 0.0);
        assert_eq!(bounds.max_minutes, 10_000.0);
    }
}
