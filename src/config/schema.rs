use serde::{Deserialize, Serialize};

use crate::scoring::{FilterBounds, TierWeights};

pub const DEFAULT_NAME_COLUMN: &str = "Player";

/// Configuration file contents.
///
/// Every field is optional in the file; command-line flags override it.
///
/// Example YAML:
/// ```yaml
/// weights:
///   tier1: 0.5
///   tier2: 0.3
///   tier3: 0.2
/// filters:
///   min_minutes: 500
///   max_minutes: 4000
///   max_age: 23
/// default_group: zagueiros
/// name_column: Player
/// top: 20
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub weights: TierWeights,

    #[serde(default)]
    pub filters: FilterBounds,

    /// Group used when `score` is run without `--group` (label or slug)
    #[serde(default)]
    pub default_group: Option<String>,

    /// Column shown as the player's name in terminal output
    #[serde(default = "default_name_column")]
    pub name_column: String,

    /// Row limit for terminal output
    #[serde(default)]
    pub top: Option<usize>,
}

fn default_name_column() -> String {
    DEFAULT_NAME_COLUMN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: TierWeights::default(),
            filters: FilterBounds::default(),
            default_group: None,
            name_column: default_name_column(),
            top: None,
        }
    }
}
