pub mod groups;
pub mod tiers;

pub use groups::{PositionGroup, UnknownGroup};
pub use tiers::TierDefinition;
