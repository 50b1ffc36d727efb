use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::tiers::{self, TierDefinition};

/// Coarse role label grouping one or more raw position codes.
///
/// Labels are the ones scouts see in the exported spreadsheets; slugs are
/// the command-line friendly spelling accepted by `--group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionGroup {
    Goalkeepers,
    RightBacks,
    LeftBacks,
    CentreBacks,
    DefensiveMidfielders,
    CentralMidfielders,
    AttackingMidfielders,
    Wingers,
    Forwards,
}

/// Display order for listings
pub const ALL_GROUPS: [PositionGroup; 9] = [
    PositionGroup::Goalkeepers,
    PositionGroup::RightBacks,
    PositionGroup::LeftBacks,
    PositionGroup::CentreBacks,
    PositionGroup::DefensiveMidfielders,
    PositionGroup::CentralMidfielders,
    PositionGroup::AttackingMidfielders,
    PositionGroup::Wingers,
    PositionGroup::Forwards,
];

// The winger set is de-duplicated; it mixes wide midfield and wide forward codes.
const GOALKEEPER_CODES: &[&str] = &["GK"];
const RIGHT_BACK_CODES: &[&str] = &["RD"];
const LEFT_BACK_CODES: &[&str] = &["LD"];
const CENTRE_BACK_CODES: &[&str] = &["CD", "LCD", "RCD"];
const DEFENSIVE_MIDFIELD_CODES: &[&str] = &["CDM", "RCDM", "LCDM", "LDM", "RDM"];
const CENTRAL_MIDFIELD_CODES: &[&str] = &["RCM", "LCM"];
const ATTACKING_MIDFIELD_CODES: &[&str] = &["CAM"];
const WINGER_CODES: &[&str] = &["LM", "RM", "LCF", "RCF", "LAM", "RAM"];
const FORWARD_CODES: &[&str] = &["CF"];

impl PositionGroup {
    pub fn all() -> &'static [PositionGroup] {
        &ALL_GROUPS
    }

    pub fn label(&self) -> &'static str {
        match self {
            PositionGroup::Goalkeepers => "Goleiros",
            PositionGroup::RightBacks => "Laterais Direitos",
            PositionGroup::LeftBacks => "Laterais Esquerdos",
            PositionGroup::CentreBacks => "Zagueiros",
            PositionGroup::DefensiveMidfielders => "Volantes/Meio defensivos",
            PositionGroup::CentralMidfielders => "Segundos Volantes",
            PositionGroup::AttackingMidfielders => "Meio-Atacantes",
            PositionGroup::Wingers => "Extremos/Pontas",
            PositionGroup::Forwards => "Atacantes",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            PositionGroup::Goalkeepers => "goleiros",
            PositionGroup::RightBacks => "laterais-direitos",
            PositionGroup::LeftBacks => "laterais-esquerdos",
            PositionGroup::CentreBacks => "zagueiros",
            PositionGroup::DefensiveMidfielders => "volantes",
            PositionGroup::CentralMidfielders => "segundos-volantes",
            PositionGroup::AttackingMidfielders => "meio-atacantes",
            PositionGroup::Wingers => "extremos",
            PositionGroup::Forwards => "atacantes",
        }
    }

    /// Raw position codes accepted by this group
    pub fn codes(&self) -> &'static [&'static str] {
        match self {
            PositionGroup::Goalkeepers => GOALKEEPER_CODES,
            PositionGroup::RightBacks => RIGHT_BACK_CODES,
            PositionGroup::LeftBacks => LEFT_BACK_CODES,
            PositionGroup::CentreBacks => CENTRE_BACK_CODES,
            PositionGroup::DefensiveMidfielders => DEFENSIVE_MIDFIELD_CODES,
            PositionGroup::CentralMidfielders => CENTRAL_MIDFIELD_CODES,
            PositionGroup::AttackingMidfielders => ATTACKING_MIDFIELD_CODES,
            PositionGroup::Wingers => WINGER_CODES,
            PositionGroup::Forwards => FORWARD_CODES,
        }
    }

    /// Tier metric lists used to score this group
    pub fn tiers(&self) -> &'static TierDefinition {
        match self {
            PositionGroup::Goalkeepers => &tiers::GOALKEEPERS,
            PositionGroup::RightBacks | PositionGroup::LeftBacks => &tiers::FULL_BACKS,
            PositionGroup::CentreBacks => &tiers::CENTRE_BACKS,
            PositionGroup::DefensiveMidfielders => &tiers::DEFENSIVE_MIDFIELDERS,
            PositionGroup::CentralMidfielders => &tiers::CENTRAL_MIDFIELDERS,
            PositionGroup::AttackingMidfielders => &tiers::ATTACKING_MIDFIELDERS,
            PositionGroup::Wingers => &tiers::WINGERS,
            PositionGroup::Forwards => &tiers::FORWARDS,
        }
    }

}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown position group '{0}' (expected one of: {slugs})", slugs = valid_slugs())]
pub struct UnknownGroup(pub String);

fn valid_slugs() -> String {
    ALL_GROUPS
        .iter()
        .map(|g| g.slug())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for PositionGroup {
    type Err = UnknownGroup;

    /// Accepts either the display label (case-insensitive) or the slug
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ALL_GROUPS
            .iter()
            .copied()
            .find(|group| {
                group.slug() == needle.to_lowercase() || group.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownGroup(needle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_slug() {
        assert_eq!("zagueiros".parse::<PositionGroup>().unwrap(), PositionGroup::CentreBacks);
        assert_eq!("extremos".parse::<PositionGroup>().unwrap(), PositionGroup::Wingers);
    }

    #[test]
    fn test_parse_by_label_ignores_case() {
        assert_eq!(
            "volantes/meio defensivos".parse::<PositionGroup>().unwrap(),
            PositionGroup::DefensiveMidfielders
        );
        assert_eq!(
            "  Meio-Atacantes ".parse::<PositionGroup>().unwrap(),
            PositionGroup::AttackingMidfielders
        );
    }

    #[test]
    fn test_parse_unknown_lists_valid_slugs() {
        let err = "libero".parse::<PositionGroup>().unwrap_err();
        assert_eq!(err, UnknownGroup("libero".to_string()));
        let msg = anyhow::Error::new(err).to_string();
        assert!(msg.contains("libero"));
        assert!(msg.contains("goleiros"));
        assert!(msg.contains("atacantes"));
    }

    #[test]
    fn test_codes_are_unique_across_groups() {
        let mut seen = std::collections::HashSet::new();
        for group in PositionGroup::all() {
            for code in group.codes() {
                assert!(seen.insert(*code), "code {} appears twice", code);
            }
        }
    }

    #[test]
    fn test_full_backs_share_tiers() {
        assert_eq!(PositionGroup::RightBacks.tiers(), PositionGroup::LeftBacks.tiers());
        assert_ne!(PositionGroup::RightBacks.codes(), PositionGroup::LeftBacks.codes());
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(PositionGroup::Forwards.to_string(), "Atacantes");
    }
}
