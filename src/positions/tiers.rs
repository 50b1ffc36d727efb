/// Three ordered lists of metric column names scored for a position group.
///
/// Column names must match the spreadsheet headers exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierDefinition {
    pub tier1: &'static [&'static str],
    pub tier2: &'static [&'static str],
    pub tier3: &'static [&'static str],
}

impl TierDefinition {
    pub const fn new(
        tier1: &'static [&'static str],
        tier2: &'static [&'static str],
        tier3: &'static [&'static str],
    ) -> Self {
        Self { tier1, tier2, tier3 }
    }

    pub fn tiers(&self) -> [&'static [&'static str]; 3] {
        [self.tier1, self.tier2, self.tier3]
    }

    /// Union of all tier columns, first-seen order, without duplicates
    pub fn required_columns(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for name in self.tier1.iter().chain(self.tier2).chain(self.tier3) {
            if !out.contains(name) {
                out.push(name);
            }
        }
        out
    }
}

pub const GOALKEEPERS: TierDefinition = TierDefinition::new(
    &["Goals Conceded", "Saves", "Clean sheets"],
    &["Passes", "Passes accurate, %", "Long Passes", "Long Passes Completed"],
    &["Crosses", "Crosses won", "Goal Kicks", "Tackles successful"],
);

/// Shared by the right-back and left-back groups.
pub const FULL_BACKS: TierDefinition = TierDefinition::new(
    &[
        "Defensive challenges",
        "Defensive challenges won, %",
        "Final third entries",
        "Final third entries through carry",
        "Crosses",
        "Crosses accurate",
    ],
    &["Tackles", "Tackles successful", "Interceptions"],
    &[
        "Passes",
        "Passes accurate, %",
        "Progressive passes",
        "Long passes",
        "Long passes accurate",
        "Attacking challenges",
        "Attacking challenges won, %",
        "Goals",
    ],
);

pub const CENTRE_BACKS: TierDefinition = TierDefinition::new(
    &[
        "Defensive challenges",
        "Defensive challenges won, %",
        "Air challenges",
        "Air challenges won",
    ],
    &[
        "Tackles",
        "Tackles successful",
        "Interceptions",
        "Passes accurate, %",
        "Passes",
    ],
    &[
        "Challenges",
        "Challenges won",
        "Progressive passes",
        "Progressive passes accurate",
        "Crosses",
        "Crosses accurate",
        "Goals",
    ],
);

pub const CENTRAL_MIDFIELDERS: TierDefinition = TierDefinition::new(
    &[
        "Defensive challenges",
        "Defensive challenges won, %",
        "Interceptions",
        "Passes",
        "Passes accurate, %",
        "Progressive passes",
        "Progressive passes accurate",
    ],
    &[
        "Tackles",
        "Tackles successful",
        "Crosses",
        "Crosses accurate",
        "Picking up",
        "Key passes",
        "Key passes accurate",
    ],
    &[
        "Challenges",
        "Challenges won, %",
        "Long passes",
        "Long passes accurate",
        "Attacking challenges",
        "Attacking challenges won, %",
        "Final third entries",
        "Final third entries through carry",
        "Shots",
        "Shots on target",
        "Goals",
    ],
);

pub const DEFENSIVE_MIDFIELDERS: TierDefinition = TierDefinition::new(
    &["Defensive challenges", "Defensive challenges won", "Picking up"],
    &[
        "Tackles",
        "Tackles successful",
        "Interceptions",
        "Crosses",
        "Crosses accurate",
        "Passes",
        "Passes accurate, %",
    ],
    &[
        "Challenges",
        "Challenges won, %",
        "Progressive passes",
        "Progressive passes accurate",
        "Long passes",
        "Long passes accurate",
        "Attacking challenges",
        "Attacking challenges won, %",
        "Goals",
    ],
);

pub const ATTACKING_MIDFIELDERS: TierDefinition = TierDefinition::new(
    &[
        "Passes",
        "Passes accurate, %",
        "Key passes",
        "Key passes accurate",
        "Progressive passes",
        "Progressive passes accurate",
    ],
    &[
        "Passes into the penalty box",
        "Passes into the penalty box accurate",
        "Final third entries",
        "Final third entries through carry",
        "Attacking challenges",
        "Attacking challenges won, %",
    ],
    &[
        "Shots",
        "Shots on target",
        "Goals",
        "Crosses",
        "Crosses accurate",
        "Challenges",
        "Challenges won, %",
    ],
);

pub const WINGERS: TierDefinition = TierDefinition::new(
    &[
        "Attacking challenges",
        "Attacking challenges won, %",
        "Crosses",
        "Crosses accurate",
        "Final third entries",
        "Final third entries through carry",
    ],
    &[
        "Key passes",
        "Key passes accurate",
        "Passes into the penalty box",
        "Passes into the penalty box accurate",
        "Shots",
        "Shots on target",
    ],
    &[
        "Goals",
        "Passes",
        "Passes accurate, %",
        "Progressive passes",
        "Challenges",
        "Challenges won, %",
    ],
);

pub const FORWARDS: TierDefinition = TierDefinition::new(
    &["Goals", "Shots", "Shots on target"],
    &[
        "Attacking challenges",
        "Attacking challenges won, %",
        "Air challenges",
        "Air challenges won",
        "Key passes",
        "Key passes accurate",
    ],
    &[
        "Passes",
        "Passes accurate, %",
        "Passes into the penalty box",
        "Challenges",
        "Challenges won, %",
    ],
);
