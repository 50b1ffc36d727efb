use tracing::{debug, warn};

use super::clean::clean_metric_value;
use super::config::{FilterBounds, TierWeights};
use super::normalize::{mean, min_max_scale};
use crate::positions::{PositionGroup, TierDefinition};
use crate::table::PlayerTable;

pub const NORM_SUFFIX: &str = "_norm";
pub const TIER_COLUMNS: [&str; 3] = ["Tier 1", "Tier 2", "Tier 3"];
pub const FINAL_SCORE_COLUMN: &str = "Final Score";
pub const IMPACT_COLUMN: &str = "Impact per Minute";

/// Everything one scoring run needs besides the table itself.
#[derive(Debug, Clone)]
pub struct ScoringRequest<'a> {
    /// Raw position codes a row must carry to be scored
    pub positions: &'a [&'a str],
    pub tiers: &'a TierDefinition,
    pub weights: TierWeights,
    pub bounds: FilterBounds,
}

impl ScoringRequest<'static> {
    /// Request scoring one position group with its built-in tiers
    pub fn for_group(group: PositionGroup, weights: TierWeights, bounds: FilterBounds) -> Self {
        Self {
            positions: group.codes(),
            tiers: group.tiers(),
            weights,
            bounds,
        }
    }
}

/// One player that survived filtering, with every derived value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    /// Row index in the input table
    pub source_row: usize,
    /// Original cells, untouched
    pub values: Vec<String>,
    pub age: f64,
    pub minutes: f64,
    /// Cleaned metric values, aligned with `ScoredTable::metrics`
    pub metrics: Vec<f64>,
    /// Normalized metric values in [0, 10], aligned with `ScoredTable::metrics`
    pub normalized: Vec<f64>,
    pub tier_scores: [f64; 3],
    pub final_score: f64,
    /// `None` when the player logged zero minutes
    pub impact_per_minute: Option<f64>,
}

/// Filtered, cleaned and scored copy of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTable {
    headers: Vec<String>,
    metrics: Vec<String>,
    metric_columns: Vec<usize>,
    age_column: usize,
    records: Vec<ScoredRecord>,
}

impl ScoredTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Required metric columns in first-seen tier order
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn records(&self) -> &[ScoredRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Original cell of a record by column name
    pub fn cell<'r>(&self, record: &'r ScoredRecord, column: &str) -> Option<&'r str> {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|idx| record.values.get(idx))
            .map(String::as_str)
    }

    /// Input columns followed by the derived ones
    pub fn column_names(&self) -> Vec<String> {
        let mut names = self.headers.clone();
        names.extend(self.metrics.iter().map(|m| format!("{}{}", m, NORM_SUFFIX)));
        names.extend(TIER_COLUMNS.iter().map(|c| c.to_string()));
        names.push(FINAL_SCORE_COLUMN.to_string());
        names.push(IMPACT_COLUMN.to_string());
        names
    }

    /// Cells for one record, matching `column_names`.
    ///
    /// Metric and age cells carry their numeric interpretation rather than
    /// the raw text; undefined impact renders as an empty cell.
    pub fn row_cells(&self, record: &ScoredRecord) -> Vec<String> {
        let mut cells = record.values.clone();
        cells[self.age_column] = format_number(record.age);
        for (metric_idx, &col) in self.metric_columns.iter().enumerate() {
            cells[col] = format_number(record.metrics[metric_idx]);
        }
        cells.extend(record.normalized.iter().map(|v| format_number(*v)));
        cells.extend(record.tier_scores.iter().map(|v| format_number(*v)));
        cells.push(format_number(record.final_score));
        cells.push(
            record
                .impact_per_minute
                .map(format_number)
                .unwrap_or_default(),
        );
        cells
    }
}

/// Result of one scoring run. The two non-scored variants are
/// user-correctable conditions, not failures.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Scored(ScoredTable),
    /// No row passed the position, minutes and age filters
    NoPlayersMatched,
    /// Tier columns absent from the input, in first-seen order
    MissingColumns(Vec<String>),
}

impl ScoreOutcome {
    pub fn table(&self) -> Option<&ScoredTable> {
        match self {
            ScoreOutcome::Scored(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<ScoredTable> {
        match self {
            ScoreOutcome::Scored(table) => Some(table),
            _ => None,
        }
    }
}

/// Filter, clean, normalize and score players.
///
/// Normalization is fit on the filtered rows only, so scores are relative
/// to the current player pool. The input table is never modified.
pub fn score_players(table: &PlayerTable, request: &ScoringRequest) -> ScoreOutcome {
    let selected: Vec<usize> = (0..table.len())
        .filter(|&row| {
            request.positions.contains(&table.position(row))
                && request.bounds.accepts(table.minutes(row), table.age(row))
        })
        .collect();
    debug!(
        total = table.len(),
        selected = selected.len(),
        "applied position, minutes and age filters"
    );

    if selected.is_empty() {
        return ScoreOutcome::NoPlayersMatched;
    }

    let required = request.tiers.required_columns();
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        warn!("missing required metric columns: {:?}", missing);
        return ScoreOutcome::MissingColumns(missing);
    }

    let metric_columns: Vec<usize> = required
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();

    // Column-major: cleaned[metric][player]
    let cleaned: Vec<Vec<f64>> = metric_columns
        .iter()
        .map(|&col| {
            selected
                .iter()
                .map(|&row| clean_metric_value(&table.rows()[row][col]))
                .collect()
        })
        .collect();
    let normalized: Vec<Vec<f64>> = cleaned.iter().map(|col| min_max_scale(col)).collect();

    // Tier lists may repeat a name; each occurrence counts toward the mean.
    let tier_members: Vec<Vec<usize>> = request
        .tiers
        .tiers()
        .iter()
        .map(|names| {
            names
                .iter()
                .filter_map(|name| required.iter().position(|r| r == name))
                .collect()
        })
        .collect();

    let weights = request.weights.as_array();
    let records: Vec<ScoredRecord> = selected
        .iter()
        .enumerate()
        .map(|(player, &row)| {
            let metrics: Vec<f64> = cleaned.iter().map(|col| col[player]).collect();
            let norm: Vec<f64> = normalized.iter().map(|col| col[player]).collect();

            let mut tier_scores = [0.0; 3];
            for (slot, members) in tier_scores.iter_mut().zip(&tier_members) {
                let values: Vec<f64> = members.iter().map(|&m| norm[m]).collect();
                *slot = mean(&values);
            }

            let final_score = tier_scores
                .iter()
                .zip(weights.iter())
                .map(|(score, weight)| score * weight)
                .sum::<f64>();

            // Both are Some: the filter rejects rows without numeric age or minutes.
            let minutes = table.minutes(row).unwrap_or_default();
            let age = table.age(row).unwrap_or_default();
            let impact_per_minute = if minutes == 0.0 {
                None
            } else {
                Some(final_score / minutes * 1000.0)
            };

            ScoredRecord {
                source_row: row,
                values: table.rows()[row].clone(),
                age,
                minutes,
                metrics,
                normalized: norm,
                tier_scores,
                final_score,
                impact_per_minute,
            }
        })
        .collect();

    let undefined = records
        .iter()
        .filter(|r| r.impact_per_minute.is_none())
        .count();
    if undefined > 0 {
        debug!("{} players with zero minutes have no impact per minute", undefined);
    }

    ScoreOutcome::Scored(ScoredTable {
        headers: table.headers().to_vec(),
        metrics: required.iter().map(|s| s.to_string()).collect(),
        metric_columns,
        age_column: table.age_index(),
        records,
    })
}

/// Shortest round-trippable rendering, without a trailing ".0" on integers
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIERS: TierDefinition = TierDefinition::new(&["Goals"], &["Passes"], &["Shots"]);

    fn make_table(rows: &[[&str; 7]]) -> PlayerTable {
        let headers = ["Player", "Position", "Age", "Minutes played", "Goals", "Passes", "Shots"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect();
        PlayerTable::new(headers, rows).unwrap()
    }

    fn request(weights: TierWeights) -> ScoringRequest<'static> {
        ScoringRequest {
            positions: &["CF"],
            tiers: &TIERS,
            weights,
            bounds: FilterBounds {
                min_minutes: 0.0,
                max_minutes: 5000.0,
                max_age: 30.0,
            },
        }
    }

    fn scored(outcome: ScoreOutcome) -> ScoredTable {
        match outcome {
            ScoreOutcome::Scored(table) => table,
            other => panic!("expected scored table, got {:?}", other),
        }
    }

    #[test]
    fn test_two_forward_example() {
        let table = make_table(&[
            ["A", "CF", "24", "1000", "10", "5", "5"],
            ["B", "CF", "24", "1200", "20", "5", "5"],
        ]);
        let result = scored(score_players(&table, &request(TierWeights::new(0.5, 0.3, 0.2))));

        let a = &result.records()[0];
        let b = &result.records()[1];
        assert_eq!(a.normalized[0], 0.0);
        assert_eq!(b.normalized[0], 10.0);
        assert_eq!(a.tier_scores, [0.0, 0.0, 0.0]);
        assert_eq!(b.tier_scores, [10.0, 0.0, 0.0]);
        assert_eq!(a.final_score, 0.0);
        assert!((b.final_score - 5.0).abs() < 1e-12);
        assert_eq!(a.impact_per_minute, Some(0.0));
        assert!((b.impact_per_minute.unwrap() - 4.166_666_666_7).abs() < 1e-6);
    }

    #[test]
    fn test_filter_drops_other_positions_old_and_unknown_age() {
        let table = make_table(&[
            ["A", "CF", "24", "1000", "1", "1", "1"],
            ["B", "GK", "24", "1000", "1", "1", "1"],
            ["C", "CF", "31", "1000", "1", "1", "1"],
            ["D", "CF", "?", "1000", "1", "1", "1"],
            ["E", "CF", "30", "6000", "1", "1", "1"],
            ["F", "CF", "30", "5000", "1", "1", "1"],
        ]);
        let result = scored(score_players(&table, &request(TierWeights::default())));
        let rows: Vec<usize> = result.records().iter().map(|r| r.source_row).collect();
        assert_eq!(rows, vec![0, 5]);
    }

    #[test]
    fn test_no_players_matched() {
        let table = make_table(&[["A", "GK", "24", "1000", "1", "1", "1"]]);
        let outcome = score_players(&table, &request(TierWeights::default()));
        assert_eq!(outcome, ScoreOutcome::NoPlayersMatched);
        assert!(outcome.table().is_none());
    }

    #[test]
    fn test_missing_columns_reported() {
        const WIDE: TierDefinition =
            TierDefinition::new(&["Goals", "Saves"], &["Passes", "Saves"], &["Tackles"]);
        let table = make_table(&[["A", "CF", "24", "1000", "1", "1", "1"]]);
        let mut req = request(TierWeights::default());
        req.tiers = &WIDE;
        let outcome = score_players(&table, &req);
        assert_eq!(
            outcome,
            ScoreOutcome::MissingColumns(vec!["Saves".to_string(), "Tackles".to_string()])
        );
    }

    #[test]
    fn test_empty_filter_checked_before_columns() {
        const WIDE: TierDefinition = TierDefinition::new(&["Saves"], &["Passes"], &["Shots"]);
        let table = make_table(&[["A", "GK", "24", "1000", "1", "1", "1"]]);
        let mut req = request(TierWeights::default());
        req.tiers = &WIDE;
        assert_eq!(score_players(&table, &req), ScoreOutcome::NoPlayersMatched);
    }

    #[test]
    fn test_placeholders_are_cleaned() {
        let table = make_table(&[
            ["A", "CF", "24", "1000", "-", "80%", "x"],
            ["B", "CF", "24", "1000", "4", "60%", "2"],
        ]);
        let result = scored(score_players(&table, &request(TierWeights::default())));
        assert_eq!(result.records()[0].metrics, vec![0.0, 80.0, 0.0]);
        assert_eq!(result.records()[1].metrics, vec![4.0, 60.0, 2.0]);
        assert_eq!(result.records()[0].normalized, vec![0.0, 10.0, 0.0]);
    }

    #[test]
    fn test_zero_minutes_has_undefined_impact() {
        let table = make_table(&[
            ["A", "CF", "24", "0", "3", "1", "1"],
            ["B", "CF", "24", "900", "1", "1", "1"],
        ]);
        let result = scored(score_players(&table, &request(TierWeights::default())));
        assert_eq!(result.records()[0].impact_per_minute, None);
        assert!(result.records()[1].impact_per_minute.is_some());
    }

    #[test]
    fn test_extreme_metric_values_stay_finite() {
        let table = make_table(&[
            ["A", "CF", "24", "1000", "-1e308", "1", "1"],
            ["B", "CF", "24", "1000", "0", "1", "1"],
            ["C", "CF", "24", "1000", "1e308", "1", "1"],
        ]);
        let result = scored(score_players(&table, &request(TierWeights::default())));
        let goals: Vec<f64> = result.records().iter().map(|r| r.normalized[0]).collect();
        assert_eq!(goals, vec![0.0, 5.0, 10.0]);
        assert!(result.records().iter().all(|r| r.final_score.is_finite()));
        assert_eq!(result.records()[2].final_score, 5.0);
    }

    #[test]
    fn test_weights_are_not_normalized() {
        let table = make_table(&[
            ["A", "CF", "24", "1000", "0", "0", "0"],
            ["B", "CF", "24", "1000", "1", "1", "1"],
        ]);
        let result = scored(score_players(&table, &request(TierWeights::new(1.0, 1.0, 1.0))));
        assert_eq!(result.records()[1].final_score, 30.0);
    }

    #[test]
    fn test_repeated_tier_column_counts_twice() {
        const REPEAT: TierDefinition =
            TierDefinition::new(&["Goals", "Goals", "Passes"], &["Passes"], &["Shots"]);
        let table = make_table(&[
            ["A", "CF", "24", "1000", "0", "1", "0"],
            ["B", "CF", "24", "1000", "1", "0", "0"],
        ]);
        let mut req = request(TierWeights::default());
        req.tiers = &REPEAT;
        let result = scored(score_players(&table, &req));
        assert_eq!(result.metrics(), &["Goals", "Passes", "Shots"]);
        assert!((result.records()[1].tier_scores[0] - 20.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_input_table_untouched() {
        let table = make_table(&[["A", "CF", "24", "1000", "-", "50%", "1"]]);
        let before = table.rows().to_vec();
        let _ = score_players(&table, &request(TierWeights::default()));
        assert_eq!(table.rows(), before.as_slice());
    }

    #[test]
    fn test_column_names_and_cells_align() {
        let table = make_table(&[
            ["A", "CF", "24.0", "1000", "-", "5", "5"],
            ["B", "CF", "24", "0", "2", "5", "5"],
        ]);
        let result = scored(score_players(&table, &request(TierWeights::default())));
        let names = result.column_names();
        assert_eq!(names.len(), 7 + 3 + 3 + 2);
        assert_eq!(names[7], "Goals_norm");
        assert_eq!(names[names.len() - 1], IMPACT_COLUMN);

        let a = result.row_cells(&result.records()[0]);
        assert_eq!(a.len(), names.len());
        assert_eq!(a[2], "24");
        assert_eq!(a[4], "0");
        let b = result.row_cells(&result.records()[1]);
        assert_eq!(b[names.len() - 1], "");
        assert_eq!(result.cell(&result.records()[1], "Player"), Some("B"));
    }

    #[test]
    fn test_for_group_uses_static_tables() {
        let req = ScoringRequest::for_group(
            PositionGroup::CentreBacks,
            TierWeights::default(),
            FilterBounds::default(),
        );
        assert_eq!(req.positions, &["CD", "LCD", "RCD"]);
        assert_eq!(req.tiers, PositionGroup::CentreBacks.tiers());
    }
}
