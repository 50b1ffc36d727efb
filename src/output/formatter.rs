use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::{IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::positions::PositionGroup;
use crate::scoring::{ScoredRecord, ScoredTable};
use crate::table::POSITION_COLUMN;

/// Order used when presenting scored players; always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    /// Final Score
    #[default]
    Final,
    /// Impact per Minute; players without minutes go last
    Impact,
}

/// Records ordered for display. Ties keep input order.
pub fn rank_records(table: &ScoredTable, key: SortKey, top: Option<usize>) -> Vec<&ScoredRecord> {
    let mut ranked: Vec<&ScoredRecord> = table.records().iter().collect();
    ranked.sort_by(|a, b| match key {
        SortKey::Final => b
            .final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal),
        SortKey::Impact => match (a.impact_per_minute, b.impact_per_minute) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    });
    if let Some(n) = top {
        ranked.truncate(n);
    }
    ranked
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Two decimals, the precision scouts read scores at
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Impact per minute, or "n/a" when the player has no minutes
pub fn format_impact(impact: Option<f64>) -> String {
    impact.map(format_score).unwrap_or_else(|| "n/a".to_string())
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn player_name(table: &ScoredTable, record: &ScoredRecord, name_column: &str) -> String {
    match table.cell(record, name_column) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("row {}", record.source_row + 1),
    }
}

fn colored_score(score: f64, padded: &str) -> String {
    if score >= 7.0 {
        padded.green().bold().to_string()
    } else if score >= 4.0 {
        padded.yellow().bold().to_string()
    } else {
        padded.red().bold().to_string()
    }
}

/// Format ranked players as a table: Index, Final, Impact, Tier 1-3, Position, Name.
///
/// Score columns are right-aligned, 6 chars wide (fits "100.00").
pub fn format_scored_table(
    table: &ScoredTable,
    ranked: &[&ScoredRecord],
    name_column: &str,
    use_colors: bool,
) -> String {
    if ranked.is_empty() {
        return "No players to show.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 4;
    let score_width = 6;
    let position_width = 5;
    let separator = "  ";

    let header = format!(
        "{:>iw$} {:>sw$}{sep}{:>sw$}{sep}{:>sw$}{sep}{:>sw$}{sep}{:>sw$}{sep}{:<pw$}{sep}{}",
        "#",
        "Final",
        "Imp/1k",
        "T1",
        "T2",
        "T3",
        "Pos",
        name_column,
        iw = index_width,
        sw = score_width,
        pw = position_width,
        sep = separator,
    );

    let fixed_width = index_width + 1 + (score_width + separator.len()) * 5 + position_width + separator.len();

    let mut lines = Vec::with_capacity(ranked.len() + 1);
    lines.push(if use_colors {
        header.dimmed().to_string()
    } else {
        header
    });

    for (idx, record) in ranked.iter().enumerate() {
        let index_str = format!("{:>width$}", format!("{}.", idx + 1), width = index_width);
        let final_str = format!("{:>width$}", format_score(record.final_score), width = score_width);
        let impact_str = format!(
            "{:>width$}",
            format_impact(record.impact_per_minute),
            width = score_width
        );
        let tiers: Vec<String> = record
            .tier_scores
            .iter()
            .map(|t| format!("{:>width$}", format_score(*t), width = score_width))
            .collect();
        let position = table.cell(record, POSITION_COLUMN).unwrap_or_default();
        let position_str = format!("{:<width$}", position, width = position_width);

        let name = player_name(table, record, name_column);
        let name = match term_width {
            Some(width) if width > fixed_width + 10 => truncate_text(&name, width - fixed_width),
            Some(_) => truncate_text(&name, 20),
            None => name,
        };

        let line = if use_colors {
            format!(
                "{} {}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
                index_str.dimmed(),
                colored_score(record.final_score, &final_str),
                impact_str.cyan(),
                tiers[0],
                tiers[1],
                tiers[2],
                position_str.yellow(),
                name.bold(),
                sep = separator,
            )
        } else {
            format!(
                "{} {}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
                index_str,
                final_str,
                impact_str,
                tiers[0],
                tiers[1],
                tiers[2],
                position_str,
                name,
                sep = separator,
            )
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Format ranked players as tab-separated values: header row plus every
/// input and derived column, no colors.
pub fn format_tsv(table: &ScoredTable, ranked: &[&ScoredRecord]) -> String {
    let clean = |cell: &str| cell.replace(['\t', '\n'], " ");
    let mut lines = Vec::with_capacity(ranked.len() + 1);
    lines.push(
        table
            .column_names()
            .iter()
            .map(|c| clean(c.as_str()))
            .collect::<Vec<_>>()
            .join("\t"),
    );
    for record in ranked {
        lines.push(
            table
                .row_cells(record)
                .iter()
                .map(|c| clean(c.as_str()))
                .collect::<Vec<_>>()
                .join("\t"),
        );
    }
    lines.join("\n")
}

#[derive(Debug, Serialize)]
struct JsonMetric {
    raw: f64,
    normalized: f64,
}

#[derive(Debug, Serialize)]
struct JsonPlayer<'a> {
    rank: usize,
    row: usize,
    name: String,
    position: &'a str,
    age: f64,
    minutes: f64,
    tier_scores: [f64; 3],
    final_score: f64,
    impact_per_minute: Option<f64>,
    metrics: BTreeMap<&'a str, JsonMetric>,
}

/// Format ranked players as a pretty-printed JSON array
pub fn format_json(
    table: &ScoredTable,
    ranked: &[&ScoredRecord],
    name_column: &str,
) -> Result<String> {
    let players: Vec<JsonPlayer> = ranked
        .iter()
        .enumerate()
        .map(|(idx, record)| JsonPlayer {
            rank: idx + 1,
            row: record.source_row + 1,
            name: player_name(table, record, name_column),
            position: table.cell(record, POSITION_COLUMN).unwrap_or_default(),
            age: record.age,
            minutes: record.minutes,
            tier_scores: record.tier_scores,
            final_score: record.final_score,
            impact_per_minute: record.impact_per_minute,
            metrics: table
                .metrics()
                .iter()
                .enumerate()
                .map(|(m, name)| {
                    (
                        name.as_str(),
                        JsonMetric {
                            raw: record.metrics[m],
                            normalized: record.normalized[m],
                        },
                    )
                })
                .collect(),
        })
        .collect();

    serde_json::to_string_pretty(&players).context("Failed to serialize scores as JSON")
}

/// Write ranked players with all columns to a CSV file atomically
pub fn write_csv(table: &ScoredTable, ranked: &[&ScoredRecord], path: &Path) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    write_csv_to(table, ranked, &mut file)?;
    file.commit()
        .with_context(|| format!("Failed to save scores to {}", path.display()))?;
    Ok(())
}

/// Same as `write_csv` but to any writer (stdout)
pub fn write_csv_to<W: Write>(table: &ScoredTable, ranked: &[&ScoredRecord], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(table.column_names())
        .context("Failed to write CSV header")?;
    for record in ranked {
        writer
            .write_record(table.row_cells(record))
            .context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// One line per position group: slug, label, codes
pub fn format_group_list(use_colors: bool) -> String {
    PositionGroup::all()
        .iter()
        .map(|group| {
            let codes = group.codes().join(", ");
            if use_colors {
                format!(
                    "{:<20} {:<26} {}",
                    group.slug().cyan(),
                    group.label().bold(),
                    codes.yellow()
                )
            } else {
                format!("{:<20} {:<26} {}", group.slug(), group.label(), codes)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line description of one group and its three tiers
pub fn format_group_detail(group: PositionGroup, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let title = format!("{} ({})", group.label(), group.slug());
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });
    lines.push(format!("  Codes: {}", group.codes().join(", ")));
    for (idx, tier) in group.tiers().tiers().iter().enumerate() {
        let label = format!("Tier {}", idx + 1);
        let label = if use_colors {
            label.cyan().to_string()
        } else {
            label
        };
        lines.push(format!("  {}:", label));
        for metric in tier.iter() {
            lines.push(format!("    - {}", metric));
        }
    }
    lines.join("\n")
}
