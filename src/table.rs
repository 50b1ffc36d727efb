use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub const POSITION_COLUMN: &str = "Position";
pub const AGE_COLUMN: &str = "Age";
pub const MINUTES_COLUMN: &str = "Minutes played";

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input has no header row")]
    EmptyHeader,

    #[error("required column '{0}' not found in header row")]
    MissingColumn(String),

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Player statistics as loaded from a spreadsheet export.
///
/// Cells are kept as text; numeric interpretation happens at scoring time so
/// placeholders like `-` and `63%` survive ingestion untouched. Construction
/// guarantees the Position, Age and Minutes played columns exist and every
/// row is as wide as the header.
#[derive(Debug, Clone)]
pub struct PlayerTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    position_idx: usize,
    age_idx: usize,
    minutes_idx: usize,
}

impl PlayerTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        if headers.is_empty() {
            return Err(TableError::EmptyHeader);
        }

        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| TableError::MissingColumn(name.to_string()))
        };
        let position_idx = find(POSITION_COLUMN)?;
        let age_idx = find(AGE_COLUMN)?;
        let minutes_idx = find(MINUTES_COLUMN)?;

        for (i, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(TableError::RowLength {
                    row: i + 1,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
        }

        Ok(Self {
            headers,
            rows,
            position_idx,
            age_idx,
            minutes_idx,
        })
    }

    /// Read a delimited file with a header row
    pub fn from_reader<R: Read>(rdr: R, delimiter: u8) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(TableError::EmptyHeader);
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        debug!(columns = headers.len(), rows = rows.len(), "parsed player table");

        Self::new(headers, rows)
    }

    pub fn from_path(path: &Path, delimiter: u8) -> Result<Self, TableError> {
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, delimiter)?;
        info!("loaded {} players from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with exactly this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn age_index(&self) -> usize {
        self.age_idx
    }

    pub fn position(&self, row: usize) -> &str {
        &self.rows[row][self.position_idx]
    }

    /// Age as a number; `None` when the cell is not numeric
    pub fn age(&self, row: usize) -> Option<f64> {
        parse_numeric(&self.rows[row][self.age_idx])
    }

    /// Minutes played as a number; `None` when the cell is not numeric
    pub fn minutes(&self, row: usize) -> Option<f64> {
        parse_numeric(&self.rows[row][self.minutes_idx])
    }
}

/// Strict numeric coercion: anything unparsable is missing, never zero.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Pick a delimiter from the file extension: `.tsv` means tab, anything else comma
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Player,Position,Age,Minutes played,Goals
Ana,CF,24,1000,5
Bia,CD, n/a ,850,-
";

    fn sample_table() -> PlayerTable {
        PlayerTable::from_reader(SAMPLE.as_bytes(), b',').unwrap()
    }

    #[test]
    fn test_load_from_reader() {
        let table = sample_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.headers().len(), 5);
        assert_eq!(table.position(0), "CF");
        assert_eq!(table.minutes(1), Some(850.0));
    }

    #[test]
    fn test_cells_are_trimmed_and_kept_as_text() {
        let table = sample_table();
        assert_eq!(table.rows()[1][2], "n/a");
        assert_eq!(table.rows()[1][4], "-");
    }

    #[test]
    fn test_non_numeric_age_is_missing() {
        let table = sample_table();
        assert_eq!(table.age(0), Some(24.0));
        assert_eq!(table.age(1), None);
    }

    #[test]
    fn test_missing_base_column_is_rejected() {
        let input = "Player,Position,Minutes played\nAna,CF,100\n";
        let err = PlayerTable::from_reader(input.as_bytes(), b',').unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(ref c) if c == "Age"));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = PlayerTable::new(
            vec!["Position".into(), "Age".into(), "Minutes played".into()],
            vec![vec!["CF".into(), "20".into()]],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::RowLength { row: 1, expected: 3, found: 2 }));
    }

    #[test]
    fn test_tab_delimited() {
        let input = "Position\tAge\tMinutes played\nGK\t30\t900\n";
        let table = PlayerTable::from_reader(input.as_bytes(), b'\t').unwrap();
        assert_eq!(table.position(0), "GK");
        assert_eq!(table.age(0), Some(30.0));
    }

    #[test]
    fn test_column_lookup_is_case_sensitive() {
        let table = sample_table();
        assert_eq!(table.column_index("Goals"), Some(4));
        assert!(!table.has_column("goals"));
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric(" 23.5 "), Some(23.5));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("-"), None);
    }

    #[test]
    fn test_delimiter_for_extension() {
        assert_eq!(delimiter_for(Path::new("players.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("players.TSV")), b'\t');
        assert_eq!(delimiter_for(Path::new("players.csv")), b',');
        assert_eq!(delimiter_for(Path::new("players")), b',');
    }
}
