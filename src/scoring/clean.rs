/// Turn a metric cell into a number, never failing.
///
/// A bare `-` means zero, a trailing `%` is dropped, and anything that still
/// does not parse to a finite number becomes 0.
pub fn clean_metric_value(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let text = if trimmed == "-" {
        "0"
    } else {
        trimmed.trim_end_matches('%').trim_end()
    };
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(clean_metric_value("12"), 12.0);
        assert_eq!(clean_metric_value(" 3.5 "), 3.5);
        assert_eq!(clean_metric_value("-4"), -4.0);
    }

    #[test]
    fn test_dash_is_zero() {
        assert_eq!(clean_metric_value("-"), 0.0);
        assert_eq!(clean_metric_value(" - "), 0.0);
    }

    #[test]
    fn test_percent_suffix_stripped() {
        assert_eq!(clean_metric_value("63%"), 63.0);
        assert_eq!(clean_metric_value("47.5 %"), 47.5);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(clean_metric_value(""), 0.0);
        assert_eq!(clean_metric_value("n/a"), 0.0);
        assert_eq!(clean_metric_value("NaN"), 0.0);
        assert_eq!(clean_metric_value("inf"), 0.0);
        assert_eq!(clean_metric_value("%"), 0.0);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        for raw in ["-", "63%", "12.25", "", "abc", "-0.5", "1e3", "7 %"] {
            let once = clean_metric_value(raw);
            let twice = clean_metric_value(&once.to_string());
            assert_eq!(once, twice, "cleaning '{}' twice changed the value", raw);
        }
    }
}
