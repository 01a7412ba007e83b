use chrono::NaiveDate;

/// Parse a calendar date that must match `YYYY-MM-DD` exactly.
///
/// chrono accepts unpadded fields like `2024-1-5`, so the parsed date is
/// rendered back out and compared to the input to reject anything that isn't
/// the canonical form.
pub fn parse_date_strict(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;

    if date.format("%Y-%m-%d").to_string() != value {
        return None;
    }

    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_dates() {
        assert_eq!(
            parse_date_strict("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        // Leap day on a leap year
        assert_eq!(
            parse_date_strict("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse_date_strict("2024-13-40"), None);
        assert_eq!(parse_date_strict("2023-02-29"), None);
        assert_eq!(parse_date_strict("2024-00-01"), None);
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(parse_date_strict("not-a-date"), None);
        assert_eq!(parse_date_strict(""), None);
        assert_eq!(parse_date_strict("2024-01-15T00:00:00"), None);
    }

    #[test]
    fn rejects_unpadded_variants() {
        assert_eq!(parse_date_strict("2024-1-5"), None);
        assert_eq!(parse_date_strict("2024-01-5"), None);
        assert_eq!(parse_date_strict(" 2024-01-15"), None);
    }
}
