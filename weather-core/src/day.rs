use chrono::{DateTime, NaiveDate};

/// Short English weekday for an ISO date (`2024-01-01` -> `Mon`).
///
/// RFC 3339 timestamps are accepted too. Input that parses as neither is
/// returned as-is.
pub fn format_day(date: &str) -> String {
    let trimmed = date.trim();

    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return day.format("%a").to_string();
    }

    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(dt) => dt.format("%a").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_iso_dates() {
        assert_eq!(format_day("2024-01-01"), "Mon");
        assert_eq!(format_day("2024-01-02"), "Tue");
        assert_eq!(format_day("2024-01-07"), "Sun");
    }

    #[test]
    fn formats_rfc3339_in_its_own_offset() {
        assert_eq!(format_day("2024-01-03T23:30:00+01:00"), "Wed");
    }

    #[test]
    fn malformed_input_passes_through() {
        assert_eq!(format_day("not a date"), "not a date");
        assert_eq!(format_day(""), "");
        assert_eq!(format_day("2024-13-45"), "2024-13-45");
    }
}
