//! Creation timestamps in the long Brazilian-Portuguese form the marker list
//! shows, e.g. "19 de outubro de 2026 às 14:05".
use chrono::{Locale, NaiveDateTime};

const LONG_FORMAT: &str = "%d de %B de %Y às %H:%M";

/// Format a local timestamp as "DD de <mês> de YYYY às HH:MM".
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    // The format prints no zone, so the UTC tag never shows.
    dt.and_utc()
        .format_localized(LONG_FORMAT, Locale::pt_BR)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_format_timestamp_long_form() {
        assert_eq!(
            format_timestamp(&at(2026, 10, 19, 14, 5)),
            "19 de outubro de 2026 às 14:05"
        );
    }

    #[test]
    fn test_format_timestamp_pads_day_and_time() {
        assert_eq!(
            format_timestamp(&at(2024, 3, 2, 9, 7)),
            "02 de março de 2024 às 09:07"
        );
    }

    #[test]
    fn test_format_timestamp_month_names() {
        assert_eq!(
            format_timestamp(&at(2025, 1, 1, 0, 0)),
            "01 de janeiro de 2025 às 00:00"
        );
        assert_eq!(
            format_timestamp(&at(2025, 12, 31, 23, 59)),
            "31 de dezembro de 2025 às 23:59"
        );
    }
}
