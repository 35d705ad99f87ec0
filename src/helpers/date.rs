//! Date helper functions

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

use crate::i18n::Locale;

/// Display pattern used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "DD MMM YYYY";

const MONTH_NAME_MARK: &str = "\u{1}";
const MONTH_ABBR_MARK: &str = "\u{2}";

/// Parse a publication timestamp from the content backend
///
/// Accepts RFC 3339 as well as the `2021-04-19T18:00:00+0000` form the
/// Prismic API emits. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(date) = DateTime::parse_from_str(raw, format) {
            return Some(date.with_timezone(&Utc));
        }
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a publication date for display, e.g. "19 Abr 2021"
///
/// Unpublished posts have no date and render as an empty string.
pub fn format_display_date(date: Option<&DateTime<Utc>>, locale: Locale) -> String {
    date.map(|date| format_date_with(date, DEFAULT_DATE_FORMAT, locale))
        .unwrap_or_default()
}

/// Format a date using a Moment.js-compatible pattern with localized month names
///
/// # Examples
/// ```ignore
/// format_date_with(&date, "DD MMM YYYY", Locale::PtBr) // -> "19 Abr 2021"
/// ```
///
/// A pattern chrono cannot render falls back to [`DEFAULT_DATE_FORMAT`].
pub fn format_date_with(date: &DateTime<Utc>, format: &str, locale: Locale) -> String {
    let mut chrono_format = moment_to_chrono_format(format);
    if StrftimeItems::new(&chrono_format).any(|item| matches!(item, Item::Error)) {
        tracing::warn!(
            "Invalid date format {:?}, using {:?}",
            format,
            DEFAULT_DATE_FORMAT
        );
        chrono_format = moment_to_chrono_format(DEFAULT_DATE_FORMAT);
    }
    date.format(&chrono_format)
        .to_string()
        .replace(MONTH_NAME_MARK, locale.month_name(date.month()))
        .replace(MONTH_ABBR_MARK, locale.month_abbr(date.month()))
}

/// Convert Moment.js format to chrono format
///
/// Month names are left as marks and filled in per locale afterwards,
/// since chrono only knows English names. Literal `%` is escaped first.
fn moment_to_chrono_format(format: &str) -> String {
    let replacements = [
        ("%", "%%"),
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", MONTH_NAME_MARK),
        ("MMM", MONTH_ABBR_MARK),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_prismic_timestamp() {
        let date = parse_timestamp("2021-04-19T18:25:28+0000").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2021, 4, 19, 18, 25, 28).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let date = parse_timestamp("2021-03-25T19:25:28.000-03:00").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2021, 3, 25, 22, 25, 28).unwrap());
    }

    #[test]
    fn test_parse_invalid_timestamp() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2021-13-45T00:00:00+0000"), None);
    }

    #[test]
    fn test_format_display_date() {
        let date = Utc.with_ymd_and_hms(2021, 4, 19, 12, 0, 0).unwrap();
        assert_eq!(format_display_date(Some(&date), Locale::PtBr), "19 Abr 2021");
        assert_eq!(format_display_date(Some(&date), Locale::En), "19 Apr 2021");
    }

    #[test]
    fn test_format_missing_date() {
        assert_eq!(format_display_date(None, Locale::PtBr), "");
    }

    #[test]
    fn test_format_full_month_pattern() {
        let date = Utc.with_ymd_and_hms(2021, 3, 5, 8, 30, 0).unwrap();
        assert_eq!(
            format_date_with(&date, "DD MMMM YYYY HH:mm", Locale::PtBr),
            "05 Março 2021 08:30"
        );
    }

    #[test]
    fn test_literal_percent_in_pattern() {
        let date = Utc.with_ymd_and_hms(2021, 4, 19, 12, 0, 0).unwrap();
        assert_eq!(
            format_date_with(&date, "DD MMM YYYY 100%", Locale::PtBr),
            "19 Abr 2021 100%"
        );
        assert_eq!(format_date_with(&date, "%Q DD", Locale::En), "%Q 19");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(moment_to_chrono_format("DD 50%"), "%d 50%%");
    }
}
