// Utility functions
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use scraper::Html;

/// Collapses every whitespace run into a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reduces an HTML fragment to its visible text.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    collapse_whitespace(&text)
}

/// Parses a posting date given as RFC 3339, a naive ISO datetime or a bare `YYYY-MM-DD`.
pub fn parse_posted_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_newlines_and_tabs() {
        assert_eq!(collapse_whitespace("  We need\n\n a\tRust   dev "), "We need a Rust dev");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn strips_markup() {
        let text = html_to_text("<p>Strong <b>SQL</b></p><ul><li>Python</li></ul>");
        assert_eq!(text, "Strong SQL Python");
    }

    #[test]
    fn parses_supported_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 14);
        assert_eq!(parse_posted_date("2025-05-14T08:30:00.000Z"), expected);
        assert_eq!(parse_posted_date("2025-05-14T08:30:00+02:00"), expected);
        assert_eq!(parse_posted_date("2025-05-14T08:30:00"), expected);
        assert_eq!(parse_posted_date("2025-05-14"), expected);
        assert_eq!(parse_posted_date("3 days ago"), None);
        assert_eq!(parse_posted_date(""), None);
    }
}
