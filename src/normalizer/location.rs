// Raw location strings to a canonical country
pub const UNKNOWN_COUNTRY: &str = "Unknown";
pub const UNITED_STATES: &str = "United States";

const US_STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY",
];

const US_STATE_NAMES: &[&str] = &[
    "alabama", "alaska", "arizona", "arkansas", "california", "colorado", "connecticut",
    "delaware", "florida", "georgia", "hawaii", "idaho", "illinois", "indiana", "iowa", "kansas",
    "kentucky", "louisiana", "maine", "maryland", "massachusetts", "michigan", "minnesota",
    "mississippi", "missouri", "montana", "nebraska", "nevada", "new hampshire", "new jersey",
    "new mexico", "new york", "north carolina", "north dakota", "ohio", "oklahoma", "oregon",
    "pennsylvania", "rhode island", "south carolina", "south dakota", "tennessee", "texas", "utah",
    "vermont", "virginia", "washington", "west virginia", "wisconsin", "wyoming",
];

/// Maps a raw location such as `"Austin, TX"` or `"Lyon, France"` to a country name.
///
/// Never returns an empty string: anything unresolvable becomes `"Unknown"`.
pub fn resolve_country(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_COUNTRY.to_string();
    };

    let parts: Vec<&str> = raw.split(',').collect();
    let last = parts.last().map(|s| s.trim()).unwrap_or_default();

    if is_us_state(last) {
        UNITED_STATES.to_string()
    } else if parts.len() == 1 || last.is_empty() {
        UNKNOWN_COUNTRY.to_string()
    } else {
        last.to_string()
    }
}

fn is_us_state(segment: &str) -> bool {
    let upper = segment.to_uppercase();
    let lower = segment.to_lowercase();
    US_STATE_CODES.contains(&upper.as_str()) || US_STATE_NAMES.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(raw: &str) -> String {
        resolve_country(Some(raw))
    }

    #[test]
    fn us_state_suffix_means_united_states() {
        assert_eq!(resolve("San Francisco, CA"), "United States");
        assert_eq!(resolve("Austin, tx"), "United States");
        assert_eq!(resolve("Seattle, Washington"), "United States");
        assert_eq!(resolve("Texas"), "United States");
    }

    #[test]
    fn trailing_segment_is_the_country() {
        assert_eq!(resolve("Paris, France"), "France");
        assert_eq!(resolve("Berlin, Berlin,  Germany "), "Germany");
        assert_eq!(resolve("New York, NY, United States"), "United States");
    }

    #[test]
    fn single_segment_or_empty_is_unknown() {
        assert_eq!(resolve("Remote"), "Unknown");
        assert_eq!(resolve("Lyon,"), "Unknown");
        assert_eq!(resolve("   "), "Unknown");
        assert_eq!(resolve_country(None), "Unknown");
    }
}
