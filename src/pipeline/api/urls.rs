//! URL construction for the upstream fixtures API

use crate::constants::SPORT;

/// URL of the events-by-day endpoint for one calendar date
pub fn events_on_day_url(base_url: &str, date: &str) -> String {
    format!(
        "{}/eventsday.php?d={}&s={}",
        base_url.trim_end_matches('/'),
        date,
        SPORT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_on_day_url() {
        let url = events_on_day_url("https://api.example.com/v1/json/123", "2026-08-26");
        assert_eq!(
            url,
            "https://api.example.com/v1/json/123/eventsday.php?d=2026-08-26&s=Soccer"
        );
    }

    #[test]
    fn test_events_on_day_url_trims_trailing_slash() {
        let url = events_on_day_url("https://api.example.com/v1/json/123/", "2026-08-26");
        assert!(!url.contains("//eventsday"));
    }
}
