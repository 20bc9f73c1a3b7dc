//! Data models for upstream payloads and the canonical fixture shape

use serde::{Deserialize, Serialize};

/// Raw event record as returned by the upstream events-by-day endpoint.
///
/// Every field except the event id is optional: the upstream feed is
/// inconsistent across leagues and older seasons, and normalization is
/// responsible for deciding what is usable.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiEvent {
    #[serde(rename = "idEvent", default)]
    pub id_event: Option<String>,
    #[serde(rename = "strEvent", default)]
    pub str_event: Option<String>,
    #[serde(rename = "strHomeTeam", default)]
    pub str_home_team: Option<String>,
    #[serde(rename = "strAwayTeam", default)]
    pub str_away_team: Option<String>,
    #[serde(rename = "idHomeTeam", default)]
    pub id_home_team: Option<String>,
    #[serde(rename = "idAwayTeam", default)]
    pub id_away_team: Option<String>,
    #[serde(rename = "dateEvent", default)]
    pub date_event: Option<String>,
    #[serde(rename = "strTime", default)]
    pub str_time: Option<String>,
    #[serde(rename = "strTimestamp", default)]
    pub str_timestamp: Option<String>,
    #[serde(rename = "strLeague", default)]
    pub str_league: Option<String>,
    #[serde(rename = "strHomeTeamBadge", default)]
    pub str_home_team_badge: Option<String>,
    #[serde(rename = "strAwayTeamBadge", default)]
    pub str_away_team_badge: Option<String>,
    #[serde(rename = "strStatus", default)]
    pub str_status: Option<String>,
    #[serde(rename = "intRound", default)]
    pub int_round: Option<String>,
}

/// Response envelope of the events-by-day endpoint. The upstream returns
/// `{"events": null}` for days without any scheduled fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsDayResponse {
    #[serde(default)]
    pub events: Option<Vec<ApiEvent>>,
}

/// Canonical fixture shape served to clients.
///
/// Instances are created fresh per pipeline run by normalization and never
/// mutated afterwards. `id` is unique within one aggregate result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: String,
    pub name: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_team_id: Option<String>,
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    /// Time of day in HH:MM:SS format; `None` means the kickoff time is
    /// still to be determined
    pub time: Option<String>,
    pub league: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
}

/// Aggregated pipeline result, also the `data` payload of the
/// `/api/upcoming-matches` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingMatchesData {
    pub events: Vec<Fixture>,
    pub count: usize,
    /// Distinct league names present in `events`, in first-seen order
    pub leagues: Vec<String>,
    pub source: String,
    /// Human-readable description of which query units were covered
    pub note: Option<String>,
    /// Set when rate limiting curtailed coverage and the result may be
    /// incomplete
    pub rate_limit_warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fixture() -> Fixture {
        Fixture {
            id: "2070001".to_string(),
            name: "Arsenal vs Chelsea".to_string(),
            home_team: "Arsenal".to_string(),
            away_team: "Chelsea".to_string(),
            home_team_id: Some("133604".to_string()),
            away_team_id: Some("133610".to_string()),
            date: "2026-08-29".to_string(),
            time: Some("16:30:00".to_string()),
            league: "English Premier League".to_string(),
            home_badge: Some("https://example.com/arsenal.png".to_string()),
            away_badge: None,
            status: Some("Not Started".to_string()),
            round: Some("3".to_string()),
        }
    }

    #[test]
    fn test_api_event_deserializes_upstream_shape() {
        let json = r#"{
            "idEvent": "2070001",
            "strEvent": "Arsenal vs Chelsea",
            "strHomeTeam": "Arsenal",
            "strAwayTeam": "Chelsea",
            "idHomeTeam": "133604",
            "idAwayTeam": "133610",
            "dateEvent": "2026-08-29",
            "strTime": "16:30:00",
            "strLeague": "English Premier League",
            "strHomeTeamBadge": "https://example.com/arsenal.png",
            "strStatus": "Not Started"
        }"#;

        let event: ApiEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id_event.as_deref(), Some("2070001"));
        assert_eq!(event.str_home_team.as_deref(), Some("Arsenal"));
        assert_eq!(event.date_event.as_deref(), Some("2026-08-29"));
        assert_eq!(event.str_away_team_badge, None);
        assert_eq!(event.int_round, None);
    }

    #[test]
    fn test_api_event_tolerates_null_fields() {
        let json = r#"{
            "idEvent": "42",
            "strEvent": null,
            "strTime": null,
            "dateEvent": "2026-09-01"
        }"#;

        let event: ApiEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id_event.as_deref(), Some("42"));
        assert_eq!(event.str_event, None);
        assert_eq!(event.str_time, None);
    }

    #[test]
    fn test_events_day_response_null_events() {
        // Days without fixtures come back as {"events": null}
        let response: EventsDayResponse = serde_json::from_str(r#"{"events": null}"#).unwrap();
        assert!(response.events.is_none());

        let empty: EventsDayResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(empty.events.is_none());
    }

    #[test]
    fn test_fixture_serializes_camel_case() {
        let fixture = sample_fixture();
        let json = serde_json::to_string(&fixture).unwrap();

        assert!(json.contains("\"homeTeam\":\"Arsenal\""));
        assert!(json.contains("\"awayTeam\":\"Chelsea\""));
        assert!(json.contains("\"homeBadge\""));
        // None optionals are omitted entirely
        assert!(!json.contains("awayBadge"));
    }

    #[test]
    fn test_fixture_tbd_time_serializes_as_null() {
        let mut fixture = sample_fixture();
        fixture.time = None;

        let json = serde_json::to_string(&fixture).unwrap();
        assert!(json.contains("\"time\":null"));
    }

    #[test]
    fn test_upcoming_matches_data_round_trip() {
        let data = UpcomingMatchesData {
            events: vec![sample_fixture()],
            count: 1,
            leagues: vec!["English Premier League".to_string()],
            source: "thesportsdb".to_string(),
            note: Some("Queried 7 of 7 days starting 2026-08-26".to_string()),
            rate_limit_warning: None,
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"rateLimitWarning\":null"));

        let parsed: UpcomingMatchesData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, data);
    }
}
