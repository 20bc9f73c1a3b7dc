//! Normalization of raw upstream records into canonical fixtures

use tracing::debug;

use crate::pipeline::models::{ApiEvent, Fixture};

/// Returns the trimmed string when it carries actual content
fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Splits a combined timestamp ("2026-08-29T16:30:00" or
/// "2026-08-29 16:30:00") into its date and time parts.
fn split_timestamp(timestamp: &str) -> (Option<&str>, Option<&str>) {
    let trimmed = timestamp.trim();
    if trimmed.is_empty() {
        return (None, None);
    }

    match trimmed.split_once(['T', ' ']) {
        Some((date, time)) => {
            // Drop a trailing zone designator if the feed appended one
            let time = time.trim_end_matches('Z');
            let time = time.split_once('+').map_or(time, |(t, _)| t);
            (Some(date), Some(time).filter(|t| !t.is_empty()))
        }
        None => (Some(trimmed), None),
    }
}

/// Maps one raw upstream record into the canonical [`Fixture`] shape.
///
/// Returns `None` for records that cannot be represented: missing event
/// id, missing calendar date, or missing team names. The caller skips
/// such records and continues with the rest of the batch.
///
/// The combined `strTimestamp` field backfills date and time when the
/// dedicated fields are absent. A missing or "TBD" kickoff time stays
/// `None` in the output; it is only treated as midnight when sorting.
pub fn normalize_event(event: &ApiEvent, fallback_league: &str) -> Option<Fixture> {
    let id = non_empty(&event.id_event)?;

    let (ts_date, ts_time) = event
        .str_timestamp
        .as_deref()
        .map(split_timestamp)
        .unwrap_or((None, None));

    let date = non_empty(&event.date_event).or(ts_date)?;

    let time = non_empty(&event.str_time)
        .filter(|t| !t.eq_ignore_ascii_case("TBD"))
        .or(ts_time)
        .map(str::to_string);

    let home_team = non_empty(&event.str_home_team)?;
    let away_team = non_empty(&event.str_away_team)?;

    let name = non_empty(&event.str_event)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{home_team} vs {away_team}"));

    let league = non_empty(&event.str_league)
        .unwrap_or(fallback_league)
        .to_string();

    let fixture = Fixture {
        id: id.to_string(),
        name,
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        home_team_id: non_empty(&event.id_home_team).map(str::to_string),
        away_team_id: non_empty(&event.id_away_team).map(str::to_string),
        date: date.to_string(),
        time,
        league,
        home_badge: non_empty(&event.str_home_team_badge).map(str::to_string),
        away_badge: non_empty(&event.str_away_team_badge).map(str::to_string),
        status: non_empty(&event.str_status).map(str::to_string),
        round: non_empty(&event.int_round).map(str::to_string),
    };

    debug!(
        "Normalized event {}: {} on {}",
        fixture.id, fixture.name, fixture.date
    );
    Some(fixture)
}
