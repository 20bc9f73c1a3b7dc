//! Merging of per-day fixture batches: dedup by identity, chronological sort

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::pipeline::models::Fixture;

/// Merges fixture batches from successive query units into one ordered list.
///
/// Duplicates arise when the upstream returns the same fixture for
/// adjacent days; the first occurrence in fetch order wins. The final
/// order is ascending by (date, time), with a missing kickoff time
/// treated as midnight for ordering only, and is stable for equal keys.
pub fn aggregate(batches: Vec<Vec<Fixture>>) -> Vec<Fixture> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<Fixture> = Vec::new();

    for batch in batches {
        for fixture in batch {
            if seen.insert(fixture.id.clone()) {
                merged.push(fixture);
            } else {
                debug!("Dropping duplicate fixture {}", fixture.id);
            }
        }
    }

    // sort_by is stable, so equal keys keep their fetch order
    merged.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    merged
}

/// Collects the distinct league names of an aggregate, in first-seen order
pub fn distinct_leagues(fixtures: &[Fixture]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    fixtures
        .iter()
        .filter(|f| seen.insert(f.league.as_str()))
        .map(|f| f.league.clone())
        .collect()
}

/// Chronological sort key. Unparseable dates sort last so that malformed
/// leftovers never hide well-formed fixtures.
fn sort_key(fixture: &Fixture) -> (NaiveDate, NaiveTime) {
    let date = NaiveDate::parse_from_str(&fixture.date, "%Y-%m-%d").unwrap_or(NaiveDate::MAX);
    let time = fixture
        .time
        .as_deref()
        .and_then(parse_time)
        .unwrap_or(NaiveTime::MIN);
    (date, time)
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}
