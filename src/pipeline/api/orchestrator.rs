//! Pipeline orchestration: cache check, budget check, sequential fetching,
//! aggregation and cache write for one request-response cycle

use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::constants::pipeline::{SOFT_MAX_FIXTURES, UNIT_PAUSE_MS};
use crate::constants::{SPORT, UPSTREAM_SOURCE};
use crate::pipeline::aggregate::{aggregate, distinct_leagues};
use crate::pipeline::api::date_window::build_date_window;
use crate::pipeline::api::fetch_utils::fetch_events_for_day;
use crate::pipeline::cache::ResponseCache;
use crate::pipeline::models::{Fixture, UpcomingMatchesData};
use crate::pipeline::processors::normalize_event;
use crate::pipeline::rate_budget::RateBudget;

/// The shared mutable state of the pipeline: the single-slot response
/// cache and the outbound request budget. Held behind one mutex by the
/// server so overlapping requests run strictly one at a time.
#[derive(Debug, Default)]
pub struct PipelineState {
    pub cache: ResponseCache,
    pub rate_budget: RateBudget,
}

/// Outcome of one pipeline run. Every path through the orchestrator ends
/// in one of these; no error escapes unstructured.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// Freshly fetched and aggregated result, already cached
    Fresh(UpcomingMatchesData),
    /// Served from the response cache without any upstream call
    Cached {
        data: UpcomingMatchesData,
        age_seconds: u64,
    },
    /// No usable result because of rate limiting, local or upstream
    RateLimited {
        retry_after_seconds: u64,
        api_message: Option<String>,
    },
}

/// Drives one request-response cycle of the fetch-aggregate-cache
/// pipeline.
///
/// Order of decisions:
/// 1. A fresh cache entry short-circuits everything.
/// 2. An exhausted local budget terminates with a wait estimate before
///    any upstream call is made.
/// 3. Otherwise the query window is walked strictly sequentially. The
///    budget is re-checked and a request recorded before every call; an
///    upstream 429 halts the walk, other per-unit errors are skipped.
///    A short pause separates successive calls and iteration stops
///    early once the soft fixture ceiling is reached.
/// 4. The merged result is cached and returned unless it is empty *and*
///    the upstream rate-limited us, which becomes a rate-limit outcome
///    and is never cached. An empty result without a rate-limit event is
///    a cached success: "no fixtures scheduled" is not an error.
#[instrument(skip(client, config, state))]
pub async fn fetch_upcoming_matches(
    client: &Client,
    config: &Config,
    state: &mut PipelineState,
) -> PipelineOutcome {
    if let Some((data, age_seconds)) = state.cache.get() {
        info!("Serving cached result, age {age_seconds}s");
        return PipelineOutcome::Cached {
            data: data.clone(),
            age_seconds,
        };
    }

    if state.rate_budget.is_exhausted() {
        let retry_after_seconds = state.rate_budget.seconds_until_reset();
        warn!("Local request budget exhausted, retry in {retry_after_seconds}s");
        return PipelineOutcome::RateLimited {
            retry_after_seconds,
            api_message: None,
        };
    }

    let dates = build_date_window(config.lookahead_days);
    let mut batches: Vec<Vec<Fixture>> = Vec::new();
    let mut queried: Vec<String> = Vec::new();
    let mut total = 0usize;
    let mut upstream_limited = false;
    let mut budget_curtailed = false;
    let mut api_message: Option<String> = None;

    for date in &dates {
        if total >= SOFT_MAX_FIXTURES {
            info!("Soft fixture ceiling of {} reached, stopping early", SOFT_MAX_FIXTURES);
            break;
        }
        if state.rate_budget.is_exhausted() {
            warn!("Request budget ran out mid-run after {} of {} days", queried.len(), dates.len());
            budget_curtailed = true;
            break;
        }
        if !queried.is_empty() {
            tokio::time::sleep(Duration::from_millis(UNIT_PAUSE_MS)).await;
        }

        state.rate_budget.record_request();
        queried.push(date.clone());

        match fetch_events_for_day(client, config, date).await {
            Ok(raw_events) => {
                let skipped_before = raw_events.len();
                let batch: Vec<Fixture> = raw_events
                    .iter()
                    .filter_map(|event| normalize_event(event, SPORT))
                    .collect();
                if batch.len() < skipped_before {
                    warn!(
                        "Skipped {} malformed records for {date}",
                        skipped_before - batch.len()
                    );
                }
                total += batch.len();
                batches.push(batch);
            }
            Err(e) if e.is_upstream_rate_limit() => {
                warn!("Upstream rate limit hit on {date}, halting iteration: {e}");
                api_message = e.rate_limit_message().map(str::to_string);
                upstream_limited = true;
                break;
            }
            Err(e) => {
                warn!("Skipping {date} after upstream error: {e}");
                continue;
            }
        }
    }

    let events = aggregate(batches);

    if events.is_empty() && upstream_limited {
        let retry_after_seconds = state.rate_budget.seconds_until_reset();
        warn!("Rate limiting left zero usable fixtures, returning error outcome");
        return PipelineOutcome::RateLimited {
            retry_after_seconds,
            api_message,
        };
    }

    let rate_limit_warning = if upstream_limited || budget_curtailed {
        Some(format!(
            "Rate limit reached after {} of {} days; results may be incomplete",
            queried.len(),
            dates.len()
        ))
    } else {
        None
    };

    let note = match (queried.first(), queried.last()) {
        (Some(first), Some(last)) if first != last => {
            Some(format!("Queried {} days from {first} to {last}", queried.len()))
        }
        (Some(first), _) => Some(format!("Queried {first}")),
        _ => None,
    };

    let data = UpcomingMatchesData {
        count: events.len(),
        leagues: distinct_leagues(&events),
        events,
        source: UPSTREAM_SOURCE.to_string(),
        note,
        rate_limit_warning,
    };

    info!(
        "Pipeline run complete: {} fixtures across {} leagues from {} days",
        data.count,
        data.leagues.len(),
        queried.len()
    );

    state.cache.put(data.clone());
    PipelineOutcome::Fresh(data)
}
