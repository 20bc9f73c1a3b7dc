//! Query unit generation: the ordered list of calendar dates to fetch

use chrono::{Days, NaiveDate, Utc};
use tracing::debug;

/// Produces the ordered list of dates to query, starting today (UTC) and
/// spanning `lookahead_days` calendar days. Always yields at least one
/// date so a zero lookahead still covers today.
pub fn build_date_window(lookahead_days: u32) -> Vec<String> {
    build_date_window_from(Utc::now().date_naive(), lookahead_days)
}

/// Internal helper with an injected start date for deterministic testing
pub fn build_date_window_from(start: NaiveDate, lookahead_days: u32) -> Vec<String> {
    let days = lookahead_days.max(1);
    let window: Vec<String> = (0..days)
        .filter_map(|offset| start.checked_add_days(Days::new(u64::from(offset))))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect();

    debug!("Built query window of {} days starting {}", window.len(), start);
    window
}
