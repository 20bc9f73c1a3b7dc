//! Rolling-window budget for outbound upstream calls

use std::time::{Duration, Instant};

use tracing::debug;

use crate::constants::rate_budget;

/// Read-only view of the budget state for the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSnapshot {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
    pub resets_in_seconds: u64,
}

/// Tracks outbound calls against a local per-minute ceiling.
///
/// The ceiling sits below the upstream provider's true limit so that
/// concurrent or retried requests cannot trip the provider's own 429,
/// which is a distinct error class. The counter resets and the window
/// boundary advances by whole window lengths once the window elapses.
///
/// Owned and mutated by a single execution context; callers serialize
/// access (see the server's pipeline mutex).
#[derive(Debug)]
pub struct RateBudget {
    count: u32,
    window_started_at: Instant,
    limit: u32,
    window: Duration,
}

impl RateBudget {
    pub fn new() -> Self {
        Self::with_limits(
            rate_budget::REQUESTS_PER_WINDOW,
            Duration::from_secs(rate_budget::WINDOW_SECONDS),
        )
    }

    /// Budget with explicit limits, used by tests and tooling
    pub fn with_limits(limit: u32, window: Duration) -> Self {
        Self {
            count: 0,
            window_started_at: Instant::now(),
            limit,
            window,
        }
    }

    /// Returns true iff the counter has reached the ceiling within the
    /// current window. Rolls the window forward first when it has elapsed.
    pub fn is_exhausted(&mut self) -> bool {
        self.is_exhausted_at(Instant::now())
    }

    /// Internal variant with injected time for deterministic testing
    pub fn is_exhausted_at(&mut self, now: Instant) -> bool {
        self.roll_window(now);
        let exhausted = self.count >= self.limit;
        if exhausted {
            debug!(
                "Request budget exhausted: {}/{} used in current window",
                self.count, self.limit
            );
        }
        exhausted
    }

    /// Records one outbound call. Callers must check `is_exhausted()`
    /// first; the orchestrator enforces this ordering.
    pub fn record_request(&mut self) {
        self.count += 1;
    }

    /// Conservative estimate of how long a client should wait before the
    /// budget frees up again. Always at least one second.
    pub fn seconds_until_reset(&self) -> u64 {
        self.seconds_until_reset_at(Instant::now())
    }

    fn seconds_until_reset_at(&self, now: Instant) -> u64 {
        let elapsed = now.duration_since(self.window_started_at);
        self.window.saturating_sub(elapsed).as_secs().max(1)
    }

    /// Snapshot of the current state without mutating it. The health
    /// endpoint must stay side-effect free, so the window roll is
    /// simulated rather than applied.
    pub fn snapshot(&self) -> BudgetSnapshot {
        self.snapshot_at(Instant::now())
    }

    fn snapshot_at(&self, now: Instant) -> BudgetSnapshot {
        let elapsed = now.duration_since(self.window_started_at);
        let (used, resets_in) = if elapsed >= self.window {
            (0, self.window.as_secs())
        } else {
            (self.count, (self.window - elapsed).as_secs().max(1))
        };

        BudgetSnapshot {
            used,
            limit: self.limit,
            remaining: self.limit.saturating_sub(used),
            resets_in_seconds: resets_in,
        }
    }

    fn roll_window(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.window_started_at);
        if elapsed >= self.window {
            // Advance by whole windows so the boundary stays aligned
            let periods = (elapsed.as_millis() / self.window.as_millis()).max(1) as u32;
            self.window_started_at += self.window * periods;
            self.count = 0;
            debug!("Request budget window rolled forward, counter reset");
        }
    }
}

impl Default for RateBudget {
    fn default() -> Self {
        Self::new()
    }
}
