//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

#![allow(dead_code)]

/// Default timeout for upstream HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default base URL of the upstream fixtures API
pub const DEFAULT_API_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/123";

/// Free-tier API key for the upstream fixtures API
pub const DEFAULT_API_KEY: &str = "123";

/// Sport filter passed to the upstream events-by-day endpoint
pub const SPORT: &str = "Soccer";

/// Identifier reported in the `source` field of responses
pub const UPSTREAM_SOURCE: &str = "thesportsdb";

/// Default TCP port for the HTTP server
pub const DEFAULT_PORT: u16 = 4000;

/// Outbound request budget configuration
pub mod rate_budget {
    /// Local ceiling on upstream calls per window. Deliberately below the
    /// upstream free-tier limit (30/min) so concurrent or retried requests
    /// cannot push us over it.
    pub const REQUESTS_PER_WINDOW: u32 = 25;

    /// Length of the rolling budget window in seconds
    pub const WINDOW_SECONDS: u64 = 60;
}

/// Response cache configuration
pub mod cache {
    /// TTL for the aggregated upcoming-matches response (5 minutes)
    pub const RESPONSE_TTL_SECONDS: u64 = 300;
}

/// Fetch pipeline tuning
pub mod pipeline {
    /// How many calendar days ahead to query, starting today
    pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 7;

    /// Pause between successive upstream calls within one pipeline run
    /// (milliseconds). Keeps the request pattern smooth even inside the
    /// local budget.
    pub const UNIT_PAUSE_MS: u64 = 200;

    /// Soft ceiling on accumulated fixtures. Iteration stops early once
    /// reached to bound response size and latency.
    pub const SOFT_MAX_FIXTURES: usize = 10;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API base URL override
    pub const API_BASE_URL: &str = "MATCHDAY_API_BASE_URL";

    /// Environment variable for the upstream API key
    pub const API_KEY: &str = "MATCHDAY_API_KEY";

    /// Environment variable for listen port override
    pub const PORT: &str = "MATCHDAY_PORT";

    /// Environment variable for HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "MATCHDAY_HTTP_TIMEOUT";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "MATCHDAY_LOG_FILE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_budget_constants_are_reasonable() {
        // The local ceiling must leave margin below the upstream free-tier
        // limit of 30 requests per minute
        assert!(rate_budget::REQUESTS_PER_WINDOW > 0);
        assert!(rate_budget::REQUESTS_PER_WINDOW < 30);
        assert_eq!(rate_budget::WINDOW_SECONDS, 60);
    }

    #[test]
    fn test_pipeline_constants_are_reasonable() {
        let lookahead = pipeline::DEFAULT_LOOKAHEAD_DAYS;
        let pause = pipeline::UNIT_PAUSE_MS;
        let soft_max = pipeline::SOFT_MAX_FIXTURES;

        assert!(lookahead >= 1);
        // One full window of daily queries must fit inside the budget
        assert!(lookahead < rate_budget::REQUESTS_PER_WINDOW);
        assert!(pause > 0);
        assert!(soft_max > 0);
    }

    #[test]
    fn test_cache_ttl_is_reasonable() {
        // Cache must outlive a single pipeline run but stay short enough
        // that fixture changes show up within minutes
        assert!(cache::RESPONSE_TTL_SECONDS >= 60);
        assert!(cache::RESPONSE_TTL_SECONDS <= 600);
    }

    #[test]
    fn test_env_var_names_are_not_empty() {
        assert!(!env_vars::API_BASE_URL.is_empty());
        assert!(!env_vars::API_KEY.is_empty());
        assert!(!env_vars::PORT.is_empty());
        assert!(!env_vars::HTTP_TIMEOUT.is_empty());
        assert!(!env_vars::LOG_FILE.is_empty());
    }

    #[test]
    fn test_default_base_url_has_scheme() {
        assert!(DEFAULT_API_BASE_URL.starts_with("https://"));
        assert!(!DEFAULT_API_BASE_URL.ends_with('/'));
    }
}
