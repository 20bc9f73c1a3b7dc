//! Upcoming Football Fixtures API Library
//!
//! This library provides a rate-limit-aware pipeline for fetching upcoming
//! football fixtures from TheSportsDB across a multi-day window, plus the
//! HTTP server that exposes the aggregate.
//!
//! The pipeline sequences one request-response cycle as: response cache
//! check, local request budget check, strictly sequential per-day fetches
//! with normalization, deduplication and chronological sorting, and a
//! cache write.
//!
//! # Examples
//!
//! ```rust,no_run
//! use matchday::config::Config;
//! use matchday::error::AppError;
//! use matchday::pipeline::api::create_http_client_with_timeout;
//! use matchday::pipeline::{PipelineState, fetch_upcoming_matches};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
//!     let mut state = PipelineState::default();
//!
//!     let outcome = fetch_upcoming_matches(&client, &config, &mut state).await;
//!     println!("{outcome:?}");
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod server;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use pipeline::{Fixture, PipelineOutcome, PipelineState, UpcomingMatchesData};
pub use server::{AppState, build_router, run_server};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
