//! The rate-limited fetch-aggregate-cache pipeline for upcoming fixtures

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod models;
pub mod processors;
pub mod rate_budget;

pub use api::{PipelineOutcome, PipelineState, fetch_upcoming_matches};
pub use models::{ApiEvent, Fixture, UpcomingMatchesData};
