//! Upstream API access: client setup, URL building, query windows,
//! per-unit fetching and pipeline orchestration

pub mod date_window;
pub mod fetch_utils;
pub mod http_client;
pub mod orchestrator;
pub mod urls;

pub use date_window::build_date_window;
pub use http_client::create_http_client_with_timeout;
pub use orchestrator::{PipelineOutcome, PipelineState, fetch_upcoming_matches};
