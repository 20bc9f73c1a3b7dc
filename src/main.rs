use clap::Parser;
use tracing::info;

use matchday::cli::Args;
use matchday::config::Config;
use matchday::error::AppError;
use matchday::{logging, server};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let mut config = Config::load().await?;
    if let Some(port) = args.port {
        config.listen_port = port;
    }
    if let Some(lookahead_days) = args.lookahead_days {
        config.lookahead_days = lookahead_days;
    }

    let (log_file_path, _guard) = logging::setup_logging(&args, &config)?;
    info!(
        "Starting {} v{}, logging to {}",
        matchday::NAME,
        matchday::VERSION,
        log_file_path
    );
    info!(
        "Upstream: {}, lookahead {} days",
        config.api_base_url, config.lookahead_days
    );

    server::run_server(config).await
}
