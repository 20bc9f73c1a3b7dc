use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Upcoming football fixtures API server
///
/// Fetches upcoming matches from TheSportsDB across a multi-day window,
/// deduplicates and sorts them, and serves the aggregate over HTTP with a
/// short-lived cache and a local outbound request budget.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Override the listen port from config (default: 4000)
    #[arg(short, long, help_heading = "Server")]
    pub port: Option<u16>,

    /// Override how many calendar days ahead each pipeline run queries
    #[arg(long = "lookahead-days", help_heading = "Pipeline")]
    pub lookahead_days: Option<u32>,

    /// Enable debug logging (sets the log filter to debug level)
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be
    /// written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["matchday"]);
        assert_eq!(args.port, None);
        assert_eq!(args.lookahead_days, None);
        assert!(!args.debug);
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "matchday",
            "--port",
            "8080",
            "--lookahead-days",
            "3",
            "--debug",
        ]);
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.lookahead_days, Some(3));
        assert!(args.debug);
    }
}
