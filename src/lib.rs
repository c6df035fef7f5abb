#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod report;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use api::{ApiClient, ApiError};
pub use config::AppConfig;
pub use domain::{PositionRecord, Recommendations};
pub use report::format_recommendations;
pub use ui::DashboardApp;
pub use utils::app_time;

// CLI argument parsing
use clap::{ArgAction, Parser, builder::BoolishValueParser};

use crate::config::API;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the analysis backend
    #[arg(long, env = "SPARDOSE_API_BASE_URL", default_value = API.default_base_url)]
    pub api_base_url: String,

    /// Log every request and stream summary
    #[arg(
        long,
        env = "SPARDOSE_DEBUG",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub debug: bool,

    /// error, warn, info, debug or trace
    #[arg(long, env = "SPARDOSE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, config: AppConfig) -> Box<dyn eframe::App> {
    Box::new(DashboardApp::new(cc, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["spardose-dash"]);
        assert!(!cli.debug);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn cli_flags() {
        let cli = Cli::parse_from([
            "spardose-dash",
            "--api-base-url",
            "http://backend:9000/",
            "--debug",
            "--log-level",
            "warn",
        ]);
        let config = AppConfig::from_cli(&cli);
        assert_eq!(config.api_base_url, "http://backend:9000");
        assert!(config.debug);
        assert_eq!(config.effective_log_level(), log::LevelFilter::Debug);
    }
}
