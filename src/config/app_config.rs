//! Runtime configuration, built once at process entry and passed down explicitly.

use log::LevelFilter;

use crate::Cli;
use crate::config::API;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the analysis backend, without a trailing slash
    pub api_base_url: String,
    /// Verbose request/stream logging
    pub debug: bool,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: API.default_base_url.to_string(),
            debug: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(&cli.api_base_url, cli.debug, &cli.log_level)
    }

    pub fn new(api_base_url: &str, debug: bool, log_level: &str) -> Self {
        let log_level = match log_level.trim().parse::<LevelFilter>() {
            Ok(level) => level,
            Err(_) => {
                // Logger is not up yet when this runs, so stderr it is.
                eprintln!("Unknown log level {:?}, falling back to info", log_level);
                LevelFilter::Info
            }
        };

        Self {
            api_base_url: normalize_base_url(api_base_url),
            debug,
            log_level,
        }
    }

    /// Override the base URL (e.g. from the page query string in the browser build)
    pub fn with_base_url(mut self, api_base_url: &str) -> Self {
        self.api_base_url = normalize_base_url(api_base_url);
        self
    }

    /// Debug mode never logs less than `Debug`.
    pub fn effective_log_level(&self) -> LevelFilter {
        if self.debug {
            self.log_level.max(LevelFilter::Debug)
        } else {
            self.log_level
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        API.default_base_url.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_dropped() {
        let config = AppConfig::new("https://api.example.com//", false, "info");
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = AppConfig::new("   ", false, "warn");
        assert_eq!(config.api_base_url, API.default_base_url);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn unknown_level_is_info_and_debug_raises_it() {
        let config = AppConfig::new("http://localhost:8000", true, "chatty");
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.effective_log_level(), LevelFilter::Debug);

        let quiet = AppConfig::new("http://localhost:8000", true, "trace");
        assert_eq!(quiet.effective_log_level(), LevelFilter::Trace);
    }
}
