//! Configuration module for the dashboard.

pub mod api;
pub mod app_config;

pub mod debug;

// Re-export commonly used items
pub use api::API;
pub use app_config::AppConfig;
