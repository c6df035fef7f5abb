// User interface components
pub mod app;
mod app_async;
pub mod app_state;
pub mod config;
pub mod markdown_view;
pub mod result_view;
pub mod styles;
pub mod ui_panels;
mod ui_render;
pub mod ui_text;
pub mod utils;

// Re-export main app
pub use app::DashboardApp;
pub use config::UI_CONFIG;
