#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

#[allow(unused_imports)]
use spardose_dash::{
    AppConfig,
    Cli, // The struct from lib.rs
    run_app, // The function from lib.rs
};

// --- WASM SPECIFIC CODE ---
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*; // <--- REQUIRED for .dyn_into()

// This keeps the WASM memory allocator from being stripped
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn _keep_alive() {}

// Even though we use 'start', the compiler still wants a main() function
// because this file is compiled as a binary.
#[cfg(target_arch = "wasm32")]
fn main() {}

/// `?api=<url>` on the page overrides the default backend
#[cfg(target_arch = "wasm32")]
fn api_override(window: &web_sys::Window) -> Option<String> {
    let search = window.location().search().ok()?;
    search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("api="))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(target_arch = "wasm32")]
fn init_web_logging(level: log::LevelFilter) {
    let result = fern::Dispatch::new()
        .level(level)
        .chain(fern::Output::call(|record| {
            let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
            web_sys::console::log_1(&line.into());
        }))
        .apply();
    if result.is_err() {
        web_sys::console::warn_1(&"Logger was already initialised".into());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
    // A. Init Logging
    console_error_panic_hook::set_once();

    // B. Config: defaults, optionally pointed elsewhere by the page URL
    let window = web_sys::window().ok_or("no global `window` exists")?;
    let mut config = AppConfig::default();
    if let Some(base_url) = api_override(&window) {
        config = config.with_base_url(&base_url);
    }
    init_web_logging(config.effective_log_level());
    log::info!("🚀 Spardose dashboard starting in WASM mode...");

    // C. Find the canvas element by ID
    let document = window.document().ok_or("should have a document on window")?;
    let canvas = document
        .get_element_by_id("the_canvas_id")
        .ok_or("Failed to find canvas with id 'the_canvas_id'")?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| "the_canvas_id was not a valid HtmlCanvasElement")?;

    // D. Start the App
    eframe::WebRunner::new()
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(move |cc| Ok(run_app(cc, config))),
        )
        .await
}

// --- NATIVE SPECIFIC CODE ---
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use clap::Parser;
    use eframe::NativeOptions;
    use tokio::runtime::Runtime;

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));

    // A. Parse Args (flags or SPARDOSE_* environment variables)
    let args = Cli::parse();
    let config = AppConfig::from_cli(&args);

    // B. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(config.effective_log_level())
        .init();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Runtime for background requests; promises and jobs spawn onto it
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let _guard = rt.enter();

    // D. Run Native App
    let options = NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Spardose"),
        ..Default::default()
    };

    eframe::run_native(
        "Spardose",
        options,
        Box::new(move |cc| Ok(run_app(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("eframe exited with an error: {}", e))
}
