// src/utils/app_time.rs

#[cfg(not(target_arch = "wasm32"))]
pub type AppInstant = std::time::Instant;

#[cfg(target_arch = "wasm32")]
pub type AppInstant = web_time::Instant;

#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> AppInstant {
    std::time::Instant::now()
}

#[cfg(target_arch = "wasm32")]
pub fn now() -> AppInstant {
    web_time::Instant::now()
}

/// Wall-clock seconds since `start`, for log lines
pub fn elapsed_secs(start: AppInstant) -> f64 {
    start.elapsed().as_secs_f64()
}

/// Local `HH:MM:SS` stamp for chat messages
pub fn clock_label() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_non_negative() {
        let start = now();
        assert!(elapsed_secs(start) >= 0.0);
    }

    #[test]
    fn clock_label_shape() {
        let label = clock_label();
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
    }
}
