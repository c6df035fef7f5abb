//! Backend API configuration constants and types.

/// Paths of every endpoint the dashboard talks to (relative to the base URL)
pub struct Endpoints {
    pub health: &'static str,
    pub analyze: &'static str,
    pub analyze_position: &'static str,
    pub analyze_position_plans: &'static str,
    pub analyze_top_earning: &'static str,
    pub chat: &'static str,
    pub recommendations: &'static str,
    pub recommendations_analyze: &'static str,
}

/// Wire framing for streamed responses
pub struct StreamFraming {
    /// Literal prefix of every meaningful line
    pub data_prefix: &'static str,
    /// Query parameter that switches an endpoint between streamed and buffered output
    pub stream_param: &'static str,
}

/// Defaults for the position recommendations query form
pub struct RecommendationDefaults {
    /// The backend is always asked for the top N (the form does not expose it)
    pub limit: u32,
    pub token1: &'static str,
    pub token2: &'static str,
    pub weight_apr: f64,
    pub weight_roi: f64,
    pub weight_volume: f64,
    pub age_from_days: f64,
    pub age_to_days: f64,
    /// Max rows printed per list in the text report and shown in tables
    pub max_rows: usize,
}

/// The Master API Configuration
pub struct ApiConfig {
    /// Used when neither the environment nor the page URL provide a base URL
    pub default_base_url: &'static str,
    pub endpoints: Endpoints,
    pub framing: StreamFraming,
    pub recommendations: RecommendationDefaults,
}

pub const API: ApiConfig = ApiConfig {
    default_base_url: "http://localhost:8000",

    endpoints: Endpoints {
        health: "/health",
        analyze: "/analyze",
        analyze_position: "/analyze/position",
        analyze_position_plans: "/analyze/position-plans",
        analyze_top_earning: "/analyze/top-earning",
        chat: "/chat",
        recommendations: "/positions/recommendations",
        recommendations_analyze: "/positions/recommendations/analyze",
    },

    framing: StreamFraming {
        data_prefix: "data: ",
        stream_param: "stream",
    },

    recommendations: RecommendationDefaults {
        limit: 10,
        token1: "WETH",
        token2: "USDC",
        weight_apr: 0.4,
        weight_roi: 0.4,
        weight_volume: 0.2,
        age_from_days: 0.1,
        age_to_days: 1.0,
        max_rows: 10,
    },
};
