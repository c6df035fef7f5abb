/// Every user-facing string of the dashboard, in one place
pub struct UiText {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,

    // Navigation / top bar
    pub nav_heading: &'static str,
    pub health_label: &'static str,
    pub health_checking: &'static str,
    pub health_unknown: &'static str,
    pub health_recheck: &'static str,
    pub backend_label: &'static str,

    // Analysis panel
    pub analysis_heading: &'static str,
    pub analysis_type_heading: &'static str,
    pub analysis_input_heading: &'static str,
    pub analysis_streaming_toggle: &'static str,
    pub analysis_use_test_data: &'static str,
    pub analysis_submit: &'static str,
    pub analysis_running: &'static str,

    // Position / top earning panels
    pub position_heading: &'static str,
    pub position_input_heading: &'static str,
    pub position_output_title: &'static str,
    pub top_earning_heading: &'static str,
    pub top_earning_input_heading: &'static str,
    pub top_earning_output_title: &'static str,
    pub load_sample: &'static str,
    pub execute_analysis: &'static str,
    pub executing: &'static str,

    // Recommendations panel
    pub rec_heading: &'static str,
    pub rec_popular_pairs: &'static str,
    pub rec_network: &'static str,
    pub rec_exchange: &'static str,
    pub rec_token_a: &'static str,
    pub rec_token_b: &'static str,
    pub rec_select_token: &'static str,
    pub rec_swap: &'static str,
    pub rec_weights_heading: &'static str,
    pub rec_weight_apr: &'static str,
    pub rec_weight_roi: &'static str,
    pub rec_weight_volume: &'static str,
    pub rec_age_heading: &'static str,
    pub rec_age_from: &'static str,
    pub rec_age_to: &'static str,
    pub rec_load_sample: &'static str,
    pub rec_submit: &'static str,
    pub rec_loading: &'static str,
    pub rec_report_title: &'static str,
    pub rec_ranking: &'static str,
    pub rec_table_heading: &'static str,
    pub rec_analyze_all: &'static str,
    pub rec_analyze_all_title: &'static str,
    pub rec_analyze_row: &'static str,
    pub rec_row_analysis_title: &'static str,
    pub rec_details_heading: &'static str,
    pub rec_performance_heading: &'static str,
    pub rec_no_positions_to_analyze: &'static str,

    // Chat panel
    pub chat_heading: &'static str,
    pub chat_placeholder: &'static str,
    pub chat_send: &'static str,
    pub chat_clear: &'static str,
    pub chat_you: &'static str,
    pub chat_assistant: &'static str,
    pub chat_empty: &'static str,

    // Result display
    pub copy: &'static str,
    pub waiting_for_output: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "SPARDOSE",
    app_subtitle: "DeFi position analysis terminal",

    nav_heading: "Modules",
    health_label: "Backend",
    health_checking: "checking...",
    health_unknown: "unknown",
    health_recheck: "⟳",
    backend_label: "API",

    analysis_heading: "Data Analysis",
    analysis_type_heading: "Analysis Type",
    analysis_input_heading: "Input Data (JSON)",
    analysis_streaming_toggle: "Stream response",
    analysis_use_test_data: "Use Test Data",
    analysis_submit: "Analyze Data",
    analysis_running: "Analyzing...",

    position_heading: "Position Analysis",
    position_input_heading: "> POSITION_DATA_INPUT (JSON)",
    position_output_title: "POSITION_ANALYSIS_OUTPUT",
    top_earning_heading: "Top Earning Analysis",
    top_earning_input_heading: "> TOP_EARNING_DATA_INPUT (JSON)",
    top_earning_output_title: "TOP_EARNING_ANALYSIS_OUTPUT",
    load_sample: "LOAD_SAMPLE",
    execute_analysis: "▶ EXECUTE_ANALYSIS",
    executing: "■ ANALYZING...",

    rec_heading: "Position Recommendations",
    rec_popular_pairs: "Popular pairs",
    rec_network: "Network",
    rec_exchange: "Exchange",
    rec_token_a: "Token A",
    rec_token_b: "Token B",
    rec_select_token: "Select token",
    rec_swap: "⇄ Swap",
    rec_weights_heading: "Scoring weights",
    rec_weight_apr: "APR",
    rec_weight_roi: "ROI",
    rec_weight_volume: "Volume",
    rec_age_heading: "Position age (days)",
    rec_age_from: "from",
    rec_age_to: "to",
    rec_load_sample: "LOAD_SAMPLE",
    rec_submit: "▶ FIND_POSITIONS",
    rec_loading: "■ SEARCHING...",
    rec_report_title: "RECOMMENDATIONS_REPORT",
    rec_ranking: "Ranking",
    rec_table_heading: "Top positions",
    rec_analyze_all: "🤖 GET AI ANALYSIS",
    rec_analyze_all_title: "AI_ANALYSIS",
    rec_analyze_row: "🤖 AI ANALYZE THIS POSITION",
    rec_row_analysis_title: "POSITION_AI_ANALYSIS",
    rec_details_heading: "Position Details",
    rec_performance_heading: "Performance",
    rec_no_positions_to_analyze: "No position data available to analyze",

    chat_heading: "Assistant",
    chat_placeholder: "Ask about pools, ranges or strategies...",
    chat_send: "Send",
    chat_clear: "Clear",
    chat_you: "You",
    chat_assistant: "Assistant",
    chat_empty: "No messages yet.",

    copy: "📋 Copy",
    waiting_for_output: "Waiting for first tokens...",
};
