use std::collections::HashMap;

use poll_promise::Promise;
use serde_json::Value;

use crate::api::ApiError;
use crate::config::API;
use crate::domain::chat::ChatLog;
use crate::domain::requests::{AnalysisKind, RecommendationQuery};
use crate::domain::table::{AnalysisKey, ExpansionState, SortOrder};
use crate::domain::{PositionRecord, Recommendations};
use crate::engine::ResultSlot;
use crate::report::formatter::{ERROR_PREFIX, INPUT_ERROR_PREFIX};
use crate::ui::config::UI_TEXT;

/// Free-form JSON input bound to one analysis endpoint (or a choice of them)
pub struct JsonForm {
    pub kind: AnalysisKind,
    pub input: String,
    pub streaming: bool,
    /// Whether the user can switch `kind` and `streaming`
    pub selectable: bool,
    pub error_prefix: &'static str,
    pub heading: &'static str,
    pub input_heading: &'static str,
    pub output_title: &'static str,
    pub result: ResultSlot,
}

impl JsonForm {
    /// The general analysis panel
    pub fn general() -> Self {
        Self {
            kind: AnalysisKind::General,
            input: String::new(),
            streaming: true,
            selectable: true,
            error_prefix: INPUT_ERROR_PREFIX,
            heading: UI_TEXT.analysis_heading,
            input_heading: UI_TEXT.analysis_input_heading,
            output_title: "ANALYSIS_RESULT",
            result: ResultSlot::default(),
        }
    }

    pub fn position() -> Self {
        Self {
            kind: AnalysisKind::Position,
            selectable: false,
            error_prefix: ERROR_PREFIX,
            heading: UI_TEXT.position_heading,
            input_heading: UI_TEXT.position_input_heading,
            output_title: UI_TEXT.position_output_title,
            ..Self::general()
        }
    }

    pub fn top_earning() -> Self {
        Self {
            kind: AnalysisKind::TopEarning,
            selectable: false,
            error_prefix: ERROR_PREFIX,
            heading: UI_TEXT.top_earning_heading,
            input_heading: UI_TEXT.top_earning_input_heading,
            output_title: UI_TEXT.top_earning_output_title,
            ..Self::general()
        }
    }

    pub fn load_sample(&mut self) {
        self.input = self.kind.sample_text();
    }

    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty() && !self.result.is_loading()
    }
}

/// Everything behind the recommendations tab
pub struct RecommendationsState {
    pub query: RecommendationQuery,
    /// Query the current result was fetched with
    pub submitted: Option<RecommendationQuery>,
    pub request: Option<Promise<Result<Value, ApiError>>>,
    pub report: ResultSlot,
    pub result: Option<Recommendations>,
    pub selected_ranking: String,
    pub sort: SortOrder,
    pub expansion: ExpansionState,
    pub row_analyses: HashMap<AnalysisKey, ResultSlot>,
    pub all_analysis: ResultSlot,
}

impl Default for RecommendationsState {
    fn default() -> Self {
        Self {
            query: RecommendationQuery::sample(),
            submitted: None,
            request: None,
            report: ResultSlot::default(),
            result: None,
            selected_ranking: String::new(),
            sort: SortOrder::default(),
            expansion: ExpansionState::default(),
            row_analyses: HashMap::new(),
            all_analysis: ResultSlot::default(),
        }
    }
}

impl RecommendationsState {
    pub fn is_loading(&self) -> bool {
        self.request.is_some()
    }

    /// Replace the previous result wholesale.
    pub fn accept(&mut self, recommendations: Recommendations) {
        self.selected_ranking = recommendations
            .rankings
            .first()
            .map(|r| r.name.clone())
            .unwrap_or_default();
        self.sort = SortOrder::default();
        self.expansion.clear();
        self.stop_analyses();
        self.result = Some(recommendations);
    }

    pub fn discard_result(&mut self) {
        self.result = None;
        self.selected_ranking.clear();
        self.expansion.clear();
        self.stop_analyses();
    }

    /// Supersede every row and all-rows analysis so their readers stop.
    fn stop_analyses(&mut self) {
        self.row_analyses.drain().for_each(|(_, slot)| slot.clear());
        self.all_analysis.clear();
    }

    /// Rows of the ranking currently on screen
    pub fn displayed_positions(&self) -> &[PositionRecord] {
        self.result
            .as_ref()
            .and_then(|r| r.ranking(&self.selected_ranking))
            .map(|r| r.positions.as_slice())
            .unwrap_or_default()
    }

    /// Table rows as indices into [`Self::displayed_positions`]: the first
    /// `max_rows` records, in the current sort order.
    pub fn table_order(&self) -> Vec<usize> {
        let positions = self.displayed_positions();
        let shown = positions.len().min(API.recommendations.max_rows);
        self.sort.apply(&positions[..shown])
    }

    pub fn row_slot(&mut self, key: AnalysisKey) -> ResultSlot {
        self.row_analyses.entry(key).or_default().clone()
    }
}

#[derive(Default)]
pub struct ChatState {
    pub input: String,
    pub log: ChatLog,
    pub reply: ResultSlot,
}

pub enum HealthStatus {
    Unknown,
    Checking(Promise<Result<Value, ApiError>>),
    Online(String),
    Offline(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ranked() -> Recommendations {
        Recommendations::from_value(json!({
            "rankings": {
                "aggregated": { "description": "All factors", "positions": [{ "nft_id": "1" }, { "nft_id": "2" }] },
                "apr": { "description": "APR only", "positions": [{ "nft_id": "2" }] }
            }
        }))
    }

    #[test]
    fn accept_selects_first_ranking_and_resets_rows() {
        let mut state = RecommendationsState::default();
        state.row_slot(("old".to_string(), 0)).set_immediate("stale", false);

        let rec = ranked();
        let first = rec.rankings[0].name.clone();
        state.accept(rec);

        assert_eq!(state.selected_ranking, first);
        assert!(state.row_analyses.is_empty());
        assert!(!state.displayed_positions().is_empty());
    }

    #[test]
    fn new_result_stops_running_row_analyses() {
        let mut state = RecommendationsState::default();
        state.accept(ranked());
        let row = state.row_slot(("aggregated".to_string(), 0)).begin();
        let all = state.all_analysis.begin();

        state.accept(ranked());
        assert!(row.update("late analysis").is_break());
        assert!(all.update("late summary").is_break());

        let row = state.row_slot(("aggregated".to_string(), 1)).begin();
        state.discard_result();
        assert!(row.update("late analysis").is_break());
        assert!(state.row_analyses.is_empty());
    }

    #[test]
    fn table_is_capped_at_max_rows() {
        let positions: Vec<_> = (0..API.recommendations.max_rows + 5)
            .map(|i| json!({ "nft_id": i.to_string(), "apr": i as f64 }))
            .collect();
        let mut state = RecommendationsState::default();
        state.accept(Recommendations::from_value(json!({ "positions": positions })));

        let order = state.table_order();
        assert_eq!(order.len(), API.recommendations.max_rows);
        assert!(order.iter().all(|&i| i < API.recommendations.max_rows));
    }

    #[test]
    fn displayed_positions_follow_selected_ranking() {
        let mut state = RecommendationsState::default();
        state.accept(ranked());

        state.selected_ranking = "apr".to_string();
        assert_eq!(state.displayed_positions().len(), 1);

        state.selected_ranking = "missing".to_string();
        assert!(state.displayed_positions().is_empty());
    }

    #[test]
    fn fixed_forms_use_upper_case_prefix() {
        assert_eq!(JsonForm::general().error_prefix, "Error: ");
        assert_eq!(JsonForm::position().error_prefix, "ERROR: ");
        assert_eq!(JsonForm::top_earning().kind, AnalysisKind::TopEarning);
        assert!(!JsonForm::general().can_submit());
    }
}
