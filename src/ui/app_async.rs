use eframe::egui;
use serde_json::Value;

use crate::api::{ApiClient, ApiError};
#[cfg(debug_assertions)]
use crate::config::debug::{PRINT_RECOMMENDATION_SHAPE, PRINT_UI_INTERACTIONS};
use crate::config::API;
use crate::domain::Recommendations;
use crate::domain::position::AnalysisTarget;
use crate::domain::requests::{ChatRequest, parse_json_input};
use crate::domain::table::AnalysisKey;
use crate::engine::runtime::spawn_promise;
use crate::engine::{TextJob, spawn_text_job};
use crate::report::formatter::{
    ERROR_PREFIX, INPUT_ERROR_PREFIX, format_recommendations, health_label, transport_error_report,
};
use crate::ui::app::DashboardApp;
use crate::ui::app_state::{HealthStatus, JsonForm};
use crate::ui::config::UI_TEXT;
use crate::utils::app_time::clock_label;

/// Parse the form's input and start its analysis job.
///
/// Invalid JSON never reaches the network; the parser message is shown instead.
pub(super) fn submit_json_form(client: &ApiClient, form: &JsonForm, ctx: &egui::Context) -> bool {
    let payload = match parse_json_input(&form.input) {
        Ok(payload) => payload,
        Err(message) => {
            form.result
                .set_immediate(format!("{}{}", INPUT_ERROR_PREFIX, message), true);
            return false;
        }
    };

    let endpoint = form.kind.endpoint();
    let job = if form.streaming {
        TextJob::streaming(endpoint, payload, form.error_prefix)
    } else {
        TextJob::buffered(endpoint, payload, form.error_prefix)
    };
    spawn_text_job(client.clone(), job, form.result.begin(), ctx.clone());
    true
}

impl DashboardApp {
    pub(super) fn check_health(&mut self) {
        let client = self.client.clone();
        self.health = HealthStatus::Checking(spawn_promise(async move { client.health().await }));
    }

    pub(super) fn poll_health(&mut self) {
        if !matches!(self.health, HealthStatus::Checking(_)) {
            return;
        }
        let HealthStatus::Checking(promise) = std::mem::replace(&mut self.health, HealthStatus::Unknown)
        else {
            return;
        };
        self.health = match promise.try_take() {
            Ok(Ok(body)) => HealthStatus::Online(health_label(&body)),
            Ok(Err(e)) => {
                log::warn!("Health check failed: {}", e);
                HealthStatus::Offline(e.to_string())
            }
            Err(promise) => HealthStatus::Checking(promise),
        };
    }

    pub(super) fn submit_recommendations(&mut self) {
        let state = &mut self.recommendations;
        state.discard_result();

        let params = match state.query.query_params() {
            Ok(params) => params,
            Err(e) => {
                state
                    .report
                    .set_immediate(format!("{}{}", ERROR_PREFIX, e.message()), true);
                return;
            }
        };

        #[cfg(debug_assertions)]
        if PRINT_UI_INTERACTIONS {
            log::info!("Requesting recommendations: {:?}", params);
        }

        state.report.clear();
        state.submitted = Some(state.query.clone());
        let client = self.client.clone();
        state.request = Some(spawn_promise(async move {
            client.get_json(API.endpoints.recommendations, &params).await
        }));
        self.set_last_action("Recommendations requested");
    }

    pub(super) fn poll_recommendations(&mut self) {
        let Some(promise) = self.recommendations.request.take() else {
            return;
        };
        match promise.try_take() {
            Ok(result) => self.on_recommendations(result),
            Err(promise) => self.recommendations.request = Some(promise),
        }
    }

    fn on_recommendations(&mut self, result: Result<Value, ApiError>) {
        let state = &mut self.recommendations;
        match result {
            Ok(body) => {
                let recommendations = Recommendations::from_value(body);

                #[cfg(debug_assertions)]
                if PRINT_RECOMMENDATION_SHAPE {
                    log::info!(
                        "Recommendations: {:?} shape, {} positions, rankings {:?}",
                        recommendations.shape,
                        recommendations.positions.len(),
                        recommendations
                            .rankings
                            .iter()
                            .map(|r| (r.name.as_str(), r.positions.len()))
                            .collect::<Vec<_>>()
                    );
                }

                state.report.set_immediate(
                    format_recommendations(&recommendations),
                    recommendations.error.is_some(),
                );
                state.accept(recommendations);
            }
            Err(e) => {
                log::warn!("Recommendations request failed: {}", e);
                state.report.set_immediate(transport_error_report(&e), true);
            }
        }
    }

    /// Stream an AI analysis of one row into its own slot.
    pub(super) fn analyze_row(&mut self, key: AnalysisKey, ctx: &egui::Context) {
        let state = &mut self.recommendations;
        let Some(result) = state.result.as_ref() else {
            return;
        };
        let Some(position) = result
            .ranking(&key.0)
            .and_then(|ranking| ranking.positions.get(key.1))
        else {
            log::warn!("No row {} in ranking {}", key.1, key.0);
            return;
        };

        let context = state.submitted.as_ref().unwrap_or(&state.query).context();
        let payload = result.analysis_payload(AnalysisTarget::Single(position), &context);
        let job = TextJob::streaming(API.endpoints.recommendations_analyze, payload, ERROR_PREFIX);

        let slot = state.row_slot(key);
        spawn_text_job(self.client.clone(), job, slot.begin(), ctx.clone());
        self.set_last_action("Position analysis requested");
    }

    /// One buffered analysis over every row of the displayed ranking.
    pub(super) fn analyze_all(&mut self, ctx: &egui::Context) {
        let state = &mut self.recommendations;
        let positions = state.displayed_positions();
        if positions.is_empty() {
            state.all_analysis.set_immediate(
                format!("{}{}", ERROR_PREFIX, UI_TEXT.rec_no_positions_to_analyze),
                true,
            );
            return;
        }

        let context = state.submitted.as_ref().unwrap_or(&state.query).context();
        let Some(result) = state.result.as_ref() else {
            return;
        };
        let payload = result.analysis_payload(AnalysisTarget::All(positions), &context);
        let job = TextJob::buffered(API.endpoints.recommendations_analyze, payload, ERROR_PREFIX);

        spawn_text_job(self.client.clone(), job, state.all_analysis.begin(), ctx.clone());
        self.set_last_action("Analysis of all positions requested");
    }

    pub(super) fn send_chat(&mut self, ctx: &egui::Context) {
        let Some(request) = ChatRequest::new(&self.chat.input) else {
            return;
        };

        let previous_reply = self.chat.reply.snapshot().text;
        self.chat
            .log
            .start_exchange(&request.message, &previous_reply, &clock_label());
        self.chat.input.clear();

        let job = TextJob::streaming(API.endpoints.chat, request.to_value(), ERROR_PREFIX);
        spawn_text_job(self.client.clone(), job, self.chat.reply.begin(), ctx.clone());
        self.set_last_action("Chat message sent");
    }

    pub(super) fn clear_chat(&mut self) {
        self.chat.log.clear();
        self.chat.reply.clear();
    }

    /// Anything in flight that needs the UI to keep polling
    pub(super) fn is_busy(&self) -> bool {
        matches!(self.health, HealthStatus::Checking(_))
            || self.recommendations.is_loading()
            || self.analysis.result.is_loading()
            || self.position.result.is_loading()
            || self.top_earning.result.is_loading()
            || self.recommendations.all_analysis.is_loading()
            || self
                .recommendations
                .row_analyses
                .values()
                .any(|slot| slot.is_loading())
            || self.chat.reply.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn invalid_json_is_reported_without_a_request() {
        let client = ApiClient::new(&AppConfig::default());
        let mut form = JsonForm::general();
        form.input = "{".to_string();

        assert!(!submit_json_form(&client, &form, &egui::Context::default()));

        let state = form.result.snapshot();
        assert!(!state.loading);
        assert!(state.failed);
        assert!(state.text.starts_with(INPUT_ERROR_PREFIX));
        assert!(state.text.starts_with("Error: "));
    }
}
