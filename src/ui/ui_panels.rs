use eframe::egui::{Button, ComboBox, DragValue, Grid, RichText, ScrollArea, TextEdit, Ui};
use strum::IntoEnumIterator;

use crate::domain::chat::ChatRole;
use crate::domain::requests::AnalysisKind;
use crate::domain::table::{AnalysisKey, RowKey, SortKey};
use crate::domain::tokens::{Chain, Exchange, POPULAR_PAIRS, tokens_on};
use crate::domain::{PositionRecord, Recommendations};
use crate::report::formatter::{
    cell_age, cell_in_range, cell_pnl, cell_ratio, cell_text, cell_tick, cell_tvl,
};
use crate::ui::app::Tab;
use crate::ui::app_state::{ChatState, JsonForm, RecommendationsState};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::markdown_view::show_markdown;
use crate::ui::result_view::{ResultFormat, show_result};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{colored_subsection_heading, section_heading, spaced_separator, submit_button};

#[cfg(debug_assertions)]
use crate::config::debug::PRINT_UI_INTERACTIONS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Left-hand module list
pub struct NavigationPanel {
    current: Tab,
}

impl NavigationPanel {
    pub fn new(current: Tab) -> Self {
        Self { current }
    }
}

impl Panel for NavigationPanel {
    type Event = Tab;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.nav_heading);
        for tab in Tab::iter() {
            let selected = tab == self.current;
            let label = RichText::new(format!("{} {}", tab.icon(), tab.label())).monospace();
            if ui.selectable_label(selected, label).clicked() && !selected {
                events.push(tab);
            }
        }
        events
    }
}

pub enum JsonFormEvent {
    Submit,
}

/// Free-form JSON analysis: general, position and top-earning tabs
pub struct JsonFormPanel<'a> {
    form: &'a mut JsonForm,
}

impl<'a> JsonFormPanel<'a> {
    pub fn new(form: &'a mut JsonForm) -> Self {
        Self { form }
    }

    fn render_options(&mut self, ui: &mut Ui) {
        ui.label(colored_subsection_heading(UI_TEXT.analysis_type_heading));
        ui.horizontal(|ui| {
            ComboBox::from_id_salt("analysis_kind")
                .selected_text(self.form.kind.label())
                .show_ui(ui, |ui| {
                    for kind in AnalysisKind::iter() {
                        ui.selectable_value(&mut self.form.kind, kind, kind.label());
                    }
                });
            ui.checkbox(&mut self.form.streaming, UI_TEXT.analysis_streaming_toggle);
        });
        ui.add_space(5.0);
    }
}

impl Panel for JsonFormPanel<'_> {
    type Event = JsonFormEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, self.form.heading);

        if self.form.selectable {
            self.render_options(ui);
        }

        let (sample_label, idle, busy) = if self.form.selectable {
            (
                UI_TEXT.analysis_use_test_data,
                UI_TEXT.analysis_submit,
                UI_TEXT.analysis_running,
            )
        } else {
            (UI_TEXT.load_sample, UI_TEXT.execute_analysis, UI_TEXT.executing)
        };

        ui.horizontal(|ui| {
            ui.label(colored_subsection_heading(self.form.input_heading));
            if ui.small_button(sample_label).clicked() {
                self.form.load_sample();
            }
        });
        ui.add(
            TextEdit::multiline(&mut self.form.input)
                .code_editor()
                .desired_rows(UI_CONFIG.input_rows)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(5.0);

        let loading = self.form.result.is_loading();
        if submit_button(ui, idle, busy, loading, self.form.can_submit()) {
            events.push(JsonFormEvent::Submit);
        }

        spaced_separator(ui);
        show_result(
            ui,
            self.form.output_title,
            self.form.output_title,
            &self.form.result.snapshot(),
            ResultFormat::Markdown,
        );
        events
    }
}

pub enum RecommendationsEvent {
    Submit,
    AnalyzeRow(AnalysisKey),
    AnalyzeAll,
    SelectRanking(String),
    SortBy(SortKey),
    ToggleRow(RowKey),
}

/// Query form, report, ranking table and per-row AI analysis
pub struct RecommendationsPanel<'a> {
    state: &'a mut RecommendationsState,
}

impl<'a> RecommendationsPanel<'a> {
    pub fn new(state: &'a mut RecommendationsState) -> Self {
        Self { state }
    }

    fn render_form(&mut self, ui: &mut Ui) -> bool {
        let query = &mut self.state.query;

        ui.label(colored_subsection_heading(UI_TEXT.rec_popular_pairs));
        ui.horizontal_wrapped(|ui| {
            for (a, b) in POPULAR_PAIRS {
                let button = Button::new(format!("{}/{}", a, b)).min_size([UI_CONFIG.pair_button_width, 0.0].into());
                if ui.add(button).clicked() {
                    query.select_pair(a, b);
                }
            }
        });
        ui.add_space(8.0);

        Grid::new("recommendation_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(UI_TEXT.rec_network);
                let mut network = query.network;
                ComboBox::from_id_salt("rec_network")
                    .selected_text(network.label())
                    .show_ui(ui, |ui| {
                        for chain in Chain::iter() {
                            ui.selectable_value(&mut network, chain, chain.label());
                        }
                    });
                query.set_network(network);
                ui.end_row();

                ui.label(UI_TEXT.rec_exchange);
                ComboBox::from_id_salt("rec_exchange")
                    .selected_text(query.exchange.label())
                    .show_ui(ui, |ui| {
                        for exchange in Exchange::iter() {
                            ui.selectable_value(&mut query.exchange, exchange, exchange.label());
                        }
                    });
                ui.end_row();

                for (label, salt, slot) in [
                    (UI_TEXT.rec_token_a, "rec_token_a", &mut query.token1),
                    (UI_TEXT.rec_token_b, "rec_token_b", &mut query.token2),
                ] {
                    ui.label(label);
                    ComboBox::from_id_salt(salt)
                        .selected_text(slot.as_deref().unwrap_or(UI_TEXT.rec_select_token))
                        .show_ui(ui, |ui| {
                            for token in tokens_on(network) {
                                let text = format!("{} ({})", token.symbol, token.name);
                                ui.selectable_value(slot, Some(token.symbol.to_string()), text);
                            }
                        });
                    ui.end_row();
                }
            });

        if ui.button(UI_TEXT.rec_swap).clicked() {
            query.swap_tokens();
        }

        ui.add_space(8.0);
        ui.label(colored_subsection_heading(UI_TEXT.rec_weights_heading));
        ui.horizontal(|ui| {
            for (label, weight) in [
                (UI_TEXT.rec_weight_apr, &mut query.weight_apr),
                (UI_TEXT.rec_weight_roi, &mut query.weight_roi),
                (UI_TEXT.rec_weight_volume, &mut query.weight_volume),
            ] {
                ui.label(label);
                ui.add(DragValue::new(weight).speed(0.01).range(0.0..=1.0).max_decimals(2));
            }
        });

        ui.label(colored_subsection_heading(UI_TEXT.rec_age_heading));
        ui.horizontal(|ui| {
            ui.label(UI_TEXT.rec_age_from);
            ui.add(DragValue::new(&mut query.age_from_days).speed(0.1).range(0.0..=365.0));
            ui.label(UI_TEXT.rec_age_to);
            ui.add(DragValue::new(&mut query.age_to_days).speed(0.1).range(0.0..=365.0));
        });

        ui.add_space(8.0);
        let loading = self.state.is_loading();
        let mut submit = false;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!loading, Button::new(UI_TEXT.rec_load_sample))
                .clicked()
            {
                self.state.query.reset_to_sample();
            }
            submit = submit_button(ui, UI_TEXT.rec_submit, UI_TEXT.rec_loading, loading, true);
        });
        submit
    }
}

impl Panel for RecommendationsPanel<'_> {
    type Event = RecommendationsEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.rec_heading);

        if self.render_form(ui) {
            events.push(RecommendationsEvent::Submit);
        }

        spaced_separator(ui);
        show_result(
            ui,
            "rec_report",
            UI_TEXT.rec_report_title,
            &self.state.report.snapshot(),
            ResultFormat::Preformatted,
        );

        if let Some(result) = self.state.result.as_ref().filter(|r| r.has_any_position()) {
            spaced_separator(ui);
            events.extend(render_rankings(ui, self.state, result));
        }

        // Display-only events are handled here; the rest go to the app.
        events
            .into_iter()
            .filter_map(|event| match event {
                RecommendationsEvent::SelectRanking(name) => {
                    self.state.selected_ranking = name;
                    None
                }
                RecommendationsEvent::SortBy(key) => {
                    self.state.sort.toggle(key);
                    None
                }
                RecommendationsEvent::ToggleRow(key) => {
                    #[cfg(debug_assertions)]
                    if PRINT_UI_INTERACTIONS {
                        log::info!("Toggled row {} in ranking {}", key.row, key.ranking);
                    }
                    self.state.expansion.toggle(&key);
                    None
                }
                other => Some(other),
            })
            .collect()
    }
}

fn render_rankings(
    ui: &mut Ui,
    state: &RecommendationsState,
    result: &Recommendations,
) -> Vec<RecommendationsEvent> {
    let mut events = Vec::new();
    let ranking_name = state.selected_ranking.as_str();

    ui.horizontal(|ui| {
        ui.label(colored_subsection_heading(UI_TEXT.rec_ranking));
        ComboBox::from_id_salt("rec_ranking")
            .selected_text(ranking_name.to_uppercase())
            .show_ui(ui, |ui| {
                for ranking in &result.rankings {
                    let label = format!("{} ({})", ranking.name.to_uppercase(), ranking.positions.len());
                    if ui
                        .selectable_label(ranking.name == ranking_name, label)
                        .clicked()
                    {
                        events.push(RecommendationsEvent::SelectRanking(ranking.name.clone()));
                    }
                }
            });

        let all_loading = state.all_analysis.is_loading();
        if ui
            .add_enabled(!all_loading, Button::new(UI_TEXT.rec_analyze_all))
            .clicked()
        {
            events.push(RecommendationsEvent::AnalyzeAll);
        }
    });

    if let Some(description) = result
        .ranking(ranking_name)
        .and_then(|r| r.description.as_deref())
    {
        ui.label_subdued(description);
    }

    show_result(
        ui,
        "rec_all_analysis",
        UI_TEXT.rec_analyze_all_title,
        &state.all_analysis.snapshot(),
        ResultFormat::Markdown,
    );

    ui.add_space(6.0);
    ui.label(colored_subsection_heading(UI_TEXT.rec_table_heading));

    let positions = state.displayed_positions();
    let convention = result.convention();
    let order = state.table_order();
    let mut expanded: Option<(usize, &PositionRecord)> = None;

    ScrollArea::horizontal().id_salt("rec_table_scroll").show(ui, |ui| {
        Grid::new(("rec_table", ranking_name))
            .striped(true)
            .num_columns(SortKey::iter().count() + 2)
            .show(ui, |ui| {
                ui.label("");
                for key in SortKey::iter() {
                    let arrow = match (state.sort.key == key, state.sort.descending) {
                        (true, true) => " ▼",
                        (true, false) => " ▲",
                        (false, _) => "",
                    };
                    let header = RichText::new(format!("{}{}", key.header(), arrow)).strong();
                    if ui.add(Button::new(header).frame(false)).clicked() {
                        events.push(RecommendationsEvent::SortBy(key));
                    }
                }
                ui.label(RichText::new("In Range").strong());
                ui.end_row();

                for index in order {
                    let position = &positions[index];
                    let row_key = RowKey::new(ranking_name, index, position);
                    let is_open = state.expansion.is_expanded(&row_key);
                    if is_open {
                        expanded = Some((index, position));
                    }

                    let toggle = if is_open { "▼" } else { "▶" };
                    if ui.add(Button::new(toggle).frame(false)).clicked() {
                        events.push(RecommendationsEvent::ToggleRow(row_key));
                    }
                    ui.label(format!("{}", index + 1));
                    ui.monospace(cell_tick(position.tick_lower));
                    ui.monospace(cell_tick(position.tick_upper));
                    ui.monospace(cell_text(position.fee_tier.as_deref()));
                    ui.monospace(cell_ratio(position.apr, convention.apr, 2));
                    ui.monospace(cell_ratio(position.roi, convention.roi, 2));
                    ui.monospace(cell_tvl(position.tvl));
                    let in_range_color = match position.in_range {
                        Some(true) => UI_CONFIG.colors.positive,
                        Some(false) => UI_CONFIG.colors.negative,
                        None => UI_CONFIG.colors.label,
                    };
                    ui.label(RichText::new(cell_in_range(position.in_range)).color(in_range_color));
                    ui.end_row();
                }
            });
    });

    if let Some((index, position)) = expanded {
        ui.add_space(6.0);
        events.extend(render_row_details(ui, state, result, ranking_name, index, position));
    }

    events
}

fn render_row_details(
    ui: &mut Ui,
    state: &RecommendationsState,
    result: &Recommendations,
    ranking_name: &str,
    index: usize,
    position: &PositionRecord,
) -> Vec<RecommendationsEvent> {
    let mut events = Vec::new();
    let convention = result.convention();
    let key: AnalysisKey = (ranking_name.to_string(), index);
    let analysis = state.row_analyses.get(&key).map(|slot| slot.snapshot());

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.label_header(position.report_label(index));
        ui.columns(2, |columns| {
            columns[0].label(colored_subsection_heading(UI_TEXT.rec_details_heading));
            columns[0].metric("Pool", &cell_text(position.pool.as_deref()), UI_CONFIG.colors.terminal_text);
            columns[0].metric(
                "Network",
                &cell_text(position.network.as_deref().or(result.network.as_deref())),
                UI_CONFIG.colors.terminal_text,
            );
            columns[0].metric(
                "Exchange",
                &cell_text(position.exchange.as_deref().or(result.exchange.as_deref())),
                UI_CONFIG.colors.terminal_text,
            );
            columns[0].metric("Fee Tier", &cell_text(position.fee_tier.as_deref()), UI_CONFIG.colors.terminal_text);
            columns[0].metric(
                "Ticks",
                &format!("{} to {}", cell_tick(position.tick_lower), cell_tick(position.tick_upper)),
                UI_CONFIG.colors.terminal_text,
            );
            columns[0].metric("Age", &cell_age(position.age_days), UI_CONFIG.colors.terminal_text);

            columns[1].label(colored_subsection_heading(UI_TEXT.rec_performance_heading));
            columns[1].metric("APR", &cell_ratio(position.apr, convention.apr, 2), UI_CONFIG.colors.positive);
            columns[1].metric("ROI", &cell_ratio(position.roi, convention.roi, 2), UI_CONFIG.colors.positive);
            columns[1].metric("TVL", &cell_tvl(position.tvl), UI_CONFIG.colors.terminal_text);
            if let Some(pnl) = cell_pnl(position.pnl) {
                let color = if position.pnl.is_some_and(|p| p < 0.0) {
                    UI_CONFIG.colors.negative
                } else {
                    UI_CONFIG.colors.positive
                };
                columns[1].metric("PNL", &pnl, color);
            }
            columns[1].metric(
                "Score",
                &cell_ratio(position.weighted_score, convention.score, 2),
                UI_CONFIG.colors.heading,
            );
            for (name, value) in position.sub_scores.iter() {
                columns[1].metric(name, &convention.score.tag(value).format(2), UI_CONFIG.colors.label);
            }
        });

        ui.add_space(6.0);
        let loading = analysis.as_ref().is_some_and(|a| a.loading);
        if ui
            .add_enabled(!loading, Button::new(UI_TEXT.rec_analyze_row))
            .clicked()
        {
            events.push(RecommendationsEvent::AnalyzeRow(key.clone()));
        }
        if let Some(analysis) = &analysis {
            show_result(
                ui,
                ("rec_row_analysis", &key),
                UI_TEXT.rec_row_analysis_title,
                analysis,
                ResultFormat::Markdown,
            );
        }
    });

    events
}

pub enum ChatEvent {
    Send,
    Clear,
}

pub struct ChatPanel<'a> {
    state: &'a mut ChatState,
}

impl<'a> ChatPanel<'a> {
    pub fn new(state: &'a mut ChatState) -> Self {
        Self { state }
    }

    fn render_history(&self, ui: &mut Ui) {
        if self.state.log.is_empty() {
            ui.label_subdued(UI_TEXT.chat_empty);
            return;
        }

        let reply = self.state.reply.snapshot();
        for message in self.state.log.messages() {
            let (who, fill) = match message.role {
                ChatRole::User => (UI_TEXT.chat_you, UI_CONFIG.colors.user_message),
                ChatRole::Assistant => (UI_TEXT.chat_assistant, UI_CONFIG.colors.assistant_message),
            };
            eframe::egui::Frame::new()
                .fill(fill)
                .inner_margin(eframe::egui::Margin::symmetric(8, 6))
                .corner_radius(6.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(who).strong());
                        ui.label_subdued(&message.at);
                        if message.live && reply.loading {
                            ui.spinner();
                        }
                    });
                    if !message.live {
                        show_markdown(ui, &message.text);
                    } else if reply.failed {
                        ui.label_error(&reply.text);
                    } else if reply.text.is_empty() {
                        ui.label_subdued(UI_TEXT.waiting_for_output);
                    } else {
                        show_markdown(ui, &reply.text);
                    }
                });
            ui.add_space(4.0);
        }
    }
}

impl Panel for ChatPanel<'_> {
    type Event = ChatEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.chat_heading);

        ScrollArea::vertical()
            .id_salt("chat_history")
            .max_height(UI_CONFIG.chat_history_height)
            .stick_to_bottom(true)
            .auto_shrink([false, true])
            .show(ui, |ui| self.render_history(ui));

        spaced_separator(ui);
        let response = ui.add(
            TextEdit::singleline(&mut self.state.input)
                .hint_text(UI_TEXT.chat_placeholder)
                .desired_width(f32::INFINITY),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(eframe::egui::Key::Enter));

        ui.horizontal(|ui| {
            let can_send = !self.state.input.trim().is_empty();
            if ui.add_enabled(can_send, Button::new(UI_TEXT.chat_send)).clicked() || (entered && can_send) {
                events.push(ChatEvent::Send);
            }
            if ui.button(UI_TEXT.chat_clear).clicked() {
                events.push(ChatEvent::Clear);
            }
        });
        events
    }
}
