use eframe::egui::{CentralPanel, Context, Frame, Margin, RichText, ScrollArea, SidePanel, TopBottomPanel};

use crate::ui::app::{DashboardApp, Tab};
use crate::ui::app_async::submit_json_form;
use crate::ui::app_state::HealthStatus;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{
    ChatEvent, ChatPanel, JsonFormEvent, JsonFormPanel, NavigationPanel, Panel,
    RecommendationsEvent, RecommendationsPanel,
};

#[cfg(debug_assertions)]
use crate::config::debug::PRINT_UI_INTERACTIONS;

impl DashboardApp {
    pub(super) fn render_top_panel(&mut self, ctx: &Context) {
        let top_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 6));
        TopBottomPanel::top("top_panel").frame(top_frame).show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(UI_TEXT.app_title)
                        .monospace()
                        .strong()
                        .size(18.0)
                        .color(UI_CONFIG.colors.heading),
                );
                ui.label_subdued(UI_TEXT.app_subtitle);
                ui.separator();

                match &self.health {
                    HealthStatus::Unknown => {
                        ui.metric(UI_TEXT.health_label, UI_TEXT.health_unknown, UI_CONFIG.colors.label)
                    }
                    HealthStatus::Checking(_) => {
                        ui.metric(UI_TEXT.health_label, UI_TEXT.health_checking, UI_CONFIG.colors.warning)
                    }
                    HealthStatus::Online(status) => {
                        ui.metric(UI_TEXT.health_label, status, UI_CONFIG.colors.online)
                    }
                    HealthStatus::Offline(reason) => {
                        ui.metric(UI_TEXT.health_label, "offline", UI_CONFIG.colors.error);
                        ui.label_subdued(reason);
                    }
                }

                let checking = matches!(self.health, HealthStatus::Checking(_));
                if ui
                    .add_enabled(!checking, eframe::egui::Button::new(UI_TEXT.health_recheck).small())
                    .clicked()
                {
                    self.check_health();
                }
            });
        });
    }

    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                let events = NavigationPanel::new(self.tab).render(ui);
                for tab in events {
                    #[cfg(debug_assertions)]
                    if PRINT_UI_INTERACTIONS {
                        log::info!("Switched to {:?}", tab);
                    }
                    self.tab = tab;
                }
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::symmetric(16, 8));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("central_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| match self.tab {
                        Tab::Analysis | Tab::Position | Tab::TopEarning => {
                            let form = match self.tab {
                                Tab::Position => &mut self.position,
                                Tab::TopEarning => &mut self.top_earning,
                                _ => &mut self.analysis,
                            };
                            let events = JsonFormPanel::new(form).render(ui);
                            for event in events {
                                match event {
                                    JsonFormEvent::Submit => {
                                        if submit_json_form(&self.client, form, ui.ctx()) {
                                            self.last_action =
                                                Some(format!("{} submitted", form.kind.label()));
                                        }
                                    }
                                }
                            }
                        }
                        Tab::Recommendations => {
                            let events = RecommendationsPanel::new(&mut self.recommendations).render(ui);
                            for event in events {
                                match event {
                                    RecommendationsEvent::Submit => self.submit_recommendations(),
                                    RecommendationsEvent::AnalyzeRow(key) => {
                                        self.analyze_row(key, ui.ctx())
                                    }
                                    RecommendationsEvent::AnalyzeAll => self.analyze_all(ui.ctx()),
                                    // Handled inside the panel
                                    RecommendationsEvent::SelectRanking(_)
                                    | RecommendationsEvent::SortBy(_)
                                    | RecommendationsEvent::ToggleRow(_) => {}
                                }
                            }
                        }
                        Tab::Chat => {
                            let events = ChatPanel::new(&mut self.chat).render(ui);
                            for event in events {
                                match event {
                                    ChatEvent::Send => self.send_chat(ui.ctx()),
                                    ChatEvent::Clear => self.clear_chat(),
                                }
                            }
                        }
                    });
            });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.metric(UI_TEXT.backend_label, self.client.base_url(), UI_CONFIG.colors.terminal_text);
                    ui.separator();
                    if self.is_busy() {
                        ui.spinner();
                        ui.separator();
                    }
                    if let Some(action) = &self.last_action {
                        ui.label_subdued(action);
                        ui.separator();
                    }
                    if self.config.debug {
                        ui.label_warning("DEBUG");
                    }
                });
            });
    }
}
