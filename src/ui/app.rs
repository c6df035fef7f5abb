use eframe::{Frame, egui};
use strum_macros::EnumIter;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::ui::app_state::{ChatState, HealthStatus, JsonForm, RecommendationsState};
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::debug::PRINT_SHUTDOWN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum Tab {
    #[default]
    Analysis,
    Position,
    TopEarning,
    Recommendations,
    Chat,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Analysis => "Data Analysis",
            Tab::Position => "Position",
            Tab::TopEarning => "Top Earning",
            Tab::Recommendations => "Recommendations",
            Tab::Chat => "Chat",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tab::Analysis => "📊",
            Tab::Position => "📍",
            Tab::TopEarning => "💰",
            Tab::Recommendations => "🏆",
            Tab::Chat => "💬",
        }
    }
}

pub struct DashboardApp {
    pub(super) config: AppConfig,
    pub(super) client: ApiClient,
    pub(super) tab: Tab,
    pub(super) health: HealthStatus,
    pub(super) analysis: JsonForm,
    pub(super) position: JsonForm,
    pub(super) top_earning: JsonForm,
    pub(super) recommendations: RecommendationsState,
    pub(super) chat: ChatState,
    /// Last thing the user did, for the status bar
    pub(super) last_action: Option<String>,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        setup_custom_visuals(&cc.egui_ctx);
        log::info!("Backend: {}", config.api_base_url);

        let client = ApiClient::new(&config);
        let mut app = Self {
            config,
            client,
            tab: Tab::default(),
            health: HealthStatus::Unknown,
            analysis: JsonForm::general(),
            position: JsonForm::position(),
            top_earning: JsonForm::top_earning(),
            recommendations: RecommendationsState::default(),
            chat: ChatState::default(),
            last_action: None,
        };
        app.check_health();
        app
    }

    pub(super) fn set_last_action(&mut self, action: impl Into<String>) {
        self.last_action = Some(action.into());
    }
}

impl eframe::App for DashboardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Pending promises must go before the runtime does.
        self.recommendations.request = None;
        self.health = HealthStatus::Unknown;

        #[cfg(debug_assertions)]
        if PRINT_SHUTDOWN {
            log::info!("Application shutdown complete.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_health();
        self.poll_recommendations();

        self.render_top_panel(ctx);
        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        if self.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
