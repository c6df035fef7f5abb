use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// Terminal palette
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub terminal_text: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub online: Color32,
    pub code_background: Color32,
    pub code_keyword: Color32,
    pub code_literal: Color32,
    pub code_number: Color32,
    pub code_comment: Color32,
    pub user_message: Color32,
    pub assistant_message: Color32,
    pub positive: Color32,
    pub negative: Color32,
}

/// Layout sizes plus the color palette
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_width: f32,
    pub input_rows: usize,
    pub result_max_height: f32,
    pub chat_history_height: f32,
    pub pair_button_width: f32,
}

/// Dashboard theme and layout sizes
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(74, 222, 128),
        subsection_heading: Color32::from_rgb(134, 239, 172),
        central_panel: Color32::from_rgb(10, 10, 10),
        side_panel: Color32::from_rgb(24, 24, 27),
        terminal_text: Color32::from_rgb(74, 222, 128),
        error: Color32::from_rgb(255, 100, 100),
        warning: Color32::from_rgb(255, 215, 0),
        online: Color32::from_rgb(100, 200, 100),
        code_background: Color32::from_rgb(17, 24, 39),
        code_keyword: Color32::from_rgb(198, 120, 221),
        code_literal: Color32::from_rgb(152, 195, 121),
        code_number: Color32::from_rgb(209, 154, 102),
        code_comment: Color32::from_rgb(92, 99, 112),
        user_message: Color32::from_rgb(22, 101, 52),
        assistant_message: Color32::from_rgb(39, 39, 42),
        positive: Color32::from_rgb(150, 255, 150),
        negative: Color32::from_rgb(255, 120, 120),
    },
    side_panel_width: 180.0,
    input_rows: 14,
    result_max_height: 420.0,
    chat_history_height: 360.0,
    pair_button_width: 110.0,
};
