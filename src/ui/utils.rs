use eframe::egui::{Button, Context, RichText, Spinner, Ui, Visuals};

#[cfg(debug_assertions)]
use crate::config::debug::PRINT_UI_INTERACTIONS;
use crate::ui::config::{UI_CONFIG, UI_TEXT};

/// Terminal-style heading: `> TEXT:` in the accent color
pub fn colored_heading(text: impl Into<String>) -> RichText {
    let text: String = text.into();
    RichText::new(format!("> {}:", text.to_uppercase()))
        .monospace()
        .color(UI_CONFIG.colors.heading)
}

pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text).color(UI_CONFIG.colors.subsection_heading)
}

/// Dark terminal theme: near-black panels, green accents
pub fn setup_custom_visuals(ctx: &Context) {
    let colors = UI_CONFIG.colors;
    let mut visuals = Visuals::dark();

    visuals.window_fill = colors.central_panel;
    visuals.panel_fill = colors.side_panel;
    visuals.code_bg_color = colors.code_background;
    visuals.extreme_bg_color = colors.code_background;
    visuals.faint_bg_color = colors.side_panel;
    visuals.selection.bg_fill = colors.user_message;
    visuals.hyperlink_color = colors.subsection_heading;

    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
    ] {
        widget.fg_stroke.color = colors.label;
    }
    for widget in [&mut visuals.widgets.hovered, &mut visuals.widgets.active] {
        widget.fg_stroke.color = colors.heading;
    }

    ctx.set_visuals(visuals);
}

pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(8.0);
    ui.heading(colored_heading(text));
    ui.add_space(6.0);
}

pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);
}

/// Submit button that turns into a spinner while `loading`.
/// Returns true when clicked.
pub fn submit_button(ui: &mut Ui, idle: &str, busy: &str, loading: bool, enabled: bool) -> bool {
    ui.horizontal(|ui| {
        if loading {
            ui.add(Spinner::new());
            ui.add_enabled(false, Button::new(RichText::new(busy).strong()));
            false
        } else {
            ui.add_enabled(enabled, Button::new(RichText::new(idle).strong()))
                .clicked()
        }
    })
    .inner
}

/// Copy-to-clipboard button
pub fn copy_button(ui: &mut Ui, text: &str) {
    let enabled = !text.is_empty();
    if ui
        .add_enabled(enabled, Button::new(UI_TEXT.copy).small())
        .clicked()
    {
        ui.ctx().copy_text(text.to_string());
        #[cfg(debug_assertions)]
        if PRINT_UI_INTERACTIONS {
            log::info!("Copied {} chars to clipboard", text.chars().count());
        }
    }
}
