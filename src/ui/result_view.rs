use std::hash::Hash;

use eframe::egui::{Align, Frame, Layout, Margin, RichText, ScrollArea, Spinner, Stroke, Ui};

use crate::engine::SlotState;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::markdown_view::{show_markdown, show_preformatted};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::copy_button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    /// Model output
    Markdown,
    /// Fixed-width text report
    Preformatted,
}

/// Titled output frame: copy button, spinner while loading, rendered body.
/// Draws nothing for an idle, empty slot.
pub fn show_result(
    ui: &mut Ui,
    id_salt: impl Hash,
    title: &str,
    state: &SlotState,
    format: ResultFormat,
) {
    if state.text.is_empty() && !state.loading {
        return;
    }

    Frame::new()
        .fill(UI_CONFIG.colors.central_panel)
        .stroke(Stroke::new(1.0, UI_CONFIG.colors.subsection_heading.gamma_multiply(0.4)))
        .inner_margin(Margin::symmetric(10, 8))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(title).monospace().color(UI_CONFIG.colors.heading));
                if state.loading {
                    ui.add(Spinner::new().size(12.0));
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    copy_button(ui, &state.text);
                });
            });
            ui.separator();

            if state.text.is_empty() {
                ui.label_subdued(UI_TEXT.waiting_for_output);
                return;
            }

            ScrollArea::vertical()
                .id_salt(id_salt)
                .max_height(UI_CONFIG.result_max_height)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    if state.failed {
                        ui.label_error(&state.text);
                    } else {
                        match format {
                            ResultFormat::Markdown => show_markdown(ui, &state.text),
                            ResultFormat::Preformatted => show_preformatted(ui, &state.text),
                        }
                    }
                });
        });
}
