use eframe::egui::{Color32, RichText, Ui};

use crate::ui::config::UI_CONFIG;

/// Semantic text styles for the terminal look, available on any `egui::Ui`.
pub trait UiStyleExt {
    /// Small gray caption
    fn label_subdued(&mut self, text: impl Into<String>);

    /// `label: value` with the value in `color`
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    fn label_header(&mut self, text: impl Into<String>);

    fn label_error(&mut self, text: impl Into<String>);

    fn label_warning(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.label));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().monospace().color(color));
        });
    }

    fn label_header(&mut self, text: impl Into<String>) {
        self.label(
            RichText::new(String::from(text.into()).to_uppercase())
                .monospace()
                .strong()
                .color(UI_CONFIG.colors.heading),
        );
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(
            RichText::new(text)
                .monospace()
                .color(UI_CONFIG.colors.error),
        );
    }

    fn label_warning(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().strong().color(UI_CONFIG.colors.warning));
    }
}
