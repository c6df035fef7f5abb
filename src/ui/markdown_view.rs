//! egui rendering of parsed markdown blocks.

use eframe::egui::text::LayoutJob;
use eframe::egui::{self, Color32, FontId, Frame, Grid, Margin, RichText, TextFormat, TextStyle, Ui};

use crate::report::highlight::{TokenKind, highlight};
use crate::report::markdown::{Block, Span, parse};
use crate::ui::config::UI_CONFIG;

/// Render `text` as markdown. Safe to call with a partial stream.
pub fn show_markdown(ui: &mut Ui, text: &str) {
    for (i, block) in parse(text).iter().enumerate() {
        if i > 0 {
            ui.add_space(4.0);
        }
        show_block(ui, block, i);
    }
}

fn show_block(ui: &mut Ui, block: &Block, index: usize) {
    match block {
        Block::Heading { level, spans } => {
            let size = match level {
                1 => 22.0,
                2 => 19.0,
                3 => 16.0,
                _ => 14.0,
            };
            ui.add_space(4.0);
            ui.label(spans_job(ui, spans, size, Some(UI_CONFIG.colors.heading)));
        }
        Block::Paragraph(spans) => {
            ui.label(spans_job(ui, spans, body_size(ui), None));
        }
        Block::BulletList(items) => {
            for item in items {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("•").color(UI_CONFIG.colors.heading));
                    ui.label(spans_job(ui, item, body_size(ui), None));
                });
            }
        }
        Block::OrderedList { start, items } => {
            for (offset, item) in items.iter().enumerate() {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        RichText::new(format!("{}.", start + offset as u64))
                            .color(UI_CONFIG.colors.heading),
                    );
                    ui.label(spans_job(ui, item, body_size(ui), None));
                });
            }
        }
        Block::Quote(spans) => {
            ui.horizontal(|ui| {
                ui.label(RichText::new("▌").color(UI_CONFIG.colors.subsection_heading));
                ui.label(spans_job(ui, spans, body_size(ui), Some(Color32::GRAY)));
            });
        }
        Block::Code { lang, code } => show_code(ui, lang.as_deref(), code),
        Block::Table { header, rows } => show_table(ui, header, rows, index),
        Block::Rule => {
            ui.separator();
        }
    }
}

fn show_code(ui: &mut Ui, lang: Option<&str>, code: &str) {
    Frame::new()
        .fill(UI_CONFIG.colors.code_background)
        .inner_margin(Margin::symmetric(8, 6))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            if let Some(lang) = lang {
                ui.label(RichText::new(lang).small().monospace().color(Color32::GRAY));
            }
            let size = TextStyle::Monospace.resolve(ui.style()).size;
            ui.label(code_job(lang, code.trim_end_matches('\n'), size));
        });
}

fn code_job(lang: Option<&str>, code: &str, size: f32) -> LayoutJob {
    let colors = &UI_CONFIG.colors;
    let mut job = LayoutJob::default();
    for (kind, piece) in highlight(lang, code) {
        let color = match kind {
            TokenKind::Plain => colors.terminal_text,
            TokenKind::Keyword => colors.code_keyword,
            TokenKind::Literal => colors.code_literal,
            TokenKind::Number => colors.code_number,
            TokenKind::Comment => colors.code_comment,
        };
        job.append(piece, 0.0, TextFormat::simple(FontId::monospace(size), color));
    }
    job
}

fn show_table(ui: &mut Ui, header: &[String], rows: &[Vec<String>], index: usize) {
    Grid::new(("markdown_table", index))
        .striped(true)
        .num_columns(header.len())
        .show(ui, |ui| {
            for cell in header {
                ui.label(RichText::new(cell).monospace().strong());
            }
            ui.end_row();
            for row in rows {
                for cell in row {
                    ui.label(RichText::new(cell).monospace());
                }
                ui.end_row();
            }
        });
}

fn body_size(ui: &Ui) -> f32 {
    TextStyle::Body.resolve(ui.style()).size
}

fn spans_job(ui: &Ui, spans: &[Span], size: f32, color: Option<Color32>) -> LayoutJob {
    let visuals = ui.visuals();
    let base = color.unwrap_or(visuals.text_color());
    let mut job = LayoutJob::default();
    job.wrap.max_width = ui.available_width();

    for span in spans {
        let format = match span {
            Span::Text(_) => TextFormat {
                font_id: FontId::proportional(size),
                color: base,
                ..Default::default()
            },
            Span::Bold(_) => TextFormat {
                font_id: FontId::proportional(size),
                color: color.unwrap_or(visuals.strong_text_color()),
                ..Default::default()
            },
            Span::Italic(_) => TextFormat {
                font_id: FontId::proportional(size),
                color: base,
                italics: true,
                ..Default::default()
            },
            Span::Code(_) => TextFormat {
                font_id: FontId::monospace(size * 0.9),
                color: UI_CONFIG.colors.terminal_text,
                background: visuals.code_bg_color,
                ..Default::default()
            },
        };
        job.append(span.as_str(), 0.0, format);
    }
    job
}

/// Monospace block for fixed-width reports
pub fn show_preformatted(ui: &mut Ui, text: &str) {
    ui.add(
        egui::Label::new(
            RichText::new(text)
                .monospace()
                .color(UI_CONFIG.colors.terminal_text),
        )
        .wrap_mode(egui::TextWrapMode::Extend),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_code_block_is_colored_by_token() {
        let job = code_job(Some("json"), "{\"fee\": 0.3, \"active\": true}", 13.0);
        let mut colors: Vec<Color32> = job.sections.iter().map(|s| s.format.color).collect();
        colors.sort_by_key(|c| c.to_array());
        colors.dedup();

        assert!(colors.len() > 1);
        assert!(colors.contains(&UI_CONFIG.colors.code_literal));
        assert!(colors.contains(&UI_CONFIG.colors.code_number));
        assert_eq!(job.text, "{\"fee\": 0.3, \"active\": true}");
    }
}
