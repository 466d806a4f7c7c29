use egui::{Color32, Response, Sense, Ui};

use crate::tools::ToolKind;

/// Glyph drawn on a tool's button.
pub fn icon(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::Pencil => "✏",
        ToolKind::Brush => "🖌",
        ToolKind::Marker => "🖍",
        ToolKind::Eraser => "⌫",
        ToolKind::Spray => "💨",
        ToolKind::Bucket => "🪣",
        ToolKind::Text => "T",
        ToolKind::Rectangle => "⬛",
        ToolKind::Circle => "⚫",
        ToolKind::Line => "╱",
        ToolKind::Arrow => "➡",
    }
}

pub struct ToolButton {
    pub tool: ToolKind,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: ToolKind, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let button_size = egui::vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, Sense::click());
        let response = response.on_hover_text(format!(
            "{} ({})",
            self.tool.name(),
            self.tool.shortcut().to_ascii_uppercase()
        ));

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                Color32::from_rgb(100, 181, 246) // Light blue when selected
            } else if response.hovered() {
                Color32::from_gray(40)
            } else {
                Color32::from_gray(30)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                Color32::BLACK
            } else {
                Color32::WHITE
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                icon(self.tool),
                egui::FontId::proportional(20.0),
                text_color,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response
    }
}
