use egui::{Color32, Pos2, Rect, Sense};

use crate::PaintApp;
use crate::tools::TextStamper;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(Color32::from_gray(60)))
        .show(ctx, |ui| {
            let (width, height) = app.canvas().size();
            let size = egui::vec2(width as f32, height as f32);

            egui::ScrollArea::both().show(ui, |ui| {
                let (canvas_rect, _response) = ui.allocate_exact_size(size, Sense::click_and_drag());

                app.handle_canvas_input(ctx, canvas_rect);

                // Transparent pixels show the page behind the canvas.
                let painter = ui.painter_at(canvas_rect);
                painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
                let texture = app.texture_id(ctx);
                painter.image(
                    texture,
                    canvas_rect,
                    Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );

                if let Some(entry) = app.canvas().state().text_entry() {
                    let session = app.session();
                    let at = canvas_rect.min + entry.at.to_vec2();
                    let font = egui::FontId::proportional(TextStamper::font_px(session));
                    let caret = if (ctx.input(|i| i.time) * 2.0) as i64 % 2 == 0 { "|" } else { " " };
                    painter.text(
                        at,
                        egui::Align2::LEFT_BOTTOM,
                        format!("{}{}", entry.text, caret),
                        font,
                        Color32::from(session.color),
                    );
                    ctx.request_repaint_after(std::time::Duration::from_millis(500));
                }
            });
        });
}

pub fn status_bar(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let (width, height) = app.canvas().size();
            let session = app.session();
            ui.label(format!(
                "{}  size {}  {}  {}x{}",
                session.tool.name(),
                session.size.get(),
                session.color.to_hex(),
                width,
                height
            ));
            ui.separator();
            ui.label(app.canvas().state().name());
            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
    });
}
