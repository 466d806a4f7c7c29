use crate::PaintApp;
use crate::color::Color;
use crate::command::Command;
use crate::components::ToolButton;
use crate::export::ExportFormat;
use crate::session::BrushSize;
use crate::tools::{ShapeStyle, ToolKind};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.session().tool;
            let mut selected = None;
            egui::Grid::new("tool_grid").spacing([4.0, 4.0]).show(ui, |ui| {
                for (i, tool) in ToolKind::ALL.into_iter().enumerate() {
                    if ToolButton::new(tool, tool == active).show(ui).clicked() {
                        selected = Some(tool);
                    }
                    if i % 4 == 3 {
                        ui.end_row();
                    }
                }
            });
            if let Some(tool) = selected {
                log::info!("Tool selected from UI: {}", tool.name());
                app.execute(Command::SelectTool(tool));
            }
            ui.separator();

            let mut rgb = [app.session().color.r, app.session().color.g, app.session().color.b];
            ui.horizontal(|ui| {
                ui.label("Color");
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    app.execute(Command::SetColor(Color::rgb(rgb[0], rgb[1], rgb[2])));
                }
            });

            let mut size = app.session().size.get();
            if ui
                .add(egui::Slider::new(&mut size, BrushSize::MIN..=BrushSize::MAX).text("Size"))
                .changed()
            {
                app.execute(Command::SetSize(size));
            }

            let mut style = app.session().shape_style;
            ui.horizontal(|ui| {
                ui.selectable_value(&mut style, ShapeStyle::Fill, "Fill");
                ui.selectable_value(&mut style, ShapeStyle::Stroke, "Stroke");
            });
            if style != app.session().shape_style {
                app.execute(Command::SetShapeStyle(style));
            }
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.canvas().can_undo();
                let can_redo = app.canvas().can_redo();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.execute(Command::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.execute(Command::Redo);
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    app.execute(Command::Clear);
                }
                if ui.button("New").clicked() {
                    app.execute(Command::NewPicture);
                }
            });

            let history = app.canvas().history();
            ui.label(format!(
                "History {}/{} ({} KiB)",
                history.len(),
                history.capacity(),
                history.memory_bytes() / 1024
            ));
            ui.separator();

            ui.heading("Save");
            egui::ComboBox::from_id_salt("export_format")
                .selected_text(app.export_format.extension())
                .show_ui(ui, |ui| {
                    for format in ExportFormat::ALL {
                        ui.selectable_value(&mut app.export_format, format, format.extension());
                    }
                });
            if app.export_format == ExportFormat::Jpeg {
                ui.add(egui::Slider::new(&mut app.export_quality, 0.1..=1.0).text("Quality"));
            }
            if ui.button("Save").clicked() {
                app.execute(Command::Save(app.export_format));
            }
            ui.small("Drop an image onto the window to use it as a template.");
        });
}
