use crate::PaintApp;
use crate::components::swatch::Swatch;
use crate::tools::{PALETTE, ToolKind};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(190.0)
        .show(ctx, |ui| {
            let mut tools = app.tool_state().clone();

            ui.heading("Shapes");
            for tool in ToolKind::ALL.into_iter().filter(ToolKind::is_shape) {
                ui.selectable_value(&mut tools.tool, tool, tool.label());
            }
            ui.add_enabled(
                tools.tool.supports_fill(),
                egui::Checkbox::new(&mut tools.fill, "Fill color"),
            );
            ui.separator();

            ui.heading("Options");
            for tool in ToolKind::ALL.into_iter().filter(|tool| !tool.is_shape()) {
                ui.selectable_value(&mut tools.tool, tool, tool.label());
            }
            ui.horizontal(|ui| {
                ui.label("Size:");
                let range = app.config().min_brush_width..=app.config().max_brush_width;
                ui.add(egui::Slider::new(&mut tools.brush_width, range));
            });
            ui.separator();

            ui.heading("Colors");
            ui.horizontal(|ui| {
                for color in PALETTE {
                    if Swatch::new(color, tools.color == color).show(ui).clicked() {
                        tools.color = color;
                    }
                }
                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut tools.color,
                    egui::color_picker::Alpha::Opaque,
                );
            });

            if &tools != app.tool_state() {
                app.apply_tools(tools);
            }
            ui.separator();

            let has_canvas = app.engine().is_some();
            let can_undo = app.engine().is_some_and(|engine| engine.can_undo());
            let can_redo = app.engine().is_some_and(|engine| engine.can_redo());

            ui.horizontal(|ui| {
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            if let Some(engine) = app.engine() {
                ui.horizontal(|ui| {
                    ui.label(format!("Undo stack size: {}", engine.undo_depth()));
                    ui.label(format!("Redo stack size: {}", engine.redo_depth()));
                });
            }
            ui.separator();

            ui.horizontal(|ui| {
                if ui.add_enabled(has_canvas, egui::Button::new("Clear Canvas")).clicked() {
                    app.clear();
                }
                if ui.add_enabled(has_canvas, egui::Button::new("Save As Image")).clicked() {
                    app.save_image();
                }
            });

            if let Some(status) = app.status() {
                ui.label(status);
            }
        });
}
