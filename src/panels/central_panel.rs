use egui::{Color32, Rect, pos2};

use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_size = {
            let canvas = app.ensure_engine(ui.available_size()).canvas();
            egui::vec2(canvas.width() as f32, canvas.height() as f32)
        };

        let (response, painter) = ui.allocate_painter(canvas_size, egui::Sense::drag());

        // Feed pointer input to the engine before drawing so this frame shows it
        let pointer = app.pointer_mut();
        pointer.set_canvas_rect(response.rect);
        let events = pointer.process_input(ctx);
        if let Some(engine) = app.engine_mut() {
            for event in events {
                engine.handle_pointer(event);
            }
        }

        if let Some(texture_id) = app.canvas_texture(ctx) {
            painter.image(
                texture_id,
                response.rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    });
}
