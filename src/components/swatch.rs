use eframe::egui;

/// A clickable color square for the swatch palette
pub struct Swatch {
    pub color: egui::Color32,
    pub selected: bool,
}

impl Swatch {
    pub fn new(color: egui::Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let size = egui::vec2(22.0, 22.0);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(rect, 11.0, self.color);

            // Thin outline so white stays visible on light themes
            let outline = if response.hovered() {
                egui::Color32::from_gray(140)
            } else {
                egui::Color32::from_gray(90)
            };
            ui.painter().rect_stroke(rect, 11.0, egui::Stroke::new(1.0, outline));

            if self.selected {
                ui.painter().rect_stroke(
                    rect.expand(3.0),
                    14.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response
    }
}
