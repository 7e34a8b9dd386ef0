use egui::Pos2;

use crate::raster::{RasterBuffer, Snapshot, to_pixel};
use crate::shapes::{self, Pen};
use crate::tools::{ToolKind, ToolState};

/// Transient state of one pointer-down to pointer-up drawing action
#[derive(Debug, Clone)]
pub struct StrokeSession {
    anchor: Pos2,
    /// Where the brush path currently ends
    last_point: Pos2,
    /// Canvas as it was before the stroke began
    snapshot: Snapshot,
}

impl StrokeSession {
    pub fn new(anchor: Pos2, snapshot: Snapshot) -> Self {
        Self {
            anchor,
            last_point: anchor,
            snapshot,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Render the current tool from this session's anchor to `point`.
    ///
    /// Brush and eraser extend the path from the previous point and commit the
    /// segment. Shape tools first restore the pre-stroke snapshot so earlier
    /// preview frames never accumulate.
    pub fn render(&mut self, canvas: &mut RasterBuffer, tools: &ToolState, point: Pos2, background: egui::Color32) {
        let pen = Pen::new(to_pixel(tools.stroke_color(background)), tools.brush_width);

        match tools.tool {
            ToolKind::Brush | ToolKind::Eraser => {
                shapes::line(canvas, self.last_point, point, &pen);
                self.last_point = point;
            }
            ToolKind::Rectangle => {
                canvas.restore_from(&self.snapshot);
                shapes::rectangle(canvas, self.anchor, point, &pen, tools.fill);
            }
            ToolKind::Circle => {
                canvas.restore_from(&self.snapshot);
                let radius = self.anchor.distance(point);
                shapes::circle(canvas, self.anchor, radius, &pen, tools.fill);
            }
            ToolKind::Triangle => {
                canvas.restore_from(&self.snapshot);
                shapes::triangle(canvas, triangle_vertices(self.anchor, point), &pen, tools.fill);
            }
        }
    }
}

/// Isosceles triangle with its apex at `anchor`, one base vertex at `point`
/// and the other mirrored across the vertical line through the anchor.
pub fn triangle_vertices(anchor: Pos2, point: Pos2) -> [Pos2; 3] {
    let mirrored = Pos2::new(anchor.x * 2.0 - point.x, point.y);
    [anchor, point, mirrored]
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    #[test]
    fn test_triangle_vertices_mirror() {
        let [apex, left, right] = triangle_vertices(pos2(50.0, 10.0), pos2(30.0, 60.0));
        assert_eq!(apex, pos2(50.0, 10.0));
        assert_eq!(left, pos2(30.0, 60.0));
        assert_eq!(right, pos2(70.0, 60.0));
    }

    #[test]
    fn test_brush_continues_from_previous_point() {
        let mut canvas = RasterBuffer::new(30, 30, Color32::WHITE);
        let mut session = StrokeSession::new(pos2(1.0, 1.0), canvas.snapshot());
        let tools = ToolState { brush_width: 1, ..ToolState::default() };

        session.render(&mut canvas, &tools, pos2(10.0, 1.0), Color32::WHITE);
        session.render(&mut canvas, &tools, pos2(10.0, 20.0), Color32::WHITE);
        // the first segment stays committed
        assert_eq!(canvas.pixel(5, 1), Some(Color32::BLACK));
        assert_eq!(canvas.pixel(10, 15), Some(Color32::BLACK));
        // the second segment starts at (10, 1), not at the anchor
        assert_eq!(canvas.pixel(5, 10), Some(Color32::WHITE));
    }

    #[test]
    fn test_shape_restores_snapshot_first() {
        let mut canvas = RasterBuffer::new(40, 40, Color32::WHITE);
        let mut session = StrokeSession::new(pos2(5.0, 5.0), canvas.snapshot());
        let tools = ToolState {
            tool: ToolKind::Rectangle,
            brush_width: 1,
            ..ToolState::default()
        };

        session.render(&mut canvas, &tools, pos2(35.0, 35.0), Color32::WHITE);
        assert_eq!(canvas.pixel(35, 20), Some(Color32::BLACK));

        session.render(&mut canvas, &tools, pos2(15.0, 15.0), Color32::WHITE);
        assert_eq!(canvas.pixel(35, 20), Some(Color32::WHITE));
        assert_eq!(canvas.pixel(15, 10), Some(Color32::BLACK));
    }
}
