use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::config::PaintConfig;

/// The fixed set of drawing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Triangle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Triangle => "Triangle",
        }
    }

    /// Button label shown in the tools panel
    pub fn label(&self) -> &'static str {
        match self {
            Self::Brush => "🖌 Brush",
            Self::Eraser => "⌫ Eraser",
            Self::Rectangle => "▭ Rectangle",
            Self::Circle => "◯ Circle",
            Self::Triangle => "△ Triangle",
        }
    }

    /// Shape tools redraw from the stroke snapshot on every move; brush and
    /// eraser extend a path instead.
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Rectangle | Self::Circle | Self::Triangle)
    }

    /// Whether the fill toggle affects this tool
    pub fn supports_fill(&self) -> bool {
        self.is_shape()
    }
}

/// Swatches offered next to the free-form color picker
pub const PALETTE: [Color32; 5] = [
    Color32::from_rgb(0xff, 0xff, 0xff),
    Color32::from_rgb(0x00, 0x00, 0x00),
    Color32::from_rgb(0xe0, 0x20, 0x20),
    Color32::from_rgb(0x6b, 0xcb, 0x77),
    Color32::from_rgb(0x4d, 0x96, 0xff),
];

/// Everything the UI controls that affects how the next stroke is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    pub tool: ToolKind,
    pub brush_width: u32,
    pub color: Color32,
    /// Paint shapes solid instead of as outlines
    pub fill: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::from_config(&PaintConfig::default())
    }
}

impl ToolState {
    pub fn from_config(config: &PaintConfig) -> Self {
        Self {
            tool: ToolKind::Brush,
            brush_width: config.default_brush_width,
            color: config.default_color(),
            fill: false,
        }
    }

    /// Color the current tool paints with. The eraser paints the background.
    pub fn stroke_color(&self, background: Color32) -> Color32 {
        match self.tool {
            ToolKind::Eraser => background,
            _ => self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eraser_paints_background() {
        let mut state = ToolState::default();
        state.color = Color32::RED;
        assert_eq!(state.stroke_color(Color32::WHITE), Color32::RED);

        state.tool = ToolKind::Eraser;
        assert_eq!(state.stroke_color(Color32::WHITE), Color32::WHITE);
    }

    #[test]
    fn test_default_matches_config() {
        let state = ToolState::default();
        assert_eq!(state.tool, ToolKind::Brush);
        assert_eq!(state.brush_width, 5);
        assert_eq!(state.color, Color32::BLACK);
        assert!(!state.fill);
    }

    #[test]
    fn test_only_shapes_fill() {
        assert!(ToolKind::Rectangle.supports_fill());
        assert!(!ToolKind::Brush.supports_fill());
        assert!(!ToolKind::Eraser.is_shape());
    }
}
