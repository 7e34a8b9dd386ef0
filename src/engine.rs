//! The drawing surface: one live canvas, the tool settings that paint into
//! it, the stroke in progress and the undo/redo history.
//!
//! Every operation is synchronous and infallible. Empty history and stray
//! pointer events are ordinary no-ops.

use egui::{Color32, Pos2};

use crate::config::PaintConfig;
use crate::error::ExportResult;
use crate::export::{self, ExportFormat, ExportedImage};
use crate::history::History;
use crate::input::PointerEvent;
use crate::raster::RasterBuffer;
use crate::stroke::StrokeSession;
use crate::tools::{ToolKind, ToolState};
use crate::util::time;

#[derive(Debug)]
pub struct DrawingEngine {
    canvas: RasterBuffer,
    tools: ToolState,
    history: History,
    session: Option<StrokeSession>,
    background: Color32,
    config: PaintConfig,
    /// Bumped on every canvas mutation
    revision: u64,
}

impl DrawingEngine {
    /// Create an engine with a canvas of the given size, filled with the
    /// configured background.
    pub fn new(width: u32, height: u32, config: &PaintConfig) -> Self {
        let background = config.background_color();
        log::debug!("Creating {}x{} canvas", width, height);
        Self {
            canvas: RasterBuffer::new(width, height, background),
            tools: ToolState::from_config(config),
            history: History::with_limit(config.history_limit),
            session: None,
            background,
            config: config.clone(),
            revision: 0,
        }
    }

    // --- Stroke rendering ---

    /// Start a stroke at `pos`. The current canvas is recorded for undo and
    /// the redo history is discarded.
    ///
    /// A stroke that was never ended is ended first.
    pub fn begin_stroke(&mut self, pos: Pos2) {
        if self.session.is_some() {
            log::warn!("Stroke began while another was active; ending the previous stroke");
            self.end_stroke();
        }

        let snapshot = self.canvas.snapshot();
        self.history.record(snapshot.clone());
        self.session = Some(StrokeSession::new(pos, snapshot));
        log::debug!("Begin {} stroke at {:?}", self.tools.tool.name(), pos);
    }

    /// Draw the current tool from the stroke anchor to `pos`. Does nothing
    /// when no stroke is active.
    pub fn continue_stroke(&mut self, pos: Pos2) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.render(&mut self.canvas, &self.tools, pos, self.background);
        self.revision += 1;
    }

    /// Finish the active stroke, leaving the canvas as last drawn
    pub fn end_stroke(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        // changed_bounds scans the whole canvas
        if log::log_enabled!(log::Level::Debug) {
            match self.canvas.changed_bounds(session.snapshot()) {
                Some(bounds) => log::debug!("End stroke, changed {:?}", bounds),
                None => log::debug!("End stroke, canvas unchanged"),
            }
        }
    }

    pub fn is_stroke_active(&self) -> bool {
        self.session.is_some()
    }

    /// Dispatch a translated pointer event
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(pos) => self.begin_stroke(pos),
            PointerEvent::Move(pos) => self.continue_stroke(pos),
            PointerEvent::Up => self.end_stroke(),
        }
    }

    // --- History ---

    /// Step back one stroke. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        let changed = self.history.undo(&mut self.canvas);
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Re-apply the last undone stroke. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.end_stroke();
        let changed = self.history.redo(&mut self.canvas);
        if changed {
            self.revision += 1;
        }
        changed
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // --- Canvas lifecycle ---

    /// Fill the whole canvas with the background color
    pub fn reset_background(&mut self) {
        self.canvas.fill(self.background);
        self.revision += 1;
    }

    /// Erase everything. Clearing is not recorded in the history.
    pub fn clear(&mut self) {
        self.end_stroke();
        self.reset_background();
        log::info!("Canvas cleared");
    }

    // --- Tool state ---

    pub fn tool_state(&self) -> &ToolState {
        &self.tools
    }

    /// Replace all tool settings at once, e.g. when restoring saved settings.
    /// The width is clamped into the configured range.
    pub fn set_tool_state(&mut self, tools: ToolState) {
        self.tools = tools;
        self.tools.brush_width = self.config.clamp_width(self.tools.brush_width);
    }

    pub fn select_tool(&mut self, tool: ToolKind) {
        if self.tools.tool != tool {
            log::info!("Tool selected: {}", tool.name());
            self.tools.tool = tool;
        }
    }

    pub fn set_brush_width(&mut self, width: u32) {
        self.tools.brush_width = self.config.clamp_width(width);
    }

    pub fn set_color(&mut self, color: Color32) {
        self.tools.color = color;
    }

    pub fn set_fill(&mut self, fill: bool) {
        self.tools.fill = fill;
    }

    // --- Canvas access & export ---

    pub fn canvas(&self) -> &RasterBuffer {
        &self.canvas
    }

    /// Changes whenever the canvas pixels may have changed
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Encode the current canvas, named after the current time
    pub fn export(&self, format: ExportFormat) -> ExportResult<ExportedImage> {
        export::encode(&self.canvas, format, time::timestamp_millis())
    }
}
