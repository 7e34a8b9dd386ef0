use egui::{Rect, TextureHandle, TextureId, TextureOptions, Vec2};

use crate::config::PaintConfig;
use crate::engine::DrawingEngine;
use crate::export::ExportSink;
use crate::input::PointerTracker;
use crate::panels::{central_panel, tools_panel};
use crate::tools::ToolState;

/// Storage key for the persisted tool settings
const TOOLS_KEY: &str = "sketch_board_tools";

pub struct PaintApp {
    config: PaintConfig,
    /// Created at the first frame, sized to the central panel
    engine: Option<DrawingEngine>,
    /// Tool settings used until the engine exists
    saved_tools: ToolState,
    pointer: PointerTracker,
    canvas_texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    sink: Box<dyn ExportSink>,
    /// Last export outcome, shown in the tools panel
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: PaintConfig) -> Self {
        let mut app = Self::with_config(config);
        if let Some(tools) = cc
            .storage
            .and_then(|storage| eframe::get_value::<ToolState>(storage, TOOLS_KEY))
        {
            log::debug!("Restored tool settings: {:?}", tools);
            app.saved_tools = tools;
        }
        app
    }

    /// Build the app without any persisted state
    pub fn with_config(config: PaintConfig) -> Self {
        Self {
            saved_tools: ToolState::from_config(&config),
            sink: default_sink(&config),
            config,
            engine: None,
            pointer: PointerTracker::new(Rect::NOTHING),
            canvas_texture: None,
            uploaded_revision: None,
            status: None,
        }
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn engine(&self) -> Option<&DrawingEngine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut DrawingEngine> {
        self.engine.as_mut()
    }

    /// Create the engine the first time the canvas area is known. Later
    /// layout changes do not resize the canvas.
    pub fn ensure_engine(&mut self, available: Vec2) -> &mut DrawingEngine {
        let config = &self.config;
        let saved_tools = &self.saved_tools;
        self.engine.get_or_insert_with(|| {
            let width = available.x.floor().max(1.0) as u32;
            let height = available.y.floor().max(1.0) as u32;
            let mut engine = DrawingEngine::new(width, height, config);
            engine.set_tool_state(saved_tools.clone());
            engine
        })
    }

    /// Current tool settings, whether or not the engine exists yet
    pub fn tool_state(&self) -> &ToolState {
        match &self.engine {
            Some(engine) => engine.tool_state(),
            None => &self.saved_tools,
        }
    }

    /// Apply settings edited in the tools panel
    pub(crate) fn apply_tools(&mut self, tools: ToolState) {
        let Some(engine) = self.engine.as_mut() else {
            self.saved_tools = tools;
            return;
        };
        engine.select_tool(tools.tool);
        engine.set_brush_width(tools.brush_width);
        engine.set_color(tools.color);
        engine.set_fill(tools.fill);
    }

    pub(crate) fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }

    pub(crate) fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn undo(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.undo();
        }
    }

    pub fn redo(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.redo();
        }
    }

    pub fn clear(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.clear();
        }
    }

    /// Encode the canvas and hand it to the export sink
    pub fn save_image(&mut self) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };

        let result = engine.export(self.config.export_format).and_then(|image| {
            self.sink.deliver(&image)?;
            Ok(image.file_name)
        });

        self.status = Some(match result {
            Ok(file_name) => format!("Saved {}", file_name),
            Err(err) => {
                log::error!("Export failed: {}", err);
                format!("Export failed: {}", err)
            }
        });
    }

    /// Texture showing the current canvas, re-uploaded when the canvas changed
    pub(crate) fn canvas_texture(&mut self, ctx: &egui::Context) -> Option<TextureId> {
        let engine = self.engine.as_ref()?;
        let revision = engine.revision();

        if let Some(texture) = self.canvas_texture.as_mut() {
            if self.uploaded_revision != Some(revision) {
                texture.set(engine.canvas().to_color_image(), TextureOptions::NEAREST);
            }
        } else {
            self.canvas_texture =
                Some(ctx.load_texture("canvas", engine.canvas().to_color_image(), TextureOptions::NEAREST));
        }
        self.uploaded_revision = Some(revision);

        self.canvas_texture.as_ref().map(|texture| texture.id())
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::{Key, Modifiers};

        let (undo, redo) = ctx.input_mut(|input| {
            // Check the shifted chord first; consume_key ignores extra shift
            let redo = input.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || input.consume_key(Modifiers::COMMAND, Key::Y);
            let undo = input.consume_key(Modifiers::COMMAND, Key::Z);
            (undo, redo)
        });

        if redo {
            self.redo();
        }
        if undo {
            self.undo();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_sink(config: &PaintConfig) -> Box<dyn ExportSink> {
    Box::new(crate::export::DirectorySink::new(config.export_dir.clone()))
}

#[cfg(target_arch = "wasm32")]
fn default_sink(_config: &PaintConfig) -> Box<dyn ExportSink> {
    Box::new(crate::export::BrowserDownload)
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, TOOLS_KEY, self.tool_state());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;
    use egui::vec2;

    #[test]
    fn test_engine_created_once_from_layout() {
        let mut app = PaintApp::with_config(PaintConfig::default());
        assert!(app.engine().is_none());

        app.ensure_engine(vec2(320.7, 240.2));
        let engine = app.engine().unwrap();
        assert_eq!((engine.canvas().width(), engine.canvas().height()), (320, 240));

        app.ensure_engine(vec2(800.0, 600.0));
        assert_eq!(app.engine().unwrap().canvas().width(), 320);
    }

    #[test]
    fn test_tools_edited_before_engine_carry_over() {
        let mut app = PaintApp::with_config(PaintConfig::default());
        let mut tools = app.tool_state().clone();
        tools.tool = ToolKind::Circle;
        tools.fill = true;
        app.apply_tools(tools);

        app.ensure_engine(vec2(50.0, 50.0));
        let state = app.engine().unwrap().tool_state();
        assert_eq!(state.tool, ToolKind::Circle);
        assert!(state.fill);
    }

    #[test]
    fn test_buttons_without_engine_do_nothing() {
        let mut app = PaintApp::with_config(PaintConfig::default());
        app.undo();
        app.redo();
        app.clear();
        app.save_image();
        assert!(app.status().is_none());
    }
}
