#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod panels;
pub mod raster;
pub mod shapes;
pub mod stroke;
pub mod tools;
pub mod util;

pub use app::PaintApp;
pub use config::PaintConfig;
pub use engine::DrawingEngine;
pub use error::{ConfigError, ExportError};
pub use export::{ExportFormat, ExportSink, ExportedImage};
pub use history::History;
pub use input::{PointerEvent, PointerTracker};
pub use raster::{RasterBuffer, Snapshot};
pub use stroke::StrokeSession;
pub use tools::{ToolKind, ToolState};
