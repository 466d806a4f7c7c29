#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod color;
pub mod command;
pub mod components;
pub mod engine;
pub mod error;
pub mod event;
pub mod export;
pub mod fill;
pub mod input;
pub mod panels;
pub mod pixel_buffer;
pub mod renderer;
pub mod session;
pub mod state;
pub mod stroke;
pub mod texture_manager;
pub mod tools;

pub use app::PaintApp;
pub use canvas::{Canvas, CanvasConfig};
pub use color::Color;
pub use command::{Command, CommandOutcome, HistoryManager};
pub use engine::ToolEngine;
pub use error::{CanvasError, CanvasResult};
pub use event::{CanvasEvent, EventBus, EventHandler, EventLog};
pub use export::ExportFormat;
pub use fill::{FillOptions, flood_fill};
pub use input::{InputEvent, InputHandler};
pub use pixel_buffer::{PixelBuffer, Snapshot};
pub use renderer::Renderer;
pub use session::{BrushSize, ToolSession};
pub use state::Settings;
pub use tools::{ShapeStyle, ToolKind};
