use egui::Pos2;
use image::{DynamicImage, RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::command::{FULL_HISTORY_CAPACITY, HistoryManager};
use crate::engine::{EngineOutcome, ToolEngine};
use crate::error::{CanvasError, CanvasResult};
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::pixel_buffer::{PixelBuffer, Snapshot};
use crate::session::ToolSession;
use crate::state::InteractionState;

/// Size and history bound of a drawing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub history_capacity: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            history_capacity: FULL_HISTORY_CAPACITY,
        }
    }
}

/// The drawing surface: one pixel buffer, its snapshot history and the
/// interaction engine, plus an event bus for observers.
///
/// A blank checkpoint is taken on construction so the first stroke can be undone.
#[derive(Debug)]
pub struct Canvas {
    buffer: PixelBuffer,
    history: HistoryManager,
    engine: ToolEngine,
    events: EventBus,
    /// Bumped whenever the buffer changes so views know to re-upload it.
    revision: u64,
}

impl Canvas {
    pub fn new(config: &CanvasConfig) -> CanvasResult<Self> {
        Self::with_engine(config, ToolEngine::new())
    }

    /// A canvas whose spray output is reproducible.
    pub fn with_seed(config: &CanvasConfig, seed: u64) -> CanvasResult<Self> {
        Self::with_engine(config, ToolEngine::with_seed(seed))
    }

    pub fn with_engine(config: &CanvasConfig, engine: ToolEngine) -> CanvasResult<Self> {
        let buffer = PixelBuffer::new(config.width, config.height)?;
        let mut history = HistoryManager::new(config.history_capacity);
        history.checkpoint(&buffer);
        log::info!(
            "Created {}x{} canvas with {} history slots",
            config.width,
            config.height,
            history.capacity()
        );
        Ok(Self {
            buffer,
            history,
            engine,
            events: EventBus::new(),
            revision: 0,
        })
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn state(&self) -> &InteractionState {
        self.engine.state()
    }

    pub fn size(&self) -> (u32, u32) {
        self.buffer.size()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn pointer_down(&mut self, session: &ToolSession, pos: Pos2) {
        let outcome = self
            .engine
            .pointer_down(session, pos, &mut self.buffer, &mut self.history);
        self.handle_outcome(outcome);
    }

    pub fn pointer_move(&mut self, session: &ToolSession, pos: Pos2) {
        let outcome = self
            .engine
            .pointer_move(session, pos, &mut self.buffer, &self.history);
        self.handle_outcome(outcome);
    }

    pub fn pointer_up(&mut self) {
        let outcome = self.engine.pointer_up(&self.buffer, &mut self.history);
        self.handle_outcome(outcome);
    }

    /// Leaving the surface ends the interaction exactly like releasing the pointer.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Abandons the active interaction or text entry.
    pub fn cancel(&mut self) {
        let outcome = self.engine.cancel(&mut self.buffer, &self.history);
        self.handle_outcome(outcome);
    }

    pub fn text_input(&mut self, text: &str) {
        self.engine.text_input(text);
    }

    pub fn text_backspace(&mut self) {
        self.engine.text_backspace();
    }

    pub fn commit_text(&mut self, session: &ToolSession) {
        let outcome = self
            .engine
            .commit_text(session, &mut self.buffer, &mut self.history);
        self.handle_outcome(outcome);
    }

    /// Records the current buffer as a new history entry.
    pub fn checkpoint(&mut self) {
        self.history.checkpoint(&self.buffer);
        self.emit_history();
    }

    /// Steps back one snapshot. Returns `false` at the oldest entry.
    pub fn undo(&mut self) -> bool {
        self.abandon_interaction();
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.restore(&snapshot)
    }

    /// Steps forward one snapshot. Returns `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        self.abandon_interaction();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.restore(&snapshot)
    }

    /// Wipes the buffer to transparent and checkpoints the blank frame.
    pub fn clear(&mut self) {
        self.abandon_interaction();
        self.buffer.clear(Color::TRANSPARENT);
        self.touch();
        self.events.emit(CanvasEvent::Cleared);
        self.checkpoint();
    }

    /// Changes the surface size, keeping pixels anchored at the top-left corner.
    ///
    /// History is reset because older snapshots no longer match the dimensions.
    pub fn resize(&mut self, width: u32, height: u32) -> CanvasResult<()> {
        if (width, height) == self.size() {
            return Ok(());
        }
        let resized = self.buffer.resized(width, height)?;
        self.abandon_interaction();
        self.buffer = resized;
        self.reset_history();
        log::info!("Canvas resized to {}x{}", width, height);
        self.events.emit(CanvasEvent::Resized { width, height });
        Ok(())
    }

    /// Starts over from a blank surface with a fresh history.
    pub fn new_picture(&mut self) {
        self.abandon_interaction();
        self.buffer.clear(Color::TRANSPARENT);
        self.reset_history();
        self.events.emit(CanvasEvent::Cleared);
    }

    /// Replaces the picture with `template`, scaled to fit and centered, and
    /// starts a fresh history from it.
    pub fn load_template(&mut self, template: &DynamicImage) -> CanvasResult<()> {
        let (width, height) = self.size();
        let source = template.to_rgba8();
        let (tw, th) = source.dimensions();
        if tw == 0 || th == 0 {
            return Err(CanvasError::InvalidDimensions { width: tw, height: th });
        }

        let scale = (width as f32 / tw as f32).min(height as f32 / th as f32);
        let fit_w = ((tw as f32 * scale).round() as u32).clamp(1, width);
        let fit_h = ((th as f32 * scale).round() as u32).clamp(1, height);
        let scaled = imageops::resize(&source, fit_w, fit_h, imageops::FilterType::Triangle);

        let mut frame = RgbaImage::new(width, height);
        let x = i64::from((width - fit_w) / 2);
        let y = i64::from((height - fit_h) / 2);
        imageops::replace(&mut frame, &scaled, x, y);

        self.abandon_interaction();
        self.buffer = PixelBuffer::from_image(frame)?;
        self.reset_history();
        log::info!("Loaded {}x{} template as {}x{}", tw, th, fit_w, fit_h);
        self.events.emit(CanvasEvent::TemplateLoaded {
            width: tw,
            height: th,
        });
        Ok(())
    }

    /// Copy of the committed frame (any live preview included).
    pub fn export_frame(&self) -> RgbaImage {
        self.buffer.export_frame()
    }

    fn reset_history(&mut self) {
        self.history.clear();
        self.checkpoint();
        self.touch();
    }

    fn abandon_interaction(&mut self) {
        if !self.engine.is_idle() {
            self.cancel();
        }
    }

    fn restore(&mut self, snapshot: &Snapshot) -> bool {
        if let Err(err) = self.buffer.restore(snapshot) {
            log::error!("Cannot restore snapshot: {}", err);
            return false;
        }
        self.touch();
        self.emit_history();
        true
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn emit_history(&self) {
        self.events.emit(CanvasEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }

    fn handle_outcome(&mut self, outcome: EngineOutcome) {
        match outcome {
            EngineOutcome::Ignored | EngineOutcome::Started(_) | EngineOutcome::Finished(_) => {}
            EngineOutcome::Updated => self.touch(),
            EngineOutcome::Committed(tool) => {
                self.touch();
                self.events.emit(CanvasEvent::InteractionCommitted { tool });
                self.emit_history();
            }
            EngineOutcome::Cancelled(tool) => {
                self.touch();
                self.events.emit(CanvasEvent::InteractionCancelled { tool });
            }
            EngineOutcome::TextEntryOpened(at) => {
                self.events.emit(CanvasEvent::TextEntryOpened { at });
            }
            EngineOutcome::TextEntryClosed { committed } => {
                if committed {
                    self.touch();
                }
                self.events.emit(CanvasEvent::TextEntryClosed { committed });
                if committed {
                    self.emit_history();
                }
            }
        }
    }
}
