mod commands;
mod history;

use crate::canvas::Canvas;
use crate::error::CanvasError;
use crate::session::ToolSession;

pub use commands::{Command, CommandOutcome};
pub use history::{FULL_HISTORY_CAPACITY, HistoryManager, SIMPLE_HISTORY_CAPACITY};

/// Result type for command operations
pub type CommandResult = Result<CommandOutcome, CanvasError>;

/// Everything a command may touch.
pub struct CommandContext<'a> {
    pub canvas: &'a mut Canvas,
    pub session: &'a mut ToolSession,
}

impl<'a> CommandContext<'a> {
    pub fn new(canvas: &'a mut Canvas, session: &'a mut ToolSession) -> Self {
        Self { canvas, session }
    }
}
