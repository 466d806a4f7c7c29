use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandResult};
use crate::color::Color;
use crate::event::CanvasEvent;
use crate::export::ExportFormat;
use crate::tools::{ShapeStyle, ToolKind};

/// Discrete actions from buttons and keyboard shortcuts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Change the active tool
    SelectTool(ToolKind),

    SetColor(Color),

    /// Set the brush size, clamped into range
    SetSize(u32),

    /// Grow or shrink the brush size by a step, clamped into range
    AdjustSize(i32),

    SetShapeStyle(ShapeStyle),

    Undo,
    Redo,

    /// Clear the whole canvas to transparent
    Clear,

    /// Abandon the active interaction or text entry
    Cancel,

    /// Start over with a blank canvas and fresh history
    NewPicture,

    Resize { width: u32, height: u32 },

    /// Ask the caller to save the current frame
    Save(ExportFormat),
}

/// What executing a command produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// Nothing to do (e.g. undo at the oldest snapshot)
    Ignored,
    /// The caller should encode and store the frame
    SaveRequested(ExportFormat),
}

impl Command {
    /// Execute the command with the given context
    pub fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        let outcome = match self {
            Command::SelectTool(tool) => {
                let old = ctx.session.tool;
                if old == *tool {
                    return Ok(CommandOutcome::Ignored);
                }
                ctx.session.tool = *tool;
                ctx.canvas.events().emit(CanvasEvent::ToolChanged { old, new: *tool });
                CommandOutcome::Applied
            }

            Command::SetColor(color) => {
                ctx.session.color = *color;
                CommandOutcome::Applied
            }

            Command::SetSize(size) => {
                ctx.session.set_size_clamped(i64::from(*size));
                CommandOutcome::Applied
            }

            Command::AdjustSize(delta) => {
                let old = ctx.session.size;
                ctx.session.size = old.step(*delta);
                if ctx.session.size == old {
                    CommandOutcome::Ignored
                } else {
                    CommandOutcome::Applied
                }
            }

            Command::SetShapeStyle(style) => {
                ctx.session.shape_style = *style;
                CommandOutcome::Applied
            }

            Command::Undo => applied_if(ctx.canvas.undo()),

            Command::Redo => applied_if(ctx.canvas.redo()),

            Command::Clear => {
                ctx.canvas.clear();
                CommandOutcome::Applied
            }

            Command::Cancel => {
                if ctx.canvas.state().is_idle() {
                    CommandOutcome::Ignored
                } else {
                    ctx.canvas.cancel();
                    CommandOutcome::Applied
                }
            }

            Command::NewPicture => {
                ctx.canvas.new_picture();
                CommandOutcome::Applied
            }

            Command::Resize { width, height } => {
                ctx.canvas.resize(*width, *height)?;
                CommandOutcome::Applied
            }

            Command::Save(format) => CommandOutcome::SaveRequested(*format),
        };
        log::debug!("{:?} -> {:?}", self, outcome);
        Ok(outcome)
    }
}

fn applied_if(done: bool) -> CommandOutcome {
    if done {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Ignored
    }
}
