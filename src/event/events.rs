use egui::Pos2;

use crate::tools::ToolKind;

/// Notifications emitted by the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// Undo/redo availability may have changed.
    HistoryChanged { can_undo: bool, can_redo: bool },
    ToolChanged { old: ToolKind, new: ToolKind },
    /// An interaction ended and its result was checkpointed.
    InteractionCommitted { tool: ToolKind },
    /// An interaction was abandoned and the last checkpoint restored.
    InteractionCancelled { tool: ToolKind },
    TextEntryOpened { at: Pos2 },
    TextEntryClosed { committed: bool },
    Cleared,
    Resized { width: u32, height: u32 },
    TemplateLoaded { width: u32, height: u32 },
}
