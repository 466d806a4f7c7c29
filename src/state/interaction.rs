//! The interaction state machine of the drawing surface.
//!
//! Only one pointer interaction is live at a time. Pointer-down moves from
//! `Idle` to `Active` (or `TextEntry` for the text tool); pointer-up,
//! pointer-leave and cancellation return to `Idle`.
//!
//! # State Transitions
//!
//! ```text
//!                    ┌─────────────┐
//!              ┌─────►   Active    ├─────┐
//!              │     └─────────────┘     │
//! ┌──────────┐ │                         │ ┌──────────┐
//! │   Idle   ├─┤                         ├─►   Idle   │
//! └──────────┘ │     ┌─────────────┐     │ └──────────┘
//!              └─────►  TextEntry  ├─────┘
//!                    └──┬───────▲──┘
//!                       └───────┘ (moved by a new click)
//! ```
use egui::Pos2;

use crate::error::TransitionError;
use crate::pixel_buffer::PixelBuffer;
use crate::renderer::StrokeMask;
use crate::tools::{Gesture, ToolKind};

/// A pointer-down-to-up interaction in progress.
#[derive(Debug, Clone)]
pub struct Interaction {
    /// Tool chosen at pointer-down; later tool changes do not affect this interaction.
    pub tool: ToolKind,
    pub gesture: Gesture,
    /// Pixels already composited during this interaction.
    pub mask: StrokeMask,
    /// Whether anything was drawn yet.
    pub dirty: bool,
}

impl Interaction {
    pub fn begin(tool: ToolKind, at: Pos2, buffer: &PixelBuffer) -> Self {
        Self {
            tool,
            gesture: Gesture::start(at),
            mask: StrokeMask::for_buffer(buffer),
            dirty: false,
        }
    }
}

/// Text waiting to be committed at a click position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    pub at: Pos2,
    pub text: String,
}

impl TextEntry {
    pub fn new(at: Pos2) -> Self {
        Self {
            at,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    /// No active interaction
    #[default]
    Idle,
    /// A stroke, shape or fill is in progress
    Active(Interaction),
    /// A text entry is open
    TextEntry(TextEntry),
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::Active(_) => "Active",
            InteractionState::TextEntry(_) => "TextEntry",
        }
    }

    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &InteractionState) -> bool {
        matches!(
            (self, new_state),
            (InteractionState::Idle, _)
                | (InteractionState::Active(_), InteractionState::Idle)
                | (InteractionState::TextEntry(_), InteractionState::Idle)
                | (InteractionState::TextEntry(_), InteractionState::TextEntry(_))
        )
    }

    /// Moves to `new_state`, returning the previous state.
    pub fn transition_to(&mut self, new_state: InteractionState) -> Result<InteractionState, TransitionError> {
        if !self.can_transition_to(&new_state) {
            return Err(TransitionError::InvalidStateTransition {
                from: self.name(),
                to: new_state.name(),
            });
        }
        Ok(std::mem::replace(self, new_state))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, InteractionState::Active(_))
    }

    pub fn is_entering_text(&self) -> bool {
        matches!(self, InteractionState::TextEntry(_))
    }

    pub fn interaction(&self) -> Option<&Interaction> {
        match self {
            InteractionState::Active(interaction) => Some(interaction),
            _ => None,
        }
    }

    pub fn interaction_mut(&mut self) -> Option<&mut Interaction> {
        match self {
            InteractionState::Active(interaction) => Some(interaction),
            _ => None,
        }
    }

    pub fn text_entry(&self) -> Option<&TextEntry> {
        match self {
            InteractionState::TextEntry(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn text_entry_mut(&mut self) -> Option<&mut TextEntry> {
        match self {
            InteractionState::TextEntry(entry) => Some(entry),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> InteractionState {
        let buffer = PixelBuffer::new(2, 2).unwrap();
        InteractionState::Active(Interaction::begin(ToolKind::Pencil, egui::pos2(0.0, 0.0), &buffer))
    }

    #[test]
    fn test_idle_to_active_and_back() {
        let mut state = InteractionState::Idle;
        assert!(state.transition_to(active()).is_ok());
        assert!(state.is_active());
        let previous = state.transition_to(InteractionState::Idle).unwrap();
        assert!(previous.is_active());
        assert!(state.is_idle());
    }

    #[test]
    fn test_active_cannot_restart() {
        let mut state = active();
        let err = state.transition_to(active()).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidStateTransition {
                from: "Active",
                to: "Active"
            }
        );
        assert!(state.is_active());
    }

    #[test]
    fn test_text_entry_can_move() {
        let mut state = InteractionState::TextEntry(TextEntry::new(egui::pos2(1.0, 1.0)));
        assert!(
            state
                .transition_to(InteractionState::TextEntry(TextEntry::new(egui::pos2(5.0, 5.0))))
                .is_ok()
        );
        assert_eq!(state.text_entry().unwrap().at, egui::pos2(5.0, 5.0));
        assert!(state.transition_to(active()).is_err());
    }
}
