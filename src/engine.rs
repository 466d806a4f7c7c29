use egui::Pos2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::command::HistoryManager;
use crate::pixel_buffer::PixelBuffer;
use crate::session::ToolSession;
use crate::state::{Interaction, InteractionState, TextEntry};
use crate::tools::{TextStamper, ToolBehavior, ToolContext, ToolKind, shapes};

/// What an engine call did, so the surface can notify observers.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOutcome {
    /// Nothing happened (hover, or no interaction to end).
    Ignored,
    /// An interaction started; the buffer is unchanged.
    Started(ToolKind),
    /// The buffer changed during an interaction.
    Updated,
    /// An interaction ended and the buffer was checkpointed.
    Committed(ToolKind),
    /// An interaction ended without drawing anything.
    Finished(ToolKind),
    /// An interaction was abandoned and the last checkpoint restored.
    Cancelled(ToolKind),
    TextEntryOpened(Pos2),
    TextEntryClosed { committed: bool },
}

/// Turns the caller's [`ToolSession`] and pointer motion into buffer mutations.
///
/// The engine holds only the state of the live interaction. The buffer and
/// history are passed in on every call.
pub struct ToolEngine {
    state: InteractionState,
    rng: StdRng,
    stamper: Option<TextStamper>,
}

impl std::fmt::Debug for ToolEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEngine")
            .field("state", &self.state.name())
            .field("has_font", &self.stamper.is_some())
            .finish()
    }
}

impl Default for ToolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Engine whose spray output is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let stamper = match TextStamper::new() {
            Ok(stamper) => Some(stamper),
            Err(err) => {
                log::error!("Text tool unavailable: {}", err);
                None
            }
        };
        Self {
            state: InteractionState::Idle,
            rng,
            stamper,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn pointer_down(
        &mut self,
        session: &ToolSession,
        pos: Pos2,
        buffer: &mut PixelBuffer,
        history: &mut HistoryManager,
    ) -> EngineOutcome {
        if self.state.is_active() {
            log::warn!("Pointer down during an active interaction; finishing it first");
            self.pointer_up(buffer, history);
        }
        if self.state.is_entering_text() && session.tool != ToolKind::Text {
            self.cancel(buffer, history);
        }

        let tool = session.tool;
        match tool.behavior() {
            ToolBehavior::SingleShot => {
                let mut interaction = Interaction::begin(tool, pos, buffer);
                let painted = tool.apply(
                    session,
                    &interaction.gesture,
                    &mut ToolContext {
                        buffer: &mut *buffer,
                        mask: &mut interaction.mask,
                        rng: &mut self.rng,
                    },
                );
                // A click on the picture always commits, even when nothing changed.
                if painted > 0 || buffer.get_at(pos).is_some() {
                    history.checkpoint(buffer);
                    EngineOutcome::Committed(tool)
                } else {
                    EngineOutcome::Finished(tool)
                }
            }
            ToolBehavior::TextEntry => {
                if let Some(entry) = self.state.text_entry_mut() {
                    entry.at = pos;
                    return EngineOutcome::TextEntryOpened(pos);
                }
                match self.state.transition_to(InteractionState::TextEntry(TextEntry::new(pos))) {
                    Ok(_) => EngineOutcome::TextEntryOpened(pos),
                    Err(err) => {
                        log::warn!("{}", err);
                        EngineOutcome::Ignored
                    }
                }
            }
            ToolBehavior::Continuous | ToolBehavior::Shape => {
                let interaction = Interaction::begin(tool, pos, buffer);
                match self.state.transition_to(InteractionState::Active(interaction)) {
                    Ok(_) => {
                        log::debug!("{} started at {:?}", tool.name(), pos);
                        EngineOutcome::Started(tool)
                    }
                    Err(err) => {
                        log::warn!("{}", err);
                        EngineOutcome::Ignored
                    }
                }
            }
        }
    }

    pub fn pointer_move(
        &mut self,
        session: &ToolSession,
        pos: Pos2,
        buffer: &mut PixelBuffer,
        history: &HistoryManager,
    ) -> EngineOutcome {
        let Some(interaction) = self.state.interaction_mut() else {
            return EngineOutcome::Ignored;
        };
        interaction.gesture.advance(pos);
        let tool = interaction.tool;

        if tool.is_shape() {
            // Each preview replaces the previous one.
            if let Some(checkpoint) = history.current() {
                if let Err(err) = buffer.restore(checkpoint) {
                    log::warn!("Cannot restore checkpoint for preview: {}", err);
                }
            }
            let g = interaction.gesture;
            let painted =
                shapes::draw_shape(tool, session, g.origin, g.current, buffer, &mut interaction.mask);
            interaction.dirty = painted > 0;
            return EngineOutcome::Updated;
        }

        let painted = tool.apply(
            session,
            &interaction.gesture,
            &mut ToolContext {
                buffer,
                mask: &mut interaction.mask,
                rng: &mut self.rng,
            },
        );
        if painted > 0 {
            interaction.dirty = true;
            EngineOutcome::Updated
        } else {
            EngineOutcome::Ignored
        }
    }

    /// Ends the active interaction, checkpointing it if it drew anything.
    /// Pointer-leave is handled the same way.
    pub fn pointer_up(&mut self, buffer: &PixelBuffer, history: &mut HistoryManager) -> EngineOutcome {
        if !self.state.is_active() {
            return EngineOutcome::Ignored;
        }
        let previous = match self.state.transition_to(InteractionState::Idle) {
            Ok(previous) => previous,
            Err(err) => {
                log::warn!("{}", err);
                return EngineOutcome::Ignored;
            }
        };
        let Some(interaction) = previous.interaction() else {
            return EngineOutcome::Ignored;
        };

        if interaction.dirty {
            history.checkpoint(buffer);
            log::debug!("{} committed", interaction.tool.name());
            EngineOutcome::Committed(interaction.tool)
        } else {
            EngineOutcome::Finished(interaction.tool)
        }
    }

    /// Abandons the active interaction or text entry, restoring the last checkpoint.
    pub fn cancel(&mut self, buffer: &mut PixelBuffer, history: &HistoryManager) -> EngineOutcome {
        match self.state.transition_to(InteractionState::Idle) {
            Ok(InteractionState::Active(interaction)) => {
                if let Some(checkpoint) = history.current() {
                    if let Err(err) = buffer.restore(checkpoint) {
                        log::warn!("Cannot restore checkpoint on cancel: {}", err);
                    }
                }
                log::debug!("{} cancelled", interaction.tool.name());
                EngineOutcome::Cancelled(interaction.tool)
            }
            Ok(InteractionState::TextEntry(_)) => EngineOutcome::TextEntryClosed { committed: false },
            Ok(InteractionState::Idle) => EngineOutcome::Ignored,
            Err(err) => {
                log::warn!("{}", err);
                EngineOutcome::Ignored
            }
        }
    }

    /// Drops any live interaction without touching the buffer.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Appends to the open text entry.
    pub fn text_input(&mut self, text: &str) {
        if let Some(entry) = self.state.text_entry_mut() {
            entry.text.push_str(text);
        }
    }

    /// Removes the last character of the open text entry.
    pub fn text_backspace(&mut self) {
        if let Some(entry) = self.state.text_entry_mut() {
            entry.text.pop();
        }
    }

    /// Stamps the open text entry with the session color and size, then checkpoints.
    pub fn commit_text(
        &mut self,
        session: &ToolSession,
        buffer: &mut PixelBuffer,
        history: &mut HistoryManager,
    ) -> EngineOutcome {
        if !self.state.is_entering_text() {
            return EngineOutcome::Ignored;
        }
        let entry = match self.state.transition_to(InteractionState::Idle) {
            Ok(InteractionState::TextEntry(entry)) => entry,
            _ => return EngineOutcome::Ignored,
        };

        let painted = match &self.stamper {
            Some(stamper) => stamper.stamp(session, entry.at, &entry.text, buffer),
            None => {
                log::warn!("No font loaded; discarding text {:?}", entry.text);
                0
            }
        };
        if painted > 0 {
            history.checkpoint(buffer);
        }
        EngineOutcome::TextEntryClosed {
            committed: painted > 0,
        }
    }
}

/// Starts an interaction and feeds it a path of pointer positions; handy for scripted drawing.
pub fn drag(
    engine: &mut ToolEngine,
    session: &ToolSession,
    path: &[Pos2],
    buffer: &mut PixelBuffer,
    history: &mut HistoryManager,
) -> EngineOutcome {
    let Some((first, rest)) = path.split_first() else {
        return EngineOutcome::Ignored;
    };
    engine.pointer_down(session, *first, buffer, history);
    for pos in rest {
        engine.pointer_move(session, *pos, buffer, history);
    }
    engine.pointer_up(buffer, history)
}
