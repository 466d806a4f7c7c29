use egui::Key;

use crate::canvas::Canvas;
use crate::command::{CommandContext, CommandOutcome, CommandResult};
use crate::session::ToolSession;

use super::{InputEvent, shortcuts};

/// Routes an input event to the canvas, the open text entry, or a shortcut command.
///
/// While a text entry is open, keys edit the entry and shortcuts are not consulted.
pub fn route_event(event: &InputEvent, canvas: &mut Canvas, session: &mut ToolSession) -> CommandResult {
    let entering_text = canvas.state().is_entering_text();

    match event {
        InputEvent::PointerDown { position } => canvas.pointer_down(session, *position),
        InputEvent::PointerMove { position } => canvas.pointer_move(session, *position),
        InputEvent::PointerUp => canvas.pointer_up(),
        InputEvent::PointerLeave => canvas.pointer_leave(),

        InputEvent::Text(text) => {
            if !entering_text {
                return Ok(CommandOutcome::Ignored);
            }
            canvas.text_input(text);
        }

        InputEvent::Key { key, .. } if entering_text => match key {
            Key::Enter => canvas.commit_text(session),
            Key::Escape => canvas.cancel(),
            Key::Backspace => canvas.text_backspace(),
            _ => return Ok(CommandOutcome::Ignored),
        },

        InputEvent::Key { key, modifiers } => {
            let Some(command) = shortcuts::command_for_key(*key, *modifiers) else {
                return Ok(CommandOutcome::Ignored);
            };
            return command.execute(&mut CommandContext::new(canvas, session));
        }
    }
    Ok(CommandOutcome::Applied)
}
