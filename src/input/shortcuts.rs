use egui::{Key, Modifiers};

use crate::command::Command;
use crate::export::ExportFormat;
use crate::tools::{ShapeStyle, ToolKind};

fn letter(key: Key) -> Option<char> {
    let c = match key {
        Key::A => 'a',
        Key::B => 'b',
        Key::C => 'c',
        Key::E => 'e',
        Key::F => 'f',
        Key::G => 'g',
        Key::K => 'k',
        Key::L => 'l',
        Key::M => 'm',
        Key::P => 'p',
        Key::R => 'r',
        Key::S => 's',
        Key::T => 't',
        Key::Y => 'y',
        Key::Z => 'z',
        _ => return None,
    };
    Some(c)
}

fn is_command(modifiers: Modifiers) -> bool {
    modifiers.command || modifiers.ctrl || modifiers.mac_cmd
}

/// Maps a key press to its command. Only call this while no text entry is open.
pub fn command_for_key(key: Key, modifiers: Modifiers) -> Option<Command> {
    if is_command(modifiers) {
        return match key {
            Key::Z => Some(Command::Undo),
            Key::Y => Some(Command::Redo),
            Key::S => Some(Command::Save(ExportFormat::default())),
            _ => None,
        };
    }

    match key {
        Key::OpenBracket => return Some(Command::AdjustSize(-1)),
        Key::CloseBracket => return Some(Command::AdjustSize(1)),
        Key::Delete => return Some(Command::Clear),
        Key::Escape => return Some(Command::Cancel),
        _ => {}
    }

    // Shifted or alt letters are left alone.
    if modifiers.shift || modifiers.alt {
        return None;
    }
    match letter(key)? {
        'f' => Some(Command::SetShapeStyle(ShapeStyle::Fill)),
        'k' => Some(Command::SetShapeStyle(ShapeStyle::Stroke)),
        c => ToolKind::from_shortcut(c).map(Command::SelectTool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_letters() {
        assert_eq!(
            command_for_key(Key::G, Modifiers::NONE),
            Some(Command::SelectTool(ToolKind::Bucket))
        );
        assert_eq!(
            command_for_key(Key::A, Modifiers::NONE),
            Some(Command::SelectTool(ToolKind::Arrow))
        );
        assert_eq!(command_for_key(Key::Z, Modifiers::NONE), None);
        assert_eq!(command_for_key(Key::P, Modifiers::SHIFT), None);
    }

    #[test]
    fn test_command_chords() {
        assert_eq!(command_for_key(Key::Z, Modifiers::COMMAND), Some(Command::Undo));
        assert_eq!(command_for_key(Key::Y, Modifiers::CTRL), Some(Command::Redo));
        assert_eq!(
            command_for_key(Key::S, Modifiers::COMMAND),
            Some(Command::Save(ExportFormat::Png))
        );
        // Ctrl+S is save, not the spray tool.
        assert_ne!(
            command_for_key(Key::S, Modifiers::CTRL),
            Some(Command::SelectTool(ToolKind::Spray))
        );
    }

    #[test]
    fn test_size_and_style_keys() {
        assert_eq!(
            command_for_key(Key::OpenBracket, Modifiers::NONE),
            Some(Command::AdjustSize(-1))
        );
        assert_eq!(
            command_for_key(Key::K, Modifiers::NONE),
            Some(Command::SetShapeStyle(ShapeStyle::Stroke))
        );
        assert_eq!(command_for_key(Key::Delete, Modifiers::NONE), Some(Command::Clear));
    }
}
