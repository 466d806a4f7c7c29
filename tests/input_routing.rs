use egui::{Key, Modifiers, pos2};
use raster_canvas::input::route_event;
use raster_canvas::{
    Canvas, CanvasConfig, Color, CommandOutcome, ExportFormat, InputEvent, ShapeStyle, ToolKind,
    ToolSession,
};

fn setup() -> (Canvas, ToolSession) {
    let config = CanvasConfig {
        width: 48,
        height: 48,
        history_capacity: 20,
    };
    (Canvas::with_seed(&config, 5).unwrap(), ToolSession::default())
}

fn key(key: Key) -> InputEvent {
    InputEvent::Key {
        key,
        modifiers: Modifiers::NONE,
    }
}

fn chord(key: Key) -> InputEvent {
    InputEvent::Key {
        key,
        modifiers: Modifiers::COMMAND,
    }
}

#[test]
fn test_tool_and_style_shortcuts() {
    let (mut canvas, mut session) = setup();

    route_event(&key(Key::G), &mut canvas, &mut session).unwrap();
    assert_eq!(session.tool, ToolKind::Bucket);

    route_event(&key(Key::K), &mut canvas, &mut session).unwrap();
    assert_eq!(session.shape_style, ShapeStyle::Stroke);

    route_event(&key(Key::CloseBracket), &mut canvas, &mut session).unwrap();
    route_event(&key(Key::CloseBracket), &mut canvas, &mut session).unwrap();
    route_event(&key(Key::OpenBracket), &mut canvas, &mut session).unwrap();
    assert_eq!(session.size.get(), 6);
}

#[test]
fn test_pointer_events_draw_and_chords_undo() {
    let (mut canvas, mut session) = setup();
    for event in [
        InputEvent::PointerDown {
            position: pos2(4.0, 24.0),
        },
        InputEvent::PointerMove {
            position: pos2(40.0, 24.0),
        },
        InputEvent::PointerUp,
    ] {
        route_event(&event, &mut canvas, &mut session).unwrap();
    }
    assert!(canvas.buffer().count(Color::BLACK) > 0);

    let outcome = route_event(&chord(Key::Z), &mut canvas, &mut session).unwrap();
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(canvas.buffer().count(Color::BLACK), 0);

    route_event(&chord(Key::Y), &mut canvas, &mut session).unwrap();
    assert!(canvas.buffer().count(Color::BLACK) > 0);
}

#[test]
fn test_save_chord_requests_save() {
    let (mut canvas, mut session) = setup();
    let outcome = route_event(&chord(Key::S), &mut canvas, &mut session).unwrap();
    assert_eq!(outcome, CommandOutcome::SaveRequested(ExportFormat::Png));
    // Ctrl+S does not select the spray tool.
    assert_eq!(session.tool, ToolKind::Pencil);
}

#[test]
fn test_delete_clears() {
    let (mut canvas, mut session) = setup();
    session.tool = ToolKind::Bucket;
    route_event(
        &InputEvent::PointerDown {
            position: pos2(1.0, 1.0),
        },
        &mut canvas,
        &mut session,
    )
    .unwrap();
    route_event(&key(Key::Delete), &mut canvas, &mut session).unwrap();
    assert_eq!(canvas.buffer().count(Color::TRANSPARENT), 48 * 48);
    assert!(canvas.can_undo());
}

#[test]
fn test_text_entry_swallows_shortcuts() {
    let (mut canvas, mut session) = setup();
    session.tool = ToolKind::Text;
    route_event(
        &InputEvent::PointerDown {
            position: pos2(4.0, 40.0),
        },
        &mut canvas,
        &mut session,
    )
    .unwrap();

    // "g" arrives both as a key press and as typed text.
    route_event(&key(Key::G), &mut canvas, &mut session).unwrap();
    route_event(&InputEvent::Text("go".into()), &mut canvas, &mut session).unwrap();
    route_event(&key(Key::Backspace), &mut canvas, &mut session).unwrap();

    assert_eq!(session.tool, ToolKind::Text);
    assert_eq!(canvas.state().text_entry().unwrap().text, "g");

    route_event(&key(Key::Enter), &mut canvas, &mut session).unwrap();
    assert!(canvas.state().is_idle());
    assert_eq!(canvas.history().len(), 2);
}

#[test]
fn test_escape_closes_text_entry() {
    let (mut canvas, mut session) = setup();
    session.tool = ToolKind::Text;
    route_event(
        &InputEvent::PointerDown {
            position: pos2(4.0, 40.0),
        },
        &mut canvas,
        &mut session,
    )
    .unwrap();
    route_event(&InputEvent::Text("abc".into()), &mut canvas, &mut session).unwrap();
    route_event(&key(Key::Escape), &mut canvas, &mut session).unwrap();

    assert!(canvas.state().is_idle());
    assert_eq!(canvas.buffer().count(Color::TRANSPARENT), 48 * 48);
    assert_eq!(canvas.history().len(), 1);
}

#[test]
fn test_text_outside_entry_is_ignored() {
    let (mut canvas, mut session) = setup();
    let outcome = route_event(&InputEvent::Text("p".into()), &mut canvas, &mut session).unwrap();
    assert_eq!(outcome, CommandOutcome::Ignored);
}
