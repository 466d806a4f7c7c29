use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

mod router;
pub mod shortcuts;

pub use router::route_event;

/// Input for the drawing surface. Pointer positions are in buffer pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved over the canvas (with or without the button held)
    PointerMove { position: Pos2 },
    /// Primary button released
    PointerUp,
    /// Pointer left the canvas
    PointerLeave,
    /// A key was pressed
    Key { key: Key, modifiers: Modifiers },
    /// Typed text
    Text(String),
}

/// Maps a screen position inside `rect` to buffer pixels of a `size` buffer.
pub fn screen_to_buffer(screen: Pos2, rect: Rect, size: (u32, u32)) -> Pos2 {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Pos2::ZERO;
    }
    let rel = screen - rect.min;
    Pos2::new(
        rel.x * size.0 as f32 / rect.width(),
        rel.y * size.1 as f32 / rect.height(),
    )
}

/// Handles converting raw egui input into canvas [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// Whether the pointer was over the canvas last frame
    inside: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process raw egui input for a canvas shown in `canvas_rect`.
    ///
    /// Keyboard events are skipped while an egui widget has keyboard focus.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect, buffer_size: (u32, u32)) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let keyboard_taken = ctx.wants_keyboard_input();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            let inside = hover.is_some_and(|pos| canvas_rect.contains(pos));

            if self.inside && !inside {
                events.push(InputEvent::PointerLeave);
            }

            if let Some(pos) = hover.filter(|_| inside) {
                let position = screen_to_buffer(pos, canvas_rect, buffer_size);
                if input.pointer.button_pressed(PointerButton::Primary) {
                    events.push(InputEvent::PointerDown { position });
                } else if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove { position });
                }
                if input.pointer.button_released(PointerButton::Primary) {
                    events.push(InputEvent::PointerUp);
                }
            }

            self.inside = inside;
            self.last_pointer_pos = hover;

            if keyboard_taken {
                return;
            }
            for event in &input.events {
                match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => events.push(InputEvent::Key {
                        key: *key,
                        modifiers: *modifiers,
                    }),
                    egui::Event::Text(text) => events.push(InputEvent::Text(text.clone())),
                    _ => {}
                }
            }
        });

        events
    }
}
