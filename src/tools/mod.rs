use egui::Pos2;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::fill;
use crate::pixel_buffer::PixelBuffer;
use crate::renderer::StrokeMask;
use crate::session::ToolSession;

pub mod freehand;
pub mod shapes;
pub mod spray;
pub mod text;

pub use text::TextStamper;

/// Whether shape tools fill their interior or only outline it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeStyle {
    #[default]
    Fill,
    Stroke,
}

/// How a tool responds to a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolBehavior {
    /// Mutates the buffer on every pointer move (pencil, brush, marker, eraser, spray).
    Continuous,
    /// Restores the last checkpoint and redraws a preview on every move.
    Shape,
    /// Acts once on pointer-down (bucket).
    SingleShot,
    /// Opens a text entry on pointer-down (text).
    TextEntry,
}

/// Enum representing all available tools.
///
/// Tools carry no state of their own; everything they need comes from the
/// [`ToolSession`] and the current [`Gesture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Pencil,
    Brush,
    Marker,
    Eraser,
    Spray,
    Bucket,
    Text,
    Rectangle,
    Circle,
    Line,
    Arrow,
}

impl ToolKind {
    pub const ALL: [ToolKind; 11] = [
        ToolKind::Pencil,
        ToolKind::Brush,
        ToolKind::Marker,
        ToolKind::Eraser,
        ToolKind::Spray,
        ToolKind::Bucket,
        ToolKind::Text,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Line,
        ToolKind::Arrow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Brush => "Brush",
            ToolKind::Marker => "Marker",
            ToolKind::Eraser => "Eraser",
            ToolKind::Spray => "Spray",
            ToolKind::Bucket => "Bucket",
            ToolKind::Text => "Text",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Line => "Line",
            ToolKind::Arrow => "Arrow",
        }
    }

    /// Single-key shortcut selecting this tool.
    pub fn shortcut(self) -> char {
        match self {
            ToolKind::Pencil => 'p',
            ToolKind::Brush => 'b',
            ToolKind::Marker => 'm',
            ToolKind::Eraser => 'e',
            ToolKind::Spray => 's',
            ToolKind::Bucket => 'g',
            ToolKind::Text => 't',
            ToolKind::Rectangle => 'r',
            ToolKind::Circle => 'c',
            ToolKind::Line => 'l',
            ToolKind::Arrow => 'a',
        }
    }

    pub fn from_shortcut(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.shortcut() == key)
    }

    pub fn behavior(self) -> ToolBehavior {
        match self {
            ToolKind::Pencil
            | ToolKind::Brush
            | ToolKind::Marker
            | ToolKind::Eraser
            | ToolKind::Spray => ToolBehavior::Continuous,
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line | ToolKind::Arrow => {
                ToolBehavior::Shape
            }
            ToolKind::Bucket => ToolBehavior::SingleShot,
            ToolKind::Text => ToolBehavior::TextEntry,
        }
    }

    pub fn is_shape(self) -> bool {
        self.behavior() == ToolBehavior::Shape
    }

    /// Applies this tool for the current pointer position, returning the number
    /// of pixels written.
    pub fn apply(self, session: &ToolSession, gesture: &Gesture, ctx: &mut ToolContext<'_>) -> usize {
        match self {
            ToolKind::Pencil | ToolKind::Brush | ToolKind::Marker | ToolKind::Eraser => {
                freehand::draw_segment(self, session, gesture.last, gesture.current, ctx.buffer, ctx.mask)
            }
            ToolKind::Spray => spray::spray(session, gesture.current, ctx.buffer, ctx.rng),
            ToolKind::Bucket => {
                let seed = (gesture.current.x.round() as i32, gesture.current.y.round() as i32);
                fill::flood_fill(ctx.buffer, seed, session.color)
            }
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line | ToolKind::Arrow => {
                shapes::draw_shape(self, session, gesture.origin, gesture.current, ctx.buffer, ctx.mask)
            }
            // Text is stamped when the entry is committed, not by pointer motion.
            ToolKind::Text => 0,
        }
    }
}

/// Pointer positions of the active interaction, in buffer space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// Where the pointer went down.
    pub origin: Pos2,
    /// Previous pointer position.
    pub last: Pos2,
    /// Current pointer position.
    pub current: Pos2,
}

impl Gesture {
    pub fn start(at: Pos2) -> Self {
        Self {
            origin: at,
            last: at,
            current: at,
        }
    }

    /// Advances to `to`, keeping the previous position in `last`.
    pub fn advance(&mut self, to: Pos2) {
        self.last = self.current;
        self.current = to;
    }
}

/// Mutable collaborators a tool draws with.
pub struct ToolContext<'a> {
    pub buffer: &'a mut PixelBuffer,
    pub mask: &'a mut StrokeMask,
    pub rng: &'a mut StdRng,
}
