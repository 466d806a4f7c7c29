use crate::color::{Color, MARKER_ALPHA};
use crate::renderer::{Compositing, LineCap};
use crate::session::ToolSession;
use crate::tools::ToolKind;

/// Geometry and compositing of a freehand stroke segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
    pub color: Color,
    pub compositing: Compositing,
}

impl StrokeStyle {
    /// Style of the freehand tools; `None` for tools that do not draw strokes.
    pub fn for_tool(tool: ToolKind, session: &ToolSession) -> Option<Self> {
        let size = session.size.as_f32();
        let style = match tool {
            ToolKind::Pencil => Self {
                width: size,
                cap: LineCap::Round,
                color: session.color,
                compositing: Compositing::SourceOver,
            },
            ToolKind::Brush => Self {
                width: size * 2.0,
                cap: LineCap::Round,
                color: session.color,
                compositing: Compositing::SourceOver,
            },
            ToolKind::Marker => Self {
                width: size * 1.5,
                cap: LineCap::Square,
                color: session.color.with_alpha(MARKER_ALPHA),
                compositing: Compositing::SourceOver,
            },
            ToolKind::Eraser => Self {
                width: size * 2.0,
                cap: LineCap::Round,
                color: Color::BLACK,
                compositing: Compositing::Erase,
            },
            _ => return None,
        };
        Some(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BrushSize;

    #[test]
    fn test_width_multipliers() {
        let session = ToolSession::default().with_size(BrushSize::new(4).unwrap());
        let width = |tool| StrokeStyle::for_tool(tool, &session).unwrap().width;
        assert_eq!(width(ToolKind::Pencil), 4.0);
        assert_eq!(width(ToolKind::Brush), 8.0);
        assert_eq!(width(ToolKind::Marker), 6.0);
        assert_eq!(width(ToolKind::Eraser), 8.0);
        assert!(StrokeStyle::for_tool(ToolKind::Rectangle, &session).is_none());
    }

    #[test]
    fn test_marker_is_half_alpha_and_square() {
        let session = ToolSession::default().with_color(Color::RED);
        let style = StrokeStyle::for_tool(ToolKind::Marker, &session).unwrap();
        assert_eq!(style.color, Color::rgba(255, 0, 0, 0x80));
        assert_eq!(style.cap, LineCap::Square);
    }

    #[test]
    fn test_eraser_ignores_color() {
        let session = ToolSession::default().with_color(Color::RED);
        let style = StrokeStyle::for_tool(ToolKind::Eraser, &session).unwrap();
        assert_eq!(style.compositing, Compositing::Erase);
    }
}
