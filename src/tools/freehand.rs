use egui::Pos2;

use crate::pixel_buffer::PixelBuffer;
use crate::renderer::{Renderer, StrokeMask};
use crate::session::ToolSession;
use crate::stroke::StrokeStyle;
use crate::tools::ToolKind;

/// Draws one segment of a pencil, brush, marker or eraser stroke from `last` to `current`.
pub fn draw_segment(
    tool: ToolKind,
    session: &ToolSession,
    last: Pos2,
    current: Pos2,
    buffer: &mut PixelBuffer,
    mask: &mut StrokeMask,
) -> usize {
    let Some(style) = StrokeStyle::for_tool(tool, session) else {
        return 0;
    };
    let mut renderer = Renderer::new(buffer, style.color, style.compositing).with_mask(mask);
    renderer.segment(last, current, style.width, style.cap);
    renderer.painted()
}
