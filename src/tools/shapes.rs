use std::f32::consts::FRAC_PI_6;

use egui::Pos2;

use crate::pixel_buffer::PixelBuffer;
use crate::renderer::{Compositing, LineCap, Renderer, StrokeMask};
use crate::session::ToolSession;
use crate::tools::{ShapeStyle, ToolKind};

/// Arrow head length per unit of brush size.
pub const ARROW_HEAD_SCALE: f32 = 3.0;

/// The two arrow-head barbs for a shaft `from -> to`, each at ±30° from the shaft.
pub fn arrow_head(from: Pos2, to: Pos2, head_len: f32) -> [(Pos2, Pos2); 2] {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let barb = |offset: f32| {
        Pos2::new(
            to.x - head_len * (angle + offset).cos(),
            to.y - head_len * (angle + offset).sin(),
        )
    };
    [(to, barb(-FRAC_PI_6)), (to, barb(FRAC_PI_6))]
}

/// Renders a shape tool's geometry from `origin` to `current`.
///
/// The caller restores the last checkpoint first when this is a preview. `mask`
/// is cleared here, so one mask serves every preview of an interaction.
pub fn draw_shape(
    tool: ToolKind,
    session: &ToolSession,
    origin: Pos2,
    current: Pos2,
    buffer: &mut PixelBuffer,
    mask: &mut StrokeMask,
) -> usize {
    let width = session.size.as_f32();
    mask.reset();
    let mut renderer = Renderer::new(buffer, session.color, Compositing::SourceOver).with_mask(mask);

    match (tool, session.shape_style) {
        (ToolKind::Rectangle, ShapeStyle::Fill) => renderer.fill_rect(origin, current),
        (ToolKind::Rectangle, ShapeStyle::Stroke) => renderer.stroke_rect(origin, current, width),
        (ToolKind::Circle, style) => {
            let radius = origin.distance(current);
            match style {
                ShapeStyle::Fill => renderer.fill_circle(origin, radius),
                ShapeStyle::Stroke => renderer.stroke_circle(origin, radius, width),
            }
        }
        (ToolKind::Line, _) => renderer.segment(origin, current, width, LineCap::Butt),
        (ToolKind::Arrow, _) => {
            renderer.segment(origin, current, width, LineCap::Butt);
            if origin != current {
                for (a, b) in arrow_head(origin, current, width * ARROW_HEAD_SCALE) {
                    renderer.segment(a, b, width, LineCap::Butt);
                }
            }
        }
        _ => {
            log::warn!("{} is not a shape tool", tool.name());
        }
    }

    renderer.painted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::session::BrushSize;
    use egui::pos2;

    fn session(tool: ToolKind, style: ShapeStyle) -> ToolSession {
        ToolSession::default()
            .with_tool(tool)
            .with_color(Color::RED)
            .with_size(BrushSize::new(2).unwrap())
            .with_shape_style(style)
    }

    #[test]
    fn test_arrow_head_angles() {
        let [(tip_a, left), (tip_b, right)] = arrow_head(pos2(0.0, 0.0), pos2(10.0, 0.0), 6.0);
        assert_eq!(tip_a, pos2(10.0, 0.0));
        assert_eq!(tip_b, pos2(10.0, 0.0));
        let expected_x = 10.0 - 6.0 * FRAC_PI_6.cos();
        assert!((left.x - expected_x).abs() < 1e-4);
        assert!((right.x - expected_x).abs() < 1e-4);
        assert!((left.y - 3.0).abs() < 1e-4);
        assert!((right.y + 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_filled_vs_stroked_rectangle() {
        let mut filled = PixelBuffer::new(30, 30).unwrap();
        let mut mask = StrokeMask::for_buffer(&filled);
        draw_shape(
            ToolKind::Rectangle,
            &session(ToolKind::Rectangle, ShapeStyle::Fill),
            pos2(5.0, 5.0),
            pos2(25.0, 25.0),
            &mut filled,
            &mut mask,
        );
        assert_eq!(filled.get(15, 15), Some(Color::RED));

        let mut outline = PixelBuffer::new(30, 30).unwrap();
        let mut mask = StrokeMask::for_buffer(&outline);
        draw_shape(
            ToolKind::Rectangle,
            &session(ToolKind::Rectangle, ShapeStyle::Stroke),
            pos2(5.0, 5.0),
            pos2(25.0, 25.0),
            &mut outline,
            &mut mask,
        );
        assert_eq!(outline.get(15, 15), Some(Color::TRANSPARENT));
        assert_eq!(outline.get(5, 15), Some(Color::RED));
        assert_eq!(outline.get(15, 24), Some(Color::RED));
    }

    #[test]
    fn test_circle_radius_is_distance_to_release() {
        let mut buffer = PixelBuffer::new(40, 40).unwrap();
        let mut mask = StrokeMask::for_buffer(&buffer);
        draw_shape(
            ToolKind::Circle,
            &session(ToolKind::Circle, ShapeStyle::Fill),
            pos2(20.0, 20.0),
            pos2(26.0, 28.0),
            &mut buffer,
            &mut mask,
        );
        // radius 10
        assert_eq!(buffer.get(20, 29), Some(Color::RED));
        assert_eq!(buffer.get(20, 31), Some(Color::TRANSPARENT));
        assert_eq!(buffer.get(10, 19), Some(Color::RED));
    }

    #[test]
    fn test_line_ignores_shape_style() {
        let draw = |style| {
            let mut buffer = PixelBuffer::new(20, 20).unwrap();
            draw_shape(
                ToolKind::Line,
                &session(ToolKind::Line, style),
                pos2(2.0, 2.0),
                pos2(17.0, 12.0),
                &mut buffer,
                &mut StrokeMask::new(20, 20),
            );
            buffer
        };
        assert!(draw(ShapeStyle::Fill) == draw(ShapeStyle::Stroke));
    }

    #[test]
    fn test_arrow_draws_head_beyond_shaft() {
        let mut line = PixelBuffer::new(40, 40).unwrap();
        let mut arrow = PixelBuffer::new(40, 40).unwrap();
        let mut mask = StrokeMask::new(40, 40);
        let s = session(ToolKind::Arrow, ShapeStyle::Fill);
        let (from, to) = (pos2(5.0, 20.0), pos2(35.0, 20.0));
        let n_line = draw_shape(ToolKind::Line, &s, from, to, &mut line, &mut mask);
        let n_arrow = draw_shape(ToolKind::Arrow, &s, from, to, &mut arrow, &mut mask);
        assert!(n_arrow > n_line);
        // One barb reaches up-left of the tip.
        assert_eq!(arrow.get(31, 17), Some(Color::RED));
        assert_eq!(line.get(31, 17), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_reused_mask_redraws_each_preview() {
        let s = session(ToolKind::Rectangle, ShapeStyle::Fill);
        let blank = PixelBuffer::new(30, 30).unwrap();
        let mut mask = StrokeMask::for_buffer(&blank);

        let mut preview = blank.clone();
        draw_shape(ToolKind::Rectangle, &s, pos2(2.0, 2.0), pos2(20.0, 20.0), &mut preview, &mut mask);
        // Restore, then draw the same shape again with the same mask.
        let mut redrawn = blank.clone();
        let painted = draw_shape(
            ToolKind::Rectangle,
            &s,
            pos2(2.0, 2.0),
            pos2(20.0, 20.0),
            &mut redrawn,
            &mut mask,
        );

        assert_eq!(painted, 18 * 18);
        assert!(redrawn == preview);
    }
}
