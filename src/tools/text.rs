use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use egui::Pos2;

use crate::error::CanvasError;
use crate::pixel_buffer::PixelBuffer;
use crate::renderer::{Compositing, Renderer};
use crate::session::ToolSession;

/// Smallest font size used for stamped text, in pixels.
pub const MIN_TEXT_PX: f32 = 16.0;

/// Rasterizes text into the buffer with the baseline of the first line at the
/// click position.
#[derive(Clone)]
pub struct TextStamper {
    font: FontArc,
}

impl std::fmt::Debug for TextStamper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextStamper").finish_non_exhaustive()
    }
}

impl TextStamper {
    /// Uses the proportional font bundled with egui.
    pub fn new() -> Result<Self, CanvasError> {
        Self::from_static(epaint_default_fonts::UBUNTU_LIGHT)
    }

    pub fn from_static(data: &'static [u8]) -> Result<Self, CanvasError> {
        Ok(Self {
            font: FontArc::try_from_slice(data)?,
        })
    }

    pub fn from_vec(data: Vec<u8>) -> Result<Self, CanvasError> {
        Ok(Self {
            font: FontArc::try_from_vec(data)?,
        })
    }

    /// Font size derived from the brush size.
    pub fn font_px(session: &ToolSession) -> f32 {
        session.size.as_f32().max(MIN_TEXT_PX)
    }

    /// Stamps `text` at `at` using the session color and size. Lines are split on `'\n'`.
    pub fn stamp(&self, session: &ToolSession, at: Pos2, text: &str, buffer: &mut PixelBuffer) -> usize {
        let px = Self::font_px(session);
        let scaled = self.font.as_scaled(px);
        let line_advance = scaled.height() + scaled.line_gap();
        let mut renderer = Renderer::new(buffer, session.color, Compositing::SourceOver);

        for (line_idx, line) in text.split('\n').enumerate() {
            let baseline = at.y + line_idx as f32 * line_advance;
            let mut caret = at.x;
            let mut previous: Option<GlyphId> = None;

            for ch in line.chars() {
                let id = self.font.glyph_id(ch);
                if let Some(prev) = previous {
                    caret += scaled.kern(prev, id);
                }
                let glyph = id.with_scale_and_position(px, point(caret, baseline));
                caret += scaled.h_advance(id);
                previous = Some(id);

                let Some(outlined) = self.font.outline_glyph(glyph) else {
                    continue;
                };
                let bounds = outlined.px_bounds();
                let (x0, y0) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|x, y, coverage| {
                    renderer.plot_coverage(x0 + x as i32, y0 + y as i32, coverage);
                });
            }
        }

        renderer.painted()
    }
}
