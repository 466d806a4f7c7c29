// src/renderer.rs
use egui::Pos2;

use crate::color::Color;
use crate::pixel_buffer::PixelBuffer;

/// How line ends are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    /// Half-disc beyond each end point.
    Round,
    /// Half-width square beyond each end point.
    Square,
    /// Ends exactly at the end points.
    Butt,
}

/// How painted pixels combine with what is already in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositing {
    /// Paint on top ("source-over").
    SourceOver,
    /// Clear to transparent regardless of color ("destination-out" with an opaque source).
    Erase,
}

/// Per-interaction record of pixels already painted.
///
/// A pixel is composited at most once per interaction, so translucent strokes
/// do not darken where consecutive segments overlap.
#[derive(Debug, Clone)]
pub struct StrokeMask {
    width: u32,
    touched: Vec<bool>,
}

impl StrokeMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            touched: vec![false; width as usize * height as usize],
        }
    }

    pub fn for_buffer(buffer: &PixelBuffer) -> Self {
        Self::new(buffer.width(), buffer.height())
    }

    /// Forgets every marked pixel, keeping the allocation.
    pub fn reset(&mut self) {
        self.touched.fill(false);
    }

    /// Marks `(x, y)`, returning `true` if it was not marked before.
    fn mark(&mut self, x: i32, y: i32) -> bool {
        let idx = y as usize * self.width as usize + x as usize;
        match self.touched.get_mut(idx) {
            Some(seen) if !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }
}

/// Rasterizes primitives into a [`PixelBuffer`].
///
/// Coverage is binary: a pixel is painted when its center lies inside the shape.
/// Everything is clipped to the buffer.
pub struct Renderer<'a> {
    buffer: &'a mut PixelBuffer,
    color: Color,
    compositing: Compositing,
    mask: Option<&'a mut StrokeMask>,
    painted: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(buffer: &'a mut PixelBuffer, color: Color, compositing: Compositing) -> Self {
        Self {
            buffer,
            color,
            compositing,
            mask: None,
            painted: 0,
        }
    }

    /// Skip pixels already recorded in `mask`.
    pub fn with_mask(mut self, mask: &'a mut StrokeMask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Number of pixels written so far.
    pub fn painted(&self) -> usize {
        self.painted
    }

    /// Composites a single pixel.
    pub fn plot(&mut self, x: i32, y: i32) {
        let Some(dst) = self.buffer.get(x, y) else {
            return;
        };
        if let Some(mask) = self.mask.as_deref_mut() {
            if !mask.mark(x, y) {
                return;
            }
        }
        let out = match self.compositing {
            Compositing::SourceOver => self.color.blend_over(dst),
            Compositing::Erase => Color::TRANSPARENT,
        };
        self.buffer.set(x, y, out);
        self.painted += 1;
    }

    /// Composites a pixel with color alpha scaled by `coverage` (0..=1).
    pub fn plot_coverage(&mut self, x: i32, y: i32, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        let color = self.color;
        let scaled = (color.a as f32 * coverage.min(1.0)).round() as u8;
        if scaled == 0 {
            return;
        }
        self.color = color.with_alpha(scaled);
        self.plot(x, y);
        self.color = color;
    }

    /// Paints every pixel whose center satisfies `inside`, scanning `[min, max]`.
    fn scan(&mut self, min: Pos2, max: Pos2, inside: impl Fn(Pos2) -> bool) {
        let x0 = (min.x.floor() as i32).max(0);
        let y0 = (min.y.floor() as i32).max(0);
        let x1 = (max.x.ceil() as i32).min(self.buffer.width() as i32 - 1);
        let y1 = (max.y.ceil() as i32).min(self.buffer.height() as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                if inside(Pos2::new(x as f32 + 0.5, y as f32 + 0.5)) {
                    self.plot(x, y);
                }
            }
        }
    }

    /// Strokes the segment `from -> to` with the given total `width`.
    pub fn segment(&mut self, from: Pos2, to: Pos2, width: f32, cap: LineCap) {
        let half = (width * 0.5).max(0.5);
        let dir = to - from;
        let len = dir.length();

        let reach = match cap {
            LineCap::Butt => half,
            LineCap::Round | LineCap::Square => half * std::f32::consts::SQRT_2,
        };
        let min = from.min(to) - egui::Vec2::splat(reach);
        let max = from.max(to) + egui::Vec2::splat(reach);

        if len <= f32::EPSILON {
            match cap {
                LineCap::Round => self.scan(min, max, |p| p.distance(from) <= half),
                LineCap::Square => self.scan(min, max, |p| {
                    (p.x - from.x).abs() <= half && (p.y - from.y).abs() <= half
                }),
                LineCap::Butt => {}
            }
            return;
        }

        let unit = dir / len;
        self.scan(min, max, |p| {
            let rel = p - from;
            let along = rel.x * unit.x + rel.y * unit.y;
            let across = (rel.x * unit.y - rel.y * unit.x).abs();
            match cap {
                LineCap::Round => {
                    let t = along.clamp(0.0, len);
                    (rel - unit * t).length() <= half
                }
                LineCap::Square => along >= -half && along <= len + half && across <= half,
                LineCap::Butt => along >= 0.0 && along <= len && across <= half,
            }
        });
    }

    /// Fills the axis-aligned rectangle spanned by two corners, in any drag direction.
    pub fn fill_rect(&mut self, a: Pos2, b: Pos2) {
        let min = a.min(b);
        let max = a.max(b);
        self.scan(min, max, |p| {
            p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
        });
    }

    /// Outlines the rectangle spanned by two corners with square (mitered) corners.
    pub fn stroke_rect(&mut self, a: Pos2, b: Pos2, width: f32) {
        let min = a.min(b);
        let max = a.max(b);
        if min == max {
            return;
        }
        let top_right = Pos2::new(max.x, min.y);
        let bottom_left = Pos2::new(min.x, max.y);
        self.segment(min, top_right, width, LineCap::Square);
        self.segment(top_right, max, width, LineCap::Square);
        self.segment(max, bottom_left, width, LineCap::Square);
        self.segment(bottom_left, min, width, LineCap::Square);
    }

    pub fn fill_circle(&mut self, center: Pos2, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let r = egui::Vec2::splat(radius);
        self.scan(center - r, center + r, |p| p.distance(center) <= radius);
    }

    pub fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32) {
        if radius <= 0.0 {
            return;
        }
        let half = (width * 0.5).max(0.5);
        let r = egui::Vec2::splat(radius + half);
        self.scan(center - r, center + r, |p| {
            (p.distance(center) - radius).abs() <= half
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn buffer() -> PixelBuffer {
        PixelBuffer::new(20, 20).unwrap()
    }

    #[test]
    fn test_fill_rect_any_direction() {
        let mut a = buffer();
        Renderer::new(&mut a, Color::RED, Compositing::SourceOver)
            .fill_rect(pos2(2.0, 3.0), pos2(8.0, 9.0));

        let mut b = buffer();
        Renderer::new(&mut b, Color::RED, Compositing::SourceOver)
            .fill_rect(pos2(8.0, 9.0), pos2(2.0, 3.0));

        assert!(a == b);
        assert_eq!(a.count(Color::RED), 6 * 6);
        assert_eq!(a.get(2, 3), Some(Color::RED));
        assert_eq!(a.get(8, 9), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_horizontal_butt_segment() {
        let mut buf = buffer();
        Renderer::new(&mut buf, Color::BLACK, Compositing::SourceOver).segment(
            pos2(2.0, 10.0),
            pos2(12.0, 10.0),
            2.0,
            LineCap::Butt,
        );
        // Rows 9 and 10, columns 2..12.
        assert_eq!(buf.count(Color::BLACK), 20);
        assert_eq!(buf.get(1, 10), Some(Color::TRANSPARENT));
        assert_eq!(buf.get(12, 10), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_round_cap_extends_past_end() {
        let mut buf = buffer();
        Renderer::new(&mut buf, Color::BLACK, Compositing::SourceOver).segment(
            pos2(5.0, 10.0),
            pos2(10.0, 10.0),
            6.0,
            LineCap::Round,
        );
        assert_eq!(buf.get(3, 10), Some(Color::BLACK));
        assert_eq!(buf.get(12, 9), Some(Color::BLACK));
        assert_eq!(buf.get(14, 10), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_erase_clears_to_transparent() {
        let mut buf = PixelBuffer::filled(10, 10, Color::WHITE).unwrap();
        Renderer::new(&mut buf, Color::RED, Compositing::Erase).fill_rect(
            pos2(0.0, 0.0),
            pos2(5.0, 10.0),
        );
        assert_eq!(buf.count(Color::TRANSPARENT), 50);
        assert_eq!(buf.count(Color::RED), 0);
    }

    #[test]
    fn test_mask_blends_once() {
        let mut buf = PixelBuffer::filled(10, 10, Color::WHITE).unwrap();
        let mut mask = StrokeMask::for_buffer(&buf);
        let translucent = Color::BLACK.with_alpha(128);
        {
            let mut r = Renderer::new(&mut buf, translucent, Compositing::SourceOver)
                .with_mask(&mut mask);
            r.plot(4, 4);
            r.plot(4, 4);
            assert_eq!(r.painted(), 1);
        }
        let once = translucent.blend_over(Color::WHITE);
        assert_eq!(buf.get(4, 4), Some(once));
    }

    #[test]
    fn test_circles() {
        let mut filled = buffer();
        Renderer::new(&mut filled, Color::RED, Compositing::SourceOver)
            .fill_circle(pos2(10.0, 10.0), 5.0);
        assert_eq!(filled.get(10, 10), Some(Color::RED));
        assert_eq!(filled.get(10, 16), Some(Color::TRANSPARENT));

        let mut ring = buffer();
        Renderer::new(&mut ring, Color::RED, Compositing::SourceOver)
            .stroke_circle(pos2(10.0, 10.0), 5.0, 1.0);
        assert_eq!(ring.get(10, 10), Some(Color::TRANSPARENT));
        assert_eq!(ring.get(14, 10), Some(Color::RED));
    }
}
