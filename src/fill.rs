//! Connected-region flood fill.
//!
//! Region growth is 4-connected and driven by an explicit LIFO stack, so the
//! worst-case depth is bounded by memory rather than by the call stack.

use crate::color::{Color, FILL_TOLERANCE};
use crate::pixel_buffer::PixelBuffer;

/// Parameters of the match predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOptions {
    /// Maximum per-channel difference from the seed color.
    pub tolerance: u8,
    /// When the seed pixel is fully transparent, grow over fully transparent
    /// pixels instead of refusing to fill.
    pub transparent_seeds: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            tolerance: FILL_TOLERANCE,
            transparent_seeds: true,
        }
    }
}

impl FillOptions {
    /// Only pixels with positive alpha are fill-eligible; a transparent seed
    /// leaves the buffer untouched.
    pub fn strict() -> Self {
        Self {
            transparent_seeds: false,
            ..Self::default()
        }
    }

    fn matches(&self, pixel: Color, target: Color) -> bool {
        if target.is_transparent() && self.transparent_seeds {
            return pixel.is_transparent();
        }
        pixel.a > 0 && pixel.within_tolerance(target, self.tolerance)
    }
}

/// Fills the region connected to `seed` with `fill_color` using the default options.
/// Returns the number of pixels whose color changed.
pub fn flood_fill(buffer: &mut PixelBuffer, seed: (i32, i32), fill_color: Color) -> usize {
    flood_fill_with(buffer, seed, fill_color, FillOptions::default())
}

/// Fills the region connected to `seed`.
///
/// Filled pixels are always fully opaque regardless of `fill_color.a`.
pub fn flood_fill_with(
    buffer: &mut PixelBuffer,
    seed: (i32, i32),
    fill_color: Color,
    options: FillOptions,
) -> usize {
    let Some(target) = buffer.get(seed.0, seed.1) else {
        return 0;
    };
    let fill = fill_color.opaque();

    if !options.matches(target, target) {
        log::debug!("Fill seed {:?} is not fill-eligible ({:?})", seed, target);
        return 0;
    }

    // A repainted pixel that still matches the target would be revisited forever,
    // so that case tracks visited pixels explicitly. Pixels already within
    // tolerance of the fill color are walked but not rewritten.
    let painted = if options.matches(fill, target) {
        fill_tracking_visited(buffer, seed, target, fill, options)
    } else {
        fill_by_color_change(buffer, seed, target, fill, options)
    };

    log::debug!(
        "Flood fill at {:?}: {} pixels {:?} -> {:?}",
        seed,
        painted,
        target,
        fill
    );
    painted
}

/// A pixel is pushed possibly several times; once repainted it no longer matches
/// the target and later pops are discarded.
fn fill_by_color_change(
    buffer: &mut PixelBuffer,
    seed: (i32, i32),
    target: Color,
    fill: Color,
    options: FillOptions,
) -> usize {
    let mut stack = vec![seed];
    let mut painted = 0;

    while let Some((x, y)) = stack.pop() {
        let Some(pixel) = buffer.get(x, y) else {
            continue;
        };
        if !options.matches(pixel, target) {
            continue;
        }

        buffer.set(x, y, fill);
        painted += 1;

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    painted
}

fn fill_tracking_visited(
    buffer: &mut PixelBuffer,
    seed: (i32, i32),
    target: Color,
    fill: Color,
    options: FillOptions,
) -> usize {
    let width = buffer.width() as usize;
    let mut visited = vec![false; width * buffer.height() as usize];
    let mut stack = vec![seed];
    let mut painted = 0;

    while let Some((x, y)) = stack.pop() {
        let Some(pixel) = buffer.get(x, y) else {
            continue;
        };
        let idx = y as usize * width + x as usize;
        if visited[idx] || !options.matches(pixel, target) {
            continue;
        }
        visited[idx] = true;

        if !already_filled(pixel, fill, options.tolerance) {
            buffer.set(x, y, fill);
            painted += 1;
        }

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    painted
}

fn already_filled(pixel: Color, fill: Color, tolerance: u8) -> bool {
    pixel.within_tolerance(fill, tolerance) && pixel.a.abs_diff(fill.a) <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> Color {
        Color::rgb(v, v, v)
    }

    #[test]
    fn test_transparent_canvas_fills_everything() {
        let mut buffer = PixelBuffer::new(100, 100).unwrap();
        let painted = flood_fill(&mut buffer, (50, 50), Color::RED);
        assert_eq!(painted, 100 * 100);
        assert_eq!(buffer.count(Color::RED), 100 * 100);
    }

    #[test]
    fn test_strict_transparent_seed_is_noop() {
        let mut buffer = PixelBuffer::new(10, 10).unwrap();
        let before = buffer.clone();
        let painted = flood_fill_with(&mut buffer, (5, 5), Color::RED, FillOptions::strict());
        assert_eq!(painted, 0);
        assert!(buffer == before);
    }

    #[test]
    fn test_out_of_bounds_seed() {
        let mut buffer = PixelBuffer::filled(4, 4, Color::WHITE).unwrap();
        assert_eq!(flood_fill(&mut buffer, (-1, 2), Color::RED), 0);
        assert_eq!(flood_fill(&mut buffer, (4, 0), Color::RED), 0);
        assert_eq!(buffer.count(Color::WHITE), 16);
    }

    #[test]
    fn test_tolerance_boundary() {
        let mut buffer = PixelBuffer::filled(3, 1, gray(100)).unwrap();
        buffer.set(1, 0, Color::rgb(132, 100, 100));
        buffer.set(2, 0, Color::rgb(133, 100, 100));

        flood_fill(&mut buffer, (0, 0), Color::RED);
        assert_eq!(buffer.get(0, 0), Some(Color::RED));
        assert_eq!(buffer.get(1, 0), Some(Color::RED));
        assert_eq!(buffer.get(2, 0), Some(Color::rgb(133, 100, 100)));
    }

    #[test]
    fn test_four_connectivity_ignores_diagonals() {
        // Checkerboard: no two white pixels share an edge.
        let mut buffer = PixelBuffer::filled(4, 4, Color::BLACK).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                if (x + y) % 2 == 0 {
                    buffer.set(x, y, Color::WHITE);
                }
            }
        }
        let painted = flood_fill(&mut buffer, (0, 0), Color::RED);
        assert_eq!(painted, 1);
        assert_eq!(buffer.get(1, 1), Some(Color::WHITE));
    }

    #[test]
    fn test_fill_is_always_opaque() {
        let mut buffer = PixelBuffer::filled(5, 5, Color::WHITE).unwrap();
        flood_fill(&mut buffer, (2, 2), Color::rgba(0, 0, 255, 10));
        assert_eq!(buffer.count(Color::rgb(0, 0, 255)), 25);
    }

    #[test]
    fn test_fill_matching_target_terminates() {
        let mut buffer = PixelBuffer::filled(30, 30, gray(100)).unwrap();
        buffer.set(0, 0, gray(200));
        buffer.set(29, 29, gray(125));
        let before = buffer.clone();

        let painted = flood_fill(&mut buffer, (10, 10), gray(110));
        assert_eq!(painted, 0);
        assert!(buffer == before);
    }

    #[test]
    fn test_refilling_with_same_color_is_idempotent() {
        let mut buffer = PixelBuffer::filled(20, 20, Color::WHITE).unwrap();
        for y in 0..20 {
            buffer.set(10, y, Color::BLACK);
        }
        flood_fill(&mut buffer, (3, 3), Color::RED);
        let once = buffer.clone();

        assert_eq!(flood_fill(&mut buffer, (3, 3), Color::RED), 0);
        assert!(buffer == once);
        assert_eq!(flood_fill(&mut buffer, (3, 3), Color::rgb(240, 10, 20)), 0);
        assert!(buffer == once);
        assert_eq!(buffer.get(15, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_matching_fill_still_repaints_pixels_outside_its_tolerance() {
        // 100 matches the 130 seed, but lies 40 away from the 140 fill.
        let mut buffer = PixelBuffer::filled(4, 1, gray(130)).unwrap();
        buffer.set(3, 0, gray(100));

        let painted = flood_fill(&mut buffer, (0, 0), gray(140));
        assert_eq!(painted, 1);
        assert_eq!(buffer.get(0, 0), Some(gray(130)));
        assert_eq!(buffer.get(3, 0), Some(gray(140)));
    }
}
