use serde::{Deserialize, Serialize};

use crate::error::CanvasError;

/// Maximum per-channel difference still considered "the same color" by flood fill.
pub const FILL_TOLERANCE: u8 = 32;

/// Alpha used by the marker tool (`#rrggbb80`).
pub const MARKER_ALPHA: u8 = 0x80;

/// Unpremultiplied RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(px: [u8; 4]) -> Self {
        Self::rgba(px[0], px[1], px[2], px[3])
    }

    /// Same color with a replaced alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    pub const fn opaque(self) -> Self {
        self.with_alpha(255)
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// True when every color channel of `self` lies within `tolerance` of `target`.
    /// Alpha is not compared.
    pub fn within_tolerance(self, target: Color, tolerance: u8) -> bool {
        self.r.abs_diff(target.r) <= tolerance
            && self.g.abs_diff(target.g) <= tolerance
            && self.b.abs_diff(target.b) <= tolerance
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, CanvasError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| CanvasError::InvalidColor(hex.to_owned()))
        };
        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(CanvasError::InvalidColor(hex.to_owned())),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Source-over compositing of `self` onto `dst`, both unpremultiplied.
    pub fn blend_over(self, dst: Color) -> Color {
        match self.a {
            255 => return self,
            0 => return dst,
            _ => {}
        }
        let sa = self.a as f32 / 255.0;
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| {
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color::rgba(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            (out_a * 255.0).round() as u8,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(px: image::Rgba<u8>) -> Self {
        Self::from_array(px.0)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(color: Color) -> Self {
        image::Rgba(color.to_array())
    }
}

impl From<egui::Color32> for Color {
    fn from(color: egui::Color32) -> Self {
        Self::from_array(color.to_srgba_unmultiplied())
    }
}

impl From<Color> for egui::Color32 {
    fn from(color: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_boundary() {
        let target = Color::rgb(100, 100, 100);
        assert!(Color::rgb(132, 100, 100).within_tolerance(target, FILL_TOLERANCE));
        assert!(!Color::rgb(133, 100, 100).within_tolerance(target, FILL_TOLERANCE));
        assert!(Color::rgb(68, 100, 100).within_tolerance(target, FILL_TOLERANCE));
        assert!(!Color::rgb(67, 100, 100).within_tolerance(target, FILL_TOLERANCE));
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#ff0000").unwrap(), Color::RED);
        assert_eq!(
            Color::from_hex("00ff0080").unwrap(),
            Color::rgba(0, 255, 0, 0x80)
        );
        assert!(Color::from_hex("#ff00").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert_eq!(Color::rgb(1, 2, 255).to_hex(), "#0102ff");
    }

    #[test]
    fn test_blend_over() {
        let dst = Color::WHITE;
        assert_eq!(Color::RED.blend_over(dst), Color::RED);
        assert_eq!(Color::TRANSPARENT.blend_over(dst), dst);

        let half_black = Color::BLACK.with_alpha(MARKER_ALPHA);
        let mixed = half_black.blend_over(dst);
        assert_eq!(mixed.a, 255);
        assert!(mixed.r > 120 && mixed.r < 135);

        // Painting onto transparent keeps the source color and alpha.
        let on_clear = half_black.blend_over(Color::TRANSPARENT);
        assert_eq!(on_clear, half_black);
    }
}
