use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::CanvasError;
use crate::tools::{ShapeStyle, ToolKind};

/// Brush size in pixels, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BrushSize(u32);

impl BrushSize {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 50;

    /// Rejects sizes outside `1..=50`.
    pub fn new(size: u32) -> Result<Self, CanvasError> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size))
        } else {
            Err(CanvasError::InvalidSize(size))
        }
    }

    /// Clamps into `1..=50`.
    pub fn clamped(size: i64) -> Self {
        Self(size.clamp(Self::MIN as i64, Self::MAX as i64) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }

    /// Size moved by `delta`, clamped.
    pub fn step(self, delta: i32) -> Self {
        Self::clamped(self.0 as i64 + delta as i64)
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u32> for BrushSize {
    type Error = CanvasError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<BrushSize> for u32 {
    fn from(size: BrushSize) -> Self {
        size.0
    }
}

/// The caller-owned drawing configuration, read by the engine before each mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSession {
    pub tool: ToolKind,
    pub color: Color,
    pub size: BrushSize,
    pub shape_style: ShapeStyle,
}

impl Default for ToolSession {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pencil,
            color: Color::BLACK,
            size: BrushSize::default(),
            shape_style: ShapeStyle::Fill,
        }
    }
}

impl ToolSession {
    pub fn new(tool: ToolKind, color: Color, size: BrushSize) -> Self {
        Self {
            tool,
            color,
            size,
            ..Self::default()
        }
    }

    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: BrushSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_shape_style(mut self, style: ShapeStyle) -> Self {
        self.shape_style = style;
        self
    }

    /// Sets the size from unvalidated UI input, clamping into range.
    pub fn set_size_clamped(&mut self, size: i64) {
        let clamped = BrushSize::clamped(size);
        if clamped.get() as i64 != size {
            log::warn!("Brush size {} out of range, clamped to {}", size, clamped.get());
        }
        self.size = clamped;
    }
}
