use std::sync::Arc;

use image::RgbaImage;

use crate::color::Color;
use crate::error::CanvasError;

/// Immutable full-frame copy of a [`PixelBuffer`].
///
/// Cloning is cheap: the pixels are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the frame.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Width x height RGBA8 pixel storage. This is the source of truth for what is drawn.
///
/// `pixels().len() == width * height * 4` holds for the lifetime of the buffer;
/// changing dimensions means building a new buffer (see [`PixelBuffer::resized`]).
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Creates a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        Ok(Self {
            image: RgbaImage::new(width, height),
        })
    }

    /// Creates a buffer filled with `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, CanvasError> {
        let mut buffer = Self::new(width, height)?;
        buffer.clear(color);
        Ok(buffer)
    }

    pub fn from_image(image: RgbaImage) -> Result<Self, CanvasError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(CanvasError::InvalidDimensions {
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(Color::from(*self.image.get_pixel(x as u32, y as u32)))
    }

    /// Writes a pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            self.image.put_pixel(x as u32, y as u32, color.into());
        }
    }

    /// Reads at a floating pointer position, rounded to the nearest pixel.
    pub fn get_at(&self, pos: egui::Pos2) -> Option<Color> {
        self.get(pos.x.round() as i32, pos.y.round() as i32)
    }

    pub fn clear(&mut self, color: Color) {
        let px: image::Rgba<u8> = color.into();
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width(),
            height: self.height(),
            pixels: Arc::from(self.image.as_raw().as_slice()),
        }
    }

    /// Replaces the entire contents with `snapshot` in one step.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), CanvasError> {
        if (snapshot.width, snapshot.height) != self.size() {
            return Err(CanvasError::DimensionMismatch {
                expected: self.size(),
                found: (snapshot.width, snapshot.height),
            });
        }
        let raw: &mut [u8] = &mut self.image;
        raw.copy_from_slice(&snapshot.pixels);
        Ok(())
    }

    /// Copy of the current frame for external encoders.
    pub fn export_frame(&self) -> RgbaImage {
        self.image.clone()
    }

    /// New buffer of the given size holding this buffer's pixels anchored at
    /// the top-left corner; pixels outside the new bounds are cropped.
    pub fn resized(&self, width: u32, height: u32) -> Result<Self, CanvasError> {
        let mut resized = Self::new(width, height)?;
        image::imageops::replace(&mut resized.image, &self.image, 0, 0);
        Ok(resized)
    }

    /// Pixels for uploading as an egui texture.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.image.as_raw(),
        )
    }

    /// Number of pixels equal to `color`.
    pub fn count(&self, color: Color) -> usize {
        let px: image::Rgba<u8> = color.into();
        self.image.pixels().filter(|p| **p == px).count()
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
