use std::fs;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

/// Quality used for lossy formats when the caller does not pick one.
pub const DEFAULT_EXPORT_QUALITY: f32 = 0.92;

/// Base name of saved pictures.
pub const DEFAULT_FILE_STEM: &str = "drawing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    WebP,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::WebP];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::WebP => "webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::WebP => "image/webp",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "webp" => Some(ExportFormat::WebP),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// `drawing.<ext>`
    pub fn file_name(self) -> String {
        format!("{}.{}", DEFAULT_FILE_STEM, self.extension())
    }
}

fn quality_percent(quality: f32) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
}

/// JPEG has no alpha channel; transparent pixels come out black.
fn flatten(frame: &RgbaImage) -> Vec<u8> {
    frame
        .pixels()
        .flat_map(|p| {
            let [r, g, b, a] = p.0;
            let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
            [scale(r), scale(g), scale(b)]
        })
        .collect()
}

/// Encodes a frame. `quality` in `0.0..=1.0` applies to JPEG only; PNG and WebP are lossless.
pub fn encode_frame(frame: &RgbaImage, format: ExportFormat, quality: f32) -> CanvasResult<Vec<u8>> {
    let (width, height) = frame.dimensions();
    let mut bytes = Vec::new();
    match format {
        ExportFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(frame.as_raw(), width, height, ExtendedColorType::Rgba8)?;
        }
        ExportFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut bytes, quality_percent(quality)).write_image(
                &flatten(frame),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
        ExportFormat::WebP => {
            WebPEncoder::new_lossless(&mut bytes).write_image(
                frame.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
    }
    log::debug!(
        "Encoded {}x{} frame as {} ({} bytes)",
        width,
        height,
        format.mime_type(),
        bytes.len()
    );
    Ok(bytes)
}

/// Encodes a frame in the format named by the path's extension and writes it.
pub fn save_frame(frame: &RgbaImage, path: impl AsRef<Path>, quality: f32) -> CanvasResult<()> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path)
        .ok_or_else(|| CanvasError::UnsupportedFormat(path.display().to_string()))?;
    let bytes = encode_frame(frame, format, quality)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    log::info!("Saved picture to {}", path.display());
    Ok(())
}

/// Decodes a template or previously saved picture.
pub fn decode_image(bytes: &[u8]) -> CanvasResult<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

pub fn load_image(path: impl AsRef<Path>) -> CanvasResult<DynamicImage> {
    let bytes = fs::read(path.as_ref())?;
    decode_image(&bytes)
}

/// True for files the picture loader can open.
pub fn is_image_file(path: &Path) -> bool {
    ExportFormat::from_path(path).is_some()
        || path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "gif" | "bmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame() -> RgbaImage {
        let mut frame = RgbaImage::new(8, 6);
        frame.put_pixel(2, 3, Rgba([255, 0, 0, 255]));
        frame
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ExportFormat::Png.file_name(), "drawing.png");
        assert_eq!(ExportFormat::Jpeg.file_name(), "drawing.jpg");
        assert_eq!(ExportFormat::from_extension("JPEG"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_extension("tiff"), None);
        assert_eq!(ExportFormat::WebP.mime_type(), "image/webp");
    }

    #[test]
    fn test_png_is_lossless() {
        let bytes = encode_frame(&frame(), ExportFormat::Png, DEFAULT_EXPORT_QUALITY).unwrap();
        let decoded = decode_image(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, frame());
    }

    #[test]
    fn test_jpeg_flattens_alpha() {
        let bytes = encode_frame(&frame(), ExportFormat::Jpeg, DEFAULT_EXPORT_QUALITY).unwrap();
        let decoded = decode_image(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 6));
        assert_eq!(decoded.get_pixel(7, 0).0[3], 255);
        assert!(decoded.get_pixel(7, 0).0[0] < 16);
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("raster_canvas_export.tiff");
        assert!(matches!(
            save_frame(&frame(), &path, 0.5),
            Err(CanvasError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_quality_percent() {
        assert_eq!(quality_percent(0.92), 92);
        assert_eq!(quality_percent(0.0), 1);
        assert_eq!(quality_percent(3.0), 100);
    }
}
