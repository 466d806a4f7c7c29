use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::canvas::Canvas;

/// Keeps the canvas buffer uploaded as a single egui texture, re-uploading
/// only when the canvas revision or size changes.
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    /// Revision and size of the last upload
    uploaded: Option<(u64, (u32, u32))>,
    uploads: usize,
}

impl CanvasTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture showing the current canvas contents.
    pub fn texture_id(&mut self, ctx: &Context, canvas: &Canvas) -> TextureId {
        let key = (canvas.revision(), canvas.size());
        if let Some(handle) = &self.handle {
            if self.uploaded == Some(key) {
                return handle.id();
            }
        }

        let image = canvas.buffer().to_color_image();
        let same_size = self.uploaded.map(|(_, size)| size) == Some(key.1);
        if let (Some(handle), true) = (self.handle.as_mut(), same_size) {
            handle.set(image, TextureOptions::NEAREST);
        } else {
            self.handle = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST));
        }
        self.uploaded = Some(key);
        self.uploads += 1;
        log::trace!("Uploaded canvas revision {}", key.0);

        match &self.handle {
            Some(handle) => handle.id(),
            None => TextureId::default(),
        }
    }

    /// Forces the next call to upload again.
    pub fn invalidate(&mut self) {
        self.uploaded = None;
    }

    /// Number of uploads so far.
    pub fn upload_count(&self) -> usize {
        self.uploads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasConfig;
    use crate::session::ToolSession;
    use crate::tools::ToolKind;

    fn canvas() -> Canvas {
        let config = CanvasConfig {
            width: 8,
            height: 8,
            history_capacity: 4,
        };
        Canvas::with_seed(&config, 0).unwrap()
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let canvas = canvas();
        let mut texture = CanvasTexture::new();

        let first = texture.texture_id(&ctx, &canvas);
        let second = texture.texture_id(&ctx, &canvas);
        assert_eq!(first, second);
        assert_eq!(texture.upload_count(), 1);
    }

    #[test]
    fn test_reupload_on_change() {
        let ctx = Context::default();
        let mut canvas = canvas();
        let mut texture = CanvasTexture::new();
        let first = texture.texture_id(&ctx, &canvas);

        let session = ToolSession::default().with_tool(ToolKind::Bucket);
        canvas.pointer_down(&session, egui::pos2(1.0, 1.0));
        let second = texture.texture_id(&ctx, &canvas);
        assert_eq!(first, second);
        assert_eq!(texture.upload_count(), 2);

        canvas.resize(4, 4).unwrap();
        texture.texture_id(&ctx, &canvas);
        assert_eq!(texture.upload_count(), 3);
    }

    #[test]
    fn test_invalidate() {
        let ctx = Context::default();
        let canvas = canvas();
        let mut texture = CanvasTexture::new();
        texture.texture_id(&ctx, &canvas);
        texture.invalidate();
        texture.texture_id(&ctx, &canvas);
        assert_eq!(texture.upload_count(), 2);
    }
}
