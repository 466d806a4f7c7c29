use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::canvas::Canvas;
use crate::command::{Command, CommandContext, CommandOutcome, CommandResult};
use crate::error::CanvasResult;
use crate::event::{CanvasEvent, EventLog};
use crate::export::{self, DEFAULT_EXPORT_QUALITY, ExportFormat};
use crate::input::{InputHandler, route_event};
use crate::panels::{central_panel, status_bar, tools_panel};
use crate::session::ToolSession;
use crate::state::Settings;
use crate::texture_manager::CanvasTexture;

/// The desktop paint application.
pub struct PaintApp {
    settings: Settings,
    canvas: Canvas,
    input: InputHandler,
    texture: CanvasTexture,
    events: Rc<RefCell<EventLog>>,
    /// Format and quality used by the save button
    pub export_format: ExportFormat,
    pub export_quality: f32,
    /// Directory pictures are saved into
    save_dir: PathBuf,
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    ///
    /// Settings stored by eframe win over `settings`, which usually come from a file.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> CanvasResult<Self> {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<Settings>(storage, eframe::APP_KEY))
            .unwrap_or(settings);
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> CanvasResult<Self> {
        let canvas = Canvas::new(&settings.canvas)?;
        let events = Rc::new(RefCell::new(EventLog::default()));
        canvas.subscribe(Box::new(events.clone()));

        Ok(Self {
            settings,
            canvas,
            input: InputHandler::new(),
            texture: CanvasTexture::new(),
            events,
            export_format: ExportFormat::default(),
            export_quality: DEFAULT_EXPORT_QUALITY,
            save_dir: std::env::current_dir().unwrap_or_default(),
            status: None,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn session(&self) -> &ToolSession {
        &self.settings.session
    }

    pub fn session_mut(&mut self) -> &mut ToolSession {
        &mut self.settings.session
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn texture_id(&mut self, ctx: &egui::Context) -> egui::TextureId {
        self.texture.texture_id(ctx, &self.canvas)
    }

    /// Executes a command from a button, reporting failures in the status line.
    pub fn execute(&mut self, command: Command) {
        let mut ctx = CommandContext::new(&mut self.canvas, &mut self.settings.session);
        let result = command.execute(&mut ctx);
        self.handle_result(result);
    }

    /// Feeds this frame's input to the canvas shown in `canvas_rect`.
    pub fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        let events = self.input.process_input(ctx, canvas_rect, self.canvas.size());
        for event in events {
            let result = route_event(&event, &mut self.canvas, &mut self.settings.session);
            self.handle_result(result);
        }
    }

    fn handle_result(&mut self, result: CommandResult) {
        match result {
            Ok(CommandOutcome::SaveRequested(format)) => self.save_picture(format),
            Ok(_) => {}
            Err(err) => {
                log::error!("{}", err);
                self.status = Some(err.to_string());
            }
        }
    }

    /// Saves the frame as `drawing.<ext>` in the save directory.
    pub fn save_picture(&mut self, format: ExportFormat) {
        let path = self.save_dir.join(format.file_name());
        self.status = Some(
            match export::save_frame(&self.canvas.export_frame(), &path, self.export_quality) {
                Ok(()) => format!("Saved {}", path.display()),
                Err(err) => {
                    log::error!("Saving {} failed: {}", path.display(), err);
                    format!("Save failed: {}", err)
                }
            },
        );
    }

    /// Loads dropped image files as templates.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        // Only the last dropped picture matters; each template replaces the previous one.
        let Some(file) = dropped.into_iter().last() else {
            return;
        };

        let image = match (&file.path, &file.bytes) {
            (Some(path), _) if export::is_image_file(path) => export::load_image(path),
            (_, Some(bytes)) => export::decode_image(bytes),
            _ => {
                log::warn!("Dropped file is not a supported type: {}", file.name);
                return;
            }
        };
        let result = image.and_then(|image| self.canvas.load_template(&image));
        if let Err(err) = result {
            log::error!("Cannot load template {}: {}", file.name, err);
            self.status = Some(format!("Cannot open {}: {}", file.name, err));
        }
    }

    fn drain_events(&mut self) {
        let events = self.events.borrow_mut().drain();
        for event in events {
            match event {
                CanvasEvent::TemplateLoaded { width, height } => {
                    self.status = Some(format!("Template {}x{} loaded", width, height));
                }
                CanvasEvent::Resized { width, height } => {
                    self.settings.canvas.width = width;
                    self.settings.canvas.height = height;
                }
                CanvasEvent::Cleared => self.status = None,
                _ => {}
            }
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        tools_panel(self, ctx);
        status_bar(self, ctx);
        central_panel(self, ctx);

        self.drain_events();
    }
}
