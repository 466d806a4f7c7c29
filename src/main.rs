#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use raster_canvas::{PaintApp, Settings};

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // An optional settings file: `raster_canvas path/to/settings.json`
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Raster Canvas"),
        ..Default::default()
    };
    eframe::run_native(
        "raster_canvas",
        native_options,
        Box::new(move |cc| Ok(Box::new(PaintApp::new(cc, settings)?))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
