//! Easy Paint - a full-screen scribble pad for small hands
//!
//! Opens straight into a blank canvas with the menu bar hidden.
//! Ctrl+Alt+T brings the menus back.

mod actions;
mod app;
mod dialogs;
mod formats;
mod main_window;
mod scribble;
mod settings;
mod surface;

use app::EasyPaintApp;
use eframe::NativeOptions;
use main_window::WINDOW_TITLE;
use settings::{PaintSettings, APP_NAME};

fn main() -> eframe::Result<()> {
    let _logger = match easycore::logging::init_logging(APP_NAME) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("failed to start logging: {}", e);
            None
        }
    };
    log::info!("Starting {} {}", WINDOW_TITLE, env!("CARGO_PKG_VERSION"));

    let settings = PaintSettings::load_or_default(&PaintSettings::path());

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_fullscreen(settings.fullscreen)
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            easycore::EasyTheme::default().apply(&cc.egui_ctx);
            Box::new(EasyPaintApp::new(cc, &settings))
        }),
    )
}
