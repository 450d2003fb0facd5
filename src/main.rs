mod app;
mod config;
mod data;
mod error;
mod presenter;
mod state;
mod surface;
mod ui;

use app::CoreavorApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::default();
    log::debug!("starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Coreavor")
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Coreavor",
        options,
        Box::new(|_cc| Ok(Box::new(CoreavorApp::new(config)))),
    )
}
