use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::{Command, Viewer};
use crate::ui::canvas::{self, ImageTexture};
use crate::ui::panels;
use crate::ui::shell::{EguiShell, InfoDialog};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CoreavorApp {
    viewer: Viewer,
    texture: ImageTexture,
    /// Last viewport size the image was fitted against.
    viewport: Option<[f32; 2]>,
    dialog: Option<InfoDialog>,
    /// Last failed command, shown in the status bar.
    error: Option<String>,
}

impl CoreavorApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            viewer: Viewer::new(config),
            texture: ImageTexture::default(),
            viewport: None,
            dialog: None,
            error: None,
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, viewport: [f32; 2], commands: Vec<Command>) {
        let mut shell = EguiShell::new(ctx, viewport, &mut self.dialog);
        for command in commands {
            let label = format!("{command:?}");
            let user_action = !matches!(command, Command::Resized(_));
            match self.viewer.handle(command, &mut shell) {
                Ok(()) if user_action => self.error = None,
                Ok(()) => {}
                Err(e) => {
                    log::error!("{label} failed: {e:#}");
                    self.error = Some(format!("Error: {e}"));
                }
            }
        }
    }
}

impl eframe::App for CoreavorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut commands = Vec::new();
        panels::shortcuts(ctx, &mut commands);

        // ---- Top panel: menu bar + toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut commands);
        });

        // ---- Bottom panel: status line ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.viewer, self.error.as_deref());
        });

        // ---- Central panel: image ----
        self.texture.sync(ctx, &self.viewer);
        let viewport = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::image_view(ui, &self.viewer, &self.texture, &mut commands))
            .inner;

        panels::info_dialog(ctx, &mut self.dialog);

        if self.viewport != Some(viewport) {
            self.viewport = Some(viewport);
            commands.insert(0, Command::Resized(viewport));
        }

        if !commands.is_empty() {
            self.dispatch(ctx, viewport, commands);
            ctx.request_repaint();
        }
    }
}
