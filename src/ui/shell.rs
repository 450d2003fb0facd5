use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::{self, ViewportCommand};

use crate::config::NAVIGABLE_EXTENSIONS;
use crate::presenter::{Presenter, WindowMode};

/// A pending informational dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoDialog {
    pub title: String,
    pub body: String,
}

// ---------------------------------------------------------------------------
// egui / eframe backed presenter
// ---------------------------------------------------------------------------

/// Presenter for one frame: window changes become viewport commands,
/// dialogs are native (rfd) or drawn by egui on the next frame.
pub struct EguiShell<'a> {
    ctx: &'a egui::Context,
    viewport: [f32; 2],
    dialog: &'a mut Option<InfoDialog>,
}

impl<'a> EguiShell<'a> {
    pub fn new(
        ctx: &'a egui::Context,
        viewport: [f32; 2],
        dialog: &'a mut Option<InfoDialog>,
    ) -> Self {
        Self {
            ctx,
            viewport,
            dialog,
        }
    }
}

impl Presenter for EguiShell<'_> {
    fn viewport_size(&self) -> [f32; 2] {
        self.viewport
    }

    fn pick_image_file(&mut self, start_dir: &Path) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Open image")
            .set_directory(start_dir)
            .add_filter("Images", &NAVIGABLE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
    }

    fn set_title(&mut self, title: &str) {
        self.ctx.send_viewport_cmd(ViewportCommand::Title(title.to_string()));
    }

    fn show_message(&mut self, title: &str, body: &str) {
        *self.dialog = Some(InfoDialog {
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    fn open_folder(&mut self, dir: &Path) -> Result<()> {
        open::that_detached(dir).with_context(|| format!("opening folder {}", dir.display()))
    }

    fn window_mode(&self) -> WindowMode {
        self.ctx.input(|i| {
            let info = i.viewport();
            if info.fullscreen.unwrap_or(false) {
                WindowMode::Fullscreen
            } else if info.maximized.unwrap_or(false) {
                WindowMode::Maximized
            } else {
                WindowMode::Normal
            }
        })
    }

    fn set_window_mode(&mut self, mode: WindowMode) {
        let commands = match mode {
            WindowMode::Fullscreen => vec![ViewportCommand::Fullscreen(true)],
            WindowMode::Maximized => vec![
                ViewportCommand::Fullscreen(false),
                ViewportCommand::Maximized(true),
            ],
            WindowMode::Normal => vec![
                ViewportCommand::Fullscreen(false),
                ViewportCommand::Maximized(false),
            ],
        };
        for cmd in commands {
            self.ctx.send_viewport_cmd(cmd);
        }
    }

    fn request_exit(&mut self) {
        self.ctx.send_viewport_cmd(ViewportCommand::Close);
    }
}
