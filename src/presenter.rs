use std::path::{Path, PathBuf};

use anyhow::Result;

/// How the main window is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    Normal,
    Maximized,
    Fullscreen,
}

/// Window and dialog capabilities the viewer needs from its host.
///
/// The viewer never talks to the GUI toolkit directly; everything that
/// touches the window, a native dialog or the desktop goes through here.
pub trait Presenter {
    /// Size in points of the area the image is drawn into.
    fn viewport_size(&self) -> [f32; 2];

    /// Ask the user for an image file. `None` when cancelled.
    fn pick_image_file(&mut self, start_dir: &Path) -> Option<PathBuf>;

    fn set_title(&mut self, title: &str);

    /// Informational dialog (no choices).
    fn show_message(&mut self, title: &str, body: &str);

    /// Open `dir` in the desktop's file manager.
    fn open_folder(&mut self, dir: &Path) -> Result<()>;

    fn window_mode(&self) -> WindowMode;

    fn set_window_mode(&mut self, mode: WindowMode);

    /// Ask the host to close the application.
    fn request_exit(&mut self);
}
