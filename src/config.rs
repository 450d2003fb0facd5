use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Viewer configuration (in-code defaults, nothing is persisted)
// ---------------------------------------------------------------------------

/// Extensions the Previous / Next navigation steps through.
pub const NAVIGABLE_EXTENSIONS: [&str; 5] = ["png", "gif", "jpg", "jpeg", "svg"];

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Directory the open dialog starts in.
    pub default_dir: PathBuf,
    /// Inner window size at startup.
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Multiplier applied per zoom step.
    pub zoom_factor: f32,
    /// Lowest allowed zoom step (zoom out).
    pub min_zoom_step: i32,
    /// Highest allowed zoom step (zoom in).
    pub max_zoom_step: i32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_dir: default_picture_dir(),
            window_size: [560.0, 420.0],
            min_window_size: [240.0, 180.0],
            zoom_factor: 1.2,
            min_zoom_step: -8,
            max_zoom_step: 12,
        }
    }
}

fn default_picture_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
}
