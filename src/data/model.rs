use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Direction – which sibling to step to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Index of the neighbour of `index` in a list of `len` entries, wrapping
    /// at both ends. `len` must be non-zero.
    pub fn step(self, index: usize, len: usize) -> usize {
        match self {
            Direction::Previous if index == 0 => len - 1,
            Direction::Previous => index - 1,
            Direction::Next if index + 1 >= len => 0,
            Direction::Next => index + 1,
        }
    }
}

// ---------------------------------------------------------------------------
// FileProperties – what "Properties" reports about the current file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProperties {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl FileProperties {
    /// Size is 0 when the file cannot be stat'ed.
    pub fn of(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            size_bytes: file_size(path),
        }
    }
}

impl fmt::Display for FileProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path.display(), self.size_bytes)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Base name of `path`, lossily converted for display.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Status bar text: `"<name> <width>x<height>px <bytes> B"`.
pub fn status_line(name: &str, size: [u32; 2], bytes: u64) -> String {
    format!("{name} {}x{}px {bytes} B", size[0], size[1])
}

/// Zoom readout: effective scale plus the step count on top of the fit.
pub fn zoom_label(scale: f32, steps: i32) -> String {
    if steps == 0 {
        format!("{:.0}%", scale * 100.0)
    } else {
        format!("{:.0}% ({steps:+})", scale * 100.0)
    }
}
