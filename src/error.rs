use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by viewer commands.
///
/// Decode failures are not part of this taxonomy: a file that cannot be
/// decoded is shown as an empty image.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no image is open")]
    NoCurrentFile,

    #[error("{} is not among the images of its directory", .0.display())]
    NotFound(PathBuf),

    #[error("rotation by {0}° is not a multiple of 90°")]
    UnsupportedRotation(i32),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Image(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
