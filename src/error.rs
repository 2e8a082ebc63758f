use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QvizError>;

#[derive(Debug, Error)]
pub enum QvizError {
    #[error("Failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("No usable system font found (tried {0})")]
    FontLookup(String),

    #[error("Failed to launch image viewer: {0}")]
    Viewer(String),
}
