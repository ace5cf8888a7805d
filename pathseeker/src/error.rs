//! Error types for pathseeker

use thiserror::Error;

/// Errors raised while building a maze or setting up a search.
///
/// An exhausted or cancelled search is not an error, see [`crate::SearchState`].
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("invalid dimensions {rows}x{cols}: both must be at least 2")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid frontier cap {0}: at least one path must advance per round")]
    InvalidFrontierCap(usize),

    #[error("invalid maze layout: {0}")]
    InvalidLayout(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl From<serde_json::Error> for MazeError {
    fn from(e: serde_json::Error) -> Self {
        MazeError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
