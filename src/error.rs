//! Error types for scene construction and the per-frame update.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid scene configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown scene `{0}`")]
    UnknownScene(String),

    #[error("world already holds a registered particle set")]
    AlreadyRegistered,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),

    #[error("pixel buffer holds {actual} bytes, expected {expected} for a {width}x{height} RGBA image")]
    ImageBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;
