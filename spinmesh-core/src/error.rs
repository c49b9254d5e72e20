/// Error types for the viewport, its config and its render surfaces
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config read error: {0}")]
    ReadError(String),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("position buffer length {0} is not a whole number of triangles (expected a multiple of 9)")]
    RaggedBuffer(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("fullscreen request denied: {0}")]
    FullscreenDenied(String),

    #[error("drawing context unavailable: {0}")]
    ContextUnavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
