use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to open image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to save image {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("no image is loaded")]
    NoImage,
    #[error("pixel ({x}, {y}) is outside the {width}×{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: &'static str, log: String },
    #[error("shader program failed to link: {log}")]
    Link { log: String },
    #[error("failed to create GL object: {0}")]
    Create(String),
    #[error("no shader program named '{0}'")]
    UnknownProgram(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("the glow renderer is required but no GL context is available")]
    NoGlContext,
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("failed to create GL resource: {0}")]
    Gl(String),
}
