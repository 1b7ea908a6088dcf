use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Replay format error: {0}")]
    ReplayFormat(String),

    #[error("BVH parse error: {0}")]
    BvhParse(String),

    #[error("Not enough camera samples to resample: found {found}, need at least 2")]
    InsufficientSamples { found: usize },

    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f64),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Operation cancelled by user")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
