// Simulation error types: road mask loading, start validation, playlist setup

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Failed to read road mask '{path}': {source}")]
    MaskRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode road mask '{origin}': {message}")]
    MaskDecode { origin: String, message: String },
    #[error("Road mask has invalid dimensions {width}x{height}")]
    MaskDimensions { width: usize, height: usize },
    #[error("Road mask pixel buffer holds {actual} bytes, expected {expected}")]
    MaskBufferSize { expected: usize, actual: usize },
    #[error("Embedded asset '{0}' is missing")]
    MissingAsset(String),
    #[error("Start position ({x:.1}, {y:.1}) is not on drivable terrain")]
    StartBlocked { x: f64, y: f64 },
    #[error("Playlist needs at least one song")]
    EmptyPlaylist,
}
