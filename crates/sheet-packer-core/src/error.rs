use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetPackerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "image")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid maximum dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error(
        "Out of space: a {width}x{height} sheet placed {placed} of {total} images; raise the maximum size"
    )]
    CapacityExhausted {
        width: u32,
        height: u32,
        placed: usize,
        total: usize,
    },
    #[error("Placer failed on a {width}x{height} sheet after {placed} images: {message}")]
    PlacerFault {
        width: u32,
        height: u32,
        placed: usize,
        message: String,
    },
    #[error("Layout search cancelled after {trials} trials (last size {width}x{height})")]
    Cancelled { trials: usize, width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, SheetPackerError>;
