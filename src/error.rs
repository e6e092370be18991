use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedianError {
    #[error("Window size must be odd, got {0}")]
    EvenWindowSize(usize),

    #[error("Window size {0} is outside the supported range [3, 255]")]
    WindowSizeOutOfRange(usize),

    #[error("Batch size must be at least 1, got {0}")]
    InvalidBatchSize(usize),

    #[error("Padded buffer too small: need {required} samples, have {available}")]
    BufferTooSmall { required: usize, available: usize },

    #[error("Input stream is empty")]
    EmptyStream,

    #[error("Stream already finished")]
    StreamFinished,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MedianError>;
