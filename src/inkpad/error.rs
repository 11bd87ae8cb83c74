use thiserror::Error;

#[derive(Error, Debug)]
pub enum InkpadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Drawing decode error: {0}")]
    Decode(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Replay error on line {line}: {message}")]
    Replay { line: usize, message: String },
}

impl From<base64::DecodeError> for InkpadError {
    fn from(err: base64::DecodeError) -> Self {
        InkpadError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InkpadError>;
