use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// True when the server could not be reached or answered with something
    /// that is not a metrics envelope. Application failures (`success: false`)
    /// are not transport errors.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport(_) | AppError::Parse(_))
    }
}
