use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing required config value '{0}' (set it in the config file or environment)")]
    MissingConfig(&'static str),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid batch file: {0}")]
    InvalidBatch(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
