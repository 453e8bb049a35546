use thiserror::Error;

#[derive(Debug, Error)]
pub enum MiruroError {
    #[error("config error: {0}")]
    Config(String),

    #[error("preference store error: {0}")]
    Preferences(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
