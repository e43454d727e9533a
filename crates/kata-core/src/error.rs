use thiserror::Error;

#[derive(Debug, Error)]
pub enum KataError {
    #[error("no tasks saved for {0}: create a routine with 'devkata new'")]
    EmptyKata(String),

    #[error("unknown kata type: {0}")]
    InvalidKataType(String),

    #[error("backup not found: {0}")]
    BackupNotFound(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KataError>;
