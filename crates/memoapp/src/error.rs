use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoError {
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Memo not found: {0}")]
    MemoNotFound(String),

    #[error("Cannot delete the last remaining folder")]
    LastFolder,

    #[error("Folder name must not be empty")]
    InvalidFolderName,

    #[error("Invalid import data: {0}")]
    InvalidImport(String),

    #[error("Storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MemoError>;
