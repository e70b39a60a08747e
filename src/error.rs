use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaqError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Keyword '{keyword}' points to unknown entry '{target}'")]
    DanglingKeyword { keyword: String, target: String },

    #[error("Unknown message id: {0}")]
    UnknownMessage(u64),

    #[error("Pass rate {actual:.4} below required {required:.4}")]
    BelowRequiredPassRate { actual: f32, required: f32 },
}

pub type Result<T> = std::result::Result<T, FaqError>;
