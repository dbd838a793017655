// errors.rs
use thiserror::Error;

/// Errors originating from the dedup job itself (validation, merge
/// preconditions) or from downstream layers (SQLite, file IO, JSON).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Property {property_id} still owns {remaining} child records after re-pointing")]
    ChildrenRemain { property_id: String, remaining: i64 },
}

pub type AppResult<T> = Result<T, AppError>;
