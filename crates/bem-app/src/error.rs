//! Error types for the bem-app service layer.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read {path}: {message}")]
    FileRead { path: PathBuf, message: String },

    #[error("Failed to write {path}: {message}")]
    FileWrite { path: PathBuf, message: String },

    #[error("Scene validation failed: {0}")]
    Validation(String),

    #[error("Hive error: {0}")]
    Hive(String),

    #[error("Failed to render output: {0}")]
    Output(String),

    #[error("Pass aborted: {0}")]
    Pass(#[from] bem_engine::EngineError),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<bem_hive::HiveError> for AppError {
    fn from(err: bem_hive::HiveError) -> Self {
        AppError::Hive(err.to_string())
    }
}
