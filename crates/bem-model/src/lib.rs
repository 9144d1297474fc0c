//! bem-model: surface entities, attached devices, pass requests and scene files.

pub mod channel;
pub mod generator;
pub mod request;
pub mod scene;
pub mod surface;

pub use channel::Channel;
pub use generator::{IntegrationMode, Inverter, PvGenerator};
pub use request::{PvRequest, SurfaceRequest, TypeCode};
pub use scene::{Scene, SurfaceDef};
pub use surface::{BoundaryCondition, SunExposure, Surface, SurfaceType, WindExposure};

use serde::Serialize;
use serde::de::DeserializeOwned;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("Unknown {what}: {value}")]
    UnknownVariant { what: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml<T: DeserializeOwned>(path: &std::path::Path) -> ModelResult<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

pub fn save_yaml<T: Serialize>(path: &std::path::Path, value: &T) -> ModelResult<()> {
    let content = serde_yaml::to_string(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &std::path::Path) -> ModelResult<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_json<T: Serialize>(path: &std::path::Path, value: &T) -> ModelResult<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Picks the loader from the file extension (`.json`, otherwise YAML).
pub fn load_any<T: DeserializeOwned>(path: &std::path::Path) -> ModelResult<T> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
