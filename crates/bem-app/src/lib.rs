//! Shared application service layer for the surface attribute engine.
//!
//! Loads scenes and pass requests from disk, seeds an in-memory hive and runs
//! passes against it, returning serializable reports for the CLI.

pub mod error;
pub mod pass_service;
pub mod scene_service;

pub use bem_hive::Hive;
pub use error::{AppError, AppResult};
pub use pass_service::{
    NoticeRecord, PassKind, PassReport, attach_pv, assign_surfaces, load_pv_request,
    load_surface_request,
};
pub use scene_service::{
    GeneratorSummary, SurfaceSummary, build_hive, list_surfaces, load_scene, save_surfaces,
    validate_scene,
};
