//! Running passes against a hive.

use std::path::Path;

use bem_engine::{Notice, Severity};
use bem_hive::Hive;
use bem_model::{PvRequest, SurfaceRequest};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::scene_service::SurfaceSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    AttachPv,
    AssignSurfaces,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticeRecord {
    pub severity: String,
    pub message: String,
}

impl From<&Notice> for NoticeRecord {
    fn from(notice: &Notice) -> Self {
        Self {
            severity: notice.severity.to_string(),
            message: notice.message.clone(),
        }
    }
}

/// Outcome of one pass as handed to a frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassReport {
    pub kind: PassKind,
    pub transaction: String,
    pub surfaces: Vec<SurfaceSummary>,
    pub notices: Vec<NoticeRecord>,
}

impl PassReport {
    pub fn warning_count(&self) -> usize {
        self.notices
            .iter()
            .filter(|n| n.severity == Severity::Warning.to_string())
            .count()
    }
}

pub fn load_pv_request(path: &Path) -> AppResult<PvRequest> {
    bem_model::load_any(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn load_surface_request(path: &Path) -> AppResult<SurfaceRequest> {
    bem_model::load_any(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Mount PV generators. On abort the hive is left as it was.
pub fn attach_pv(hive: &mut Hive, request: &PvRequest) -> AppResult<PassReport> {
    let mut notices: Vec<Notice> = Vec::new();
    let outcome = hive.engine().attach_pv_generators(request, &mut notices)?;
    Ok(report(PassKind::AttachPv, &outcome, &notices))
}

/// Apply surface declarations. On abort the hive is left as it was.
pub fn assign_surfaces(hive: &mut Hive, request: &SurfaceRequest) -> AppResult<PassReport> {
    let mut notices: Vec<Notice> = Vec::new();
    let outcome = hive
        .engine()
        .assign_surface_attributes(request, &mut notices)?;
    Ok(report(PassKind::AssignSurfaces, &outcome, &notices))
}

fn report(kind: PassKind, outcome: &bem_engine::PassOutcome, notices: &[Notice]) -> PassReport {
    tracing::info!(
        ?kind,
        transaction = %outcome.transaction,
        surfaces = outcome.surfaces.len(),
        "pass committed"
    );
    PassReport {
        kind,
        transaction: outcome.transaction.to_string(),
        surfaces: outcome.surfaces.iter().map(SurfaceSummary::from).collect(),
        notices: notices.iter().map(NoticeRecord::from).collect(),
    }
}
