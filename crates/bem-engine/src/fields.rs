//! Per-surface values after broadcasting and validation.

use bem_core::Power;
use bem_model::{BoundaryCondition, IntegrationMode, SurfaceType};

/// Validated generator fields for one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PvFieldSet {
    pub coverage_fraction: f64,
    pub cell_efficiency: f64,
    pub integration_mode: IntegrationMode,
    pub modules_in_parallel: u32,
    pub modules_in_series: u32,
    pub cost: f64,
    pub rated_power: Power,
}

/// Validated surface declarations; `None` leaves the attribute as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceFieldSet {
    pub name: Option<String>,
    pub surface_type: Option<SurfaceType>,
    pub boundary_condition: Option<BoundaryCondition>,
    pub construction: Option<String>,
    pub material: Option<String>,
}

/// Attribute changes for one surface once the consistency rules have run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfacePlan {
    pub name: Option<String>,
    pub surface_type: Option<SurfaceType>,
    pub boundary_condition: Option<BoundaryCondition>,
    /// Ground and adiabatic surfaces see neither sun nor wind.
    pub shelter: bool,
    /// Canonical library name.
    pub construction: Option<String>,
    /// Canonical library name.
    pub material: Option<String>,
}
