//! Caller-facing inputs of the two pass variants.

use bem_core::EntityId;
use serde::{Deserialize, Serialize};

use crate::Channel;
use crate::surface::SurfaceType;

/// Inputs for mounting one PV generator on each listed surface.
///
/// Every channel is matched positionally against `surfaces`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PvRequest {
    #[serde(default)]
    pub surfaces: Vec<Option<EntityId>>,
    #[serde(default)]
    pub names: Channel<String>,
    #[serde(default)]
    pub coverage_fraction: Channel<f64>,
    #[serde(default)]
    pub cell_efficiency: Channel<f64>,
    #[serde(default)]
    pub integration_mode: Channel<i64>,
    #[serde(default)]
    pub modules_in_parallel: Channel<i64>,
    #[serde(default)]
    pub modules_in_series: Channel<i64>,
    #[serde(default)]
    pub cost: Channel<f64>,
    #[serde(default)]
    pub rated_power_w: Channel<f64>,
    /// Inverter handles; exactly one is required.
    #[serde(default)]
    pub inverters: Vec<String>,
}

/// Surface type as written by a caller: a numeric code or a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeCode {
    Code(f64),
    Name(String),
}

impl TypeCode {
    pub fn resolve(&self) -> Option<SurfaceType> {
        match self {
            TypeCode::Code(code) => SurfaceType::from_code(*code),
            TypeCode::Name(name) => match name.trim().parse::<f64>() {
                Ok(code) => SurfaceType::from_code(code),
                Err(_) => SurfaceType::from_name(name),
            },
        }
    }
}

impl std::fmt::Display for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeCode::Code(code) => write!(f, "{}", code),
            TypeCode::Name(name) => f.write_str(name),
        }
    }
}

impl From<SurfaceType> for TypeCode {
    fn from(t: SurfaceType) -> Self {
        TypeCode::Code(t.code())
    }
}

/// Inputs for declaring attributes on existing surfaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRequest {
    #[serde(default)]
    pub surfaces: Vec<Option<EntityId>>,
    #[serde(default)]
    pub names: Channel<String>,
    #[serde(default)]
    pub surface_type: Channel<TypeCode>,
    #[serde(default)]
    pub boundary_condition: Channel<String>,
    #[serde(default)]
    pub construction: Channel<String>,
    #[serde(default)]
    pub material: Channel<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_code_accepts_numbers_and_names() {
        assert_eq!(TypeCode::Code(2.5).resolve(), Some(SurfaceType::SlabOnGrade));
        assert_eq!(TypeCode::Name("4".into()).resolve(), Some(SurfaceType::AirWall));
        assert_eq!(TypeCode::Name("window".into()).resolve(), Some(SurfaceType::Window));
        assert_eq!(TypeCode::Code(9.0).resolve(), None);
    }

    #[test]
    fn pv_request_from_yaml() {
        let yaml = r#"
surfaces: [a1, a2, a3]
coverage_fraction: 0.8
cell_efficiency: [0.15, 0.18]
integration_mode: 1
cost: 1200
rated_power_w: 250
inverters: [inv-1]
"#;
        let request: PvRequest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(request.surfaces.len(), 3);
        assert_eq!(request.coverage_fraction.values(), &[0.8]);
        assert_eq!(request.cell_efficiency.len(), 2);
        assert!(request.names.is_empty());
        assert!(request.modules_in_parallel.is_empty());
        assert_eq!(request.cost.values(), &[1200.0]);
    }
}
