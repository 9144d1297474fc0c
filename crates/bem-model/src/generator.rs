//! Photovoltaic generators and the inverter they share.

use std::fmt;
use std::sync::Arc;

use bem_core::Power;
use serde::{Deserialize, Serialize};

/// Heat transfer integration mode of a PV generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IntegrationMode {
    #[default]
    Decoupled,
    DecoupledUllebergDynamic,
    IntegratedSurfaceOutsideFace,
    IntegratedTranspiredCollector,
    IntegratedExteriorVentedCavity,
    PhotovoltaicThermalSolarCollector,
}

const INTEGRATION_MODES: [(IntegrationMode, i64, &str); 6] = [
    (IntegrationMode::Decoupled, 1, "Decoupled"),
    (
        IntegrationMode::DecoupledUllebergDynamic,
        2,
        "DecoupledUllebergDynamic",
    ),
    (
        IntegrationMode::IntegratedSurfaceOutsideFace,
        3,
        "IntegratedSurfaceOutsideFace",
    ),
    (
        IntegrationMode::IntegratedTranspiredCollector,
        4,
        "IntegratedTranspiredCollector",
    ),
    (
        IntegrationMode::IntegratedExteriorVentedCavity,
        5,
        "IntegratedExteriorVentedCavity",
    ),
    (
        IntegrationMode::PhotovoltaicThermalSolarCollector,
        6,
        "PhotovoltaicThermalSolarCollector",
    ),
];

impl IntegrationMode {
    pub const MIN_CODE: i64 = 1;
    pub const MAX_CODE: i64 = 6;

    pub fn from_code(code: i64) -> Option<Self> {
        INTEGRATION_MODES
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(m, _, _)| *m)
    }

    pub fn code(self) -> i64 {
        INTEGRATION_MODES
            .iter()
            .find(|(m, _, _)| *m == self)
            .map(|(_, c, _)| *c)
            .unwrap_or(Self::MIN_CODE)
    }

    pub fn name(self) -> &'static str {
        INTEGRATION_MODES
            .iter()
            .find(|(m, _, _)| *m == self)
            .map(|(_, _, n)| *n)
            .unwrap_or("Decoupled")
    }
}

impl fmt::Display for IntegrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inverter servicing every generator of one pass. Owned by the resource store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inverter {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default = "default_inverter_efficiency")]
    pub efficiency: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_years: Option<u32>,
}

fn default_inverter_efficiency() -> f64 {
    0.9
}

/// One PV generator mounted on one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PvGenerator {
    pub name: String,
    /// Surface (or shading sub-face) the generator is exported against.
    pub surface_name: String,
    /// Simple performance object name, always synthesized.
    pub performance_name: String,
    pub integration_mode: IntegrationMode,
    pub modules_in_parallel: u32,
    pub modules_in_series: u32,
    pub cost: f64,
    pub rated_power: Power,
    pub coverage_fraction: f64,
    pub cell_efficiency: f64,
    /// Shared with every generator of the same pass. Serde writes the full
    /// inverter per generator, so deserialized generators hold equal but
    /// separate copies; look the inverter up again by `handle` to share it.
    pub inverter: Arc<Inverter>,
}

impl PvGenerator {
    pub fn module_count(&self) -> u32 {
        self.modules_in_parallel * self.modules_in_series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_table_is_exhaustive() {
        let expected = [
            "Decoupled",
            "DecoupledUllebergDynamic",
            "IntegratedSurfaceOutsideFace",
            "IntegratedTranspiredCollector",
            "IntegratedExteriorVentedCavity",
            "PhotovoltaicThermalSolarCollector",
        ];
        for (i, name) in expected.iter().enumerate() {
            let code = i as i64 + 1;
            let mode = IntegrationMode::from_code(code).unwrap();
            assert_eq!(mode.name(), *name);
            assert_eq!(mode.code(), code);
        }
        assert_eq!(IntegrationMode::from_code(0), None);
        assert_eq!(IntegrationMode::from_code(7), None);
    }
}
