//! Surface entities and their classification enums.

use std::fmt;
use std::str::FromStr;

use bem_core::{EntityId, Tolerances, degrees, nearly_equal, radians};
use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::generator::PvGenerator;

/// Physical role of a surface.
///
/// Each role carries a numeric code. Underground variants sit half a step (or
/// a quarter step for slabs) above the role they derive from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceType {
    Wall,
    UndergroundWall,
    Roof,
    UndergroundCeiling,
    Floor,
    UndergroundSlab,
    SlabOnGrade,
    ExposedFloor,
    Ceiling,
    AirWall,
    Window,
    Shading,
}

const SURFACE_TYPES: [(SurfaceType, f64, &str); 12] = [
    (SurfaceType::Wall, 0.0, "Wall"),
    (SurfaceType::UndergroundWall, 0.5, "UndergroundWall"),
    (SurfaceType::Roof, 1.0, "Roof"),
    (SurfaceType::UndergroundCeiling, 1.5, "UndergroundCeiling"),
    (SurfaceType::Floor, 2.0, "Floor"),
    (SurfaceType::UndergroundSlab, 2.25, "UndergroundSlab"),
    (SurfaceType::SlabOnGrade, 2.5, "SlabOnGrade"),
    (SurfaceType::ExposedFloor, 2.75, "ExposedFloor"),
    (SurfaceType::Ceiling, 3.0, "Ceiling"),
    (SurfaceType::AirWall, 4.0, "AirWall"),
    (SurfaceType::Window, 5.0, "Window"),
    (SurfaceType::Shading, 6.0, "Shading"),
];

/// Faces tilted less than this from +Z are roofs; more than 180° minus this are floors.
pub const MAX_ROOF_TILT_DEG: f64 = 30.0;

impl SurfaceType {
    pub fn code(self) -> f64 {
        SURFACE_TYPES
            .iter()
            .find(|(t, _, _)| *t == self)
            .map(|(_, code, _)| *code)
            .unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        SURFACE_TYPES
            .iter()
            .find(|(t, _, _)| *t == self)
            .map(|(_, _, name)| *name)
            .unwrap_or("Wall")
    }

    /// Integer part of the code; underground variants share it with their base role.
    pub fn base_code(self) -> u8 {
        self.code().trunc() as u8
    }

    pub fn from_code(code: f64) -> Option<Self> {
        let tol = Tolerances::default();
        SURFACE_TYPES
            .iter()
            .find(|(_, c, _)| nearly_equal(*c, code, tol))
            .map(|(t, _, _)| *t)
    }

    /// Case-insensitive name lookup; spaces and underscores are ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect();
        SURFACE_TYPES
            .iter()
            .find(|(_, _, n)| n.eq_ignore_ascii_case(&wanted))
            .map(|(t, _, _)| *t)
    }

    /// Variant taken when the surface is placed against the ground: the base
    /// code shifted by half a step. Types already underground map onto
    /// themselves through their base code.
    pub fn underground(self) -> Option<Self> {
        Self::from_code(f64::from(self.base_code()) + 0.5)
    }

    /// Classifies a face by the tilt of its normal from +Z.
    pub fn from_normal(normal: [f64; 3]) -> Self {
        let [x, y, z] = normal;
        let len = (x * x + y * y + z * z).sqrt();
        if len == 0.0 || !len.is_finite() {
            return SurfaceType::Wall;
        }
        let tilt = radians((z / len).clamp(-1.0, 1.0).acos());
        if tilt < degrees(MAX_ROOF_TILT_DEG) {
            SurfaceType::Roof
        } else if tilt > degrees(180.0 - MAX_ROOF_TILT_DEG) {
            SurfaceType::Floor
        } else {
            SurfaceType::Wall
        }
    }

    pub fn is_shading(self) -> bool {
        self == SurfaceType::Shading
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoundaryCondition {
    #[default]
    Outdoors,
    Ground,
    Adiabatic,
}

impl BoundaryCondition {
    pub fn name(self) -> &'static str {
        match self {
            BoundaryCondition::Outdoors => "Outdoors",
            BoundaryCondition::Ground => "Ground",
            BoundaryCondition::Adiabatic => "Adiabatic",
        }
    }
}

impl FromStr for BoundaryCondition {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outdoors" => Ok(BoundaryCondition::Outdoors),
            "ground" => Ok(BoundaryCondition::Ground),
            "adiabatic" => Ok(BoundaryCondition::Adiabatic),
            _ => Err(ModelError::UnknownVariant {
                what: "boundary condition",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SunExposure {
    #[default]
    SunExposed,
    NoSun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindExposure {
    #[default]
    WindExposed,
    NoWind,
}

/// A target surface as held by the entity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub id: EntityId,
    pub name: String,
    pub surface_type: SurfaceType,
    /// True once a caller declared the type instead of it being derived from geometry.
    #[serde(default)]
    pub type_is_user_input: bool,
    #[serde(default)]
    pub boundary_condition: BoundaryCondition,
    #[serde(default)]
    pub sun_exposure: SunExposure,
    #[serde(default)]
    pub wind_exposure: WindExposure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Outward face normal as extracted from the source geometry.
    pub normal: [f64; 3],
    pub vertex_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pv_generators: Vec<PvGenerator>,
}

impl Surface {
    /// New outdoor surface typed from its normal.
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        normal: [f64; 3],
        vertex_count: usize,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            surface_type: SurfaceType::from_normal(normal),
            type_is_user_input: false,
            boundary_condition: BoundaryCondition::Outdoors,
            sun_exposure: SunExposure::SunExposed,
            wind_exposure: WindExposure::WindExposed,
            construction: None,
            material: None,
            normal,
            vertex_count,
            pv_generators: Vec::new(),
        }
    }

    pub fn with_type(mut self, surface_type: SurfaceType) -> Self {
        self.surface_type = surface_type;
        self
    }

    /// Type implied by the face orientation alone.
    pub fn geometry_type(&self) -> SurfaceType {
        SurfaceType::from_normal(self.normal)
    }

    /// Number of quad sub-faces a shading surface is split into on export.
    pub fn sub_face_count(&self) -> usize {
        (self.vertex_count / 4).max(1)
    }

    pub fn has_pv(&self) -> bool {
        !self.pv_generators.is_empty()
    }
}
