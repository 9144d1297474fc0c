//! Seed description of an entity store: faces, inverters and library definitions.

use bem_core::EntityId;
use serde::{Deserialize, Serialize};

use crate::generator::Inverter;
use crate::surface::{Surface, SurfaceType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub surfaces: Vec<SurfaceDef>,
    #[serde(default)]
    pub inverters: Vec<Inverter>,
    /// Full construction definitions (`Construction, <name>, <layers>...;`).
    #[serde(default)]
    pub constructions: Vec<String>,
    /// Full material definitions (`<modifier> <type> <name> ...`).
    #[serde(default)]
    pub materials: Vec<String>,
}

/// A face handed over by geometry extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub normal: [f64; 3],
    #[serde(default = "default_vertex_count")]
    pub vertex_count: usize,
    /// Overrides the normal-derived type, e.g. for context shading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_type: Option<SurfaceType>,
}

fn default_vertex_count() -> usize {
    4
}

impl SurfaceDef {
    /// Materialises the face with the given fallbacks for missing id and name.
    pub fn into_surface(self, id: EntityId, name: String) -> Surface {
        let surface = Surface::new(
            self.id.unwrap_or(id),
            self.name.unwrap_or(name),
            self.normal,
            self.vertex_count,
        );
        match self.surface_type {
            Some(t) => surface.with_type(t),
            None => surface,
        }
    }
}
