//! Scene loading, validation and surface listing.

use std::collections::HashSet;
use std::path::Path;

use bem_hive::Hive;
use bem_model::{Scene, Surface};
use serde::Serialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorSummary {
    pub name: String,
    pub mounted_on: String,
    pub integration_mode: String,
    pub modules: u32,
    pub rated_power_w: f64,
    pub inverter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceSummary {
    pub id: String,
    pub name: String,
    pub surface_type: String,
    pub boundary_condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generators: Vec<GeneratorSummary>,
}

impl From<&Surface> for SurfaceSummary {
    fn from(surface: &Surface) -> Self {
        Self {
            id: surface.id.to_string(),
            name: surface.name.clone(),
            surface_type: surface.surface_type.to_string(),
            boundary_condition: surface.boundary_condition.to_string(),
            construction: surface.construction.clone(),
            material: surface.material.clone(),
            generators: surface
                .pv_generators
                .iter()
                .map(|g| GeneratorSummary {
                    name: g.name.clone(),
                    mounted_on: g.surface_name.clone(),
                    integration_mode: g.integration_mode.to_string(),
                    modules: g.module_count(),
                    rated_power_w: bem_core::as_watts(g.rated_power),
                    inverter: g.inverter.handle.clone(),
                })
                .collect(),
        }
    }
}

/// Load a scene from a YAML or JSON file.
pub fn load_scene(path: &Path) -> AppResult<Scene> {
    bem_model::load_any(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Structural checks a hive cannot express on its own.
pub fn validate_scene(scene: &Scene) -> AppResult<()> {
    if scene.surfaces.is_empty() {
        return Err(AppError::Validation(
            "Scene must have at least one surface".to_string(),
        ));
    }

    let mut ids = HashSet::new();
    for (i, surface) in scene.surfaces.iter().enumerate() {
        if let Some(id) = &surface.id
            && !ids.insert(id.clone())
        {
            return Err(AppError::Validation(format!("Duplicate surface id '{id}'")));
        }
        let [x, y, z] = surface.normal;
        if !(x.is_finite() && y.is_finite() && z.is_finite()) || x * x + y * y + z * z == 0.0 {
            return Err(AppError::Validation(format!(
                "Surface {i} has a degenerate normal {:?}",
                surface.normal
            )));
        }
        if surface.vertex_count < 3 {
            return Err(AppError::Validation(format!(
                "Surface {i} needs at least 3 vertices, got {}",
                surface.vertex_count
            )));
        }
    }

    let mut handles = HashSet::new();
    for inverter in &scene.inverters {
        if !handles.insert(inverter.handle.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate inverter handle '{}'",
                inverter.handle
            )));
        }
    }
    Ok(())
}

/// Validate a scene and seed a hive from it.
pub fn build_hive(scene: Scene) -> AppResult<Hive> {
    validate_scene(&scene)?;
    let hive = Hive::from_scene(scene)?;
    tracing::info!(surfaces = hive.store.len(), "hive ready");
    Ok(hive)
}

pub fn list_surfaces(hive: &Hive) -> Vec<SurfaceSummary> {
    hive.store.surfaces().iter().map(SurfaceSummary::from).collect()
}

/// Write the current surfaces of a hive to a YAML or JSON file.
pub fn save_surfaces(path: &Path, hive: &Hive) -> AppResult<()> {
    let result = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            bem_model::save_json(path, &hive.store.surfaces())
        }
        _ => bem_model::save_yaml(path, &hive.store.surfaces()),
    };
    result.map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bem_model::SurfaceDef;

    fn face(normal: [f64; 3]) -> SurfaceDef {
        SurfaceDef {
            id: None,
            name: None,
            normal,
            vertex_count: 4,
            surface_type: None,
        }
    }

    #[test]
    fn empty_scene_is_rejected() {
        assert!(matches!(
            validate_scene(&Scene::default()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn degenerate_normal_is_rejected() {
        let scene = Scene {
            surfaces: vec![face([0.0, 0.0, 0.0])],
            ..Default::default()
        };
        assert!(validate_scene(&scene).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut a = face([0.0, 0.0, 1.0]);
        a.id = Some("a".into());
        let scene = Scene {
            surfaces: vec![a.clone(), a],
            ..Default::default()
        };
        assert!(validate_scene(&scene).is_err());
    }

    #[test]
    fn summaries_follow_store_order() {
        let scene = Scene {
            surfaces: vec![face([0.0, 0.0, 1.0]), face([1.0, 0.0, 0.0])],
            ..Default::default()
        };
        let hive = build_hive(scene).unwrap();
        let summaries = list_surfaces(&hive);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].surface_type, "Roof");
        assert_eq!(summaries[1].surface_type, "Wall");
        assert_eq!(summaries[1].boundary_condition, "Outdoors");
    }
}
