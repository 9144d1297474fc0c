//! Per-surface mutation: naming, generator construction and attribute writes.

use std::sync::Arc;

use bem_model::{Inverter, PvGenerator, SunExposure, Surface, WindExposure};

use crate::error::{EngineError, EngineResult};
use crate::fields::{PvFieldSet, SurfacePlan};
use crate::notice::{self, NoticeSink};

pub const GENERATOR_KIND: &str = "PVgenerator";
pub const PERFORMANCE_KIND: &str = "DefaultSimplePVperformance";

/// Display name of the generator on the `index`-th surface of a pass.
pub fn generator_name(index: usize, surface: &Surface, explicit: Option<&str>) -> String {
    match explicit {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("{GENERATOR_KIND}{index} {}", surface.id),
    }
}

pub fn performance_name(index: usize, surface: &Surface) -> String {
    format!("{PERFORMANCE_KIND}{index} {}", surface.id)
}

/// Shading surfaces are exported as quad sub-faces; the generator sits on the last one.
pub fn mount_name(surface: &Surface) -> String {
    if surface.surface_type.is_shading() {
        format!("{}_{}", surface.name, surface.sub_face_count() - 1)
    } else {
        surface.name.clone()
    }
}

/// Replaces each surface's generators with exactly one new generator, all
/// sharing `inverter`.
pub fn mount_generators(
    surfaces: &mut [Surface],
    names: &[String],
    fields: Vec<PvFieldSet>,
    inverter: &Arc<Inverter>,
) -> EngineResult<()> {
    if names.len() != surfaces.len() || fields.len() != surfaces.len() {
        return Err(EngineError::Internal {
            what: format!(
                "{} surfaces, {} names and {} field sets",
                surfaces.len(),
                names.len(),
                fields.len()
            ),
        });
    }

    for (index, ((surface, name), f)) in surfaces.iter_mut().zip(names).zip(fields).enumerate() {
        // No accumulation across repeated passes.
        surface.pv_generators.clear();

        let generator = PvGenerator {
            name: name.clone(),
            surface_name: mount_name(surface),
            performance_name: performance_name(index, surface),
            integration_mode: f.integration_mode,
            modules_in_parallel: f.modules_in_parallel,
            modules_in_series: f.modules_in_series,
            cost: f.cost,
            rated_power: f.rated_power,
            coverage_fraction: f.coverage_fraction,
            cell_efficiency: f.cell_efficiency,
            inverter: Arc::clone(inverter),
        };
        tracing::debug!(surface = %surface.id, generator = %generator.name, "mounted generator");
        surface.pv_generators.push(generator);
    }
    Ok(())
}

/// Writes resolved plans onto their surfaces.
pub fn apply_plans(
    surfaces: &mut [Surface],
    plans: Vec<SurfacePlan>,
    sink: &mut dyn NoticeSink,
) -> EngineResult<()> {
    if plans.len() != surfaces.len() {
        return Err(EngineError::Internal {
            what: format!("{} surfaces but {} plans", surfaces.len(), plans.len()),
        });
    }

    for (surface, plan) in surfaces.iter_mut().zip(plans) {
        if let Some(name) = plan.name {
            surface.name = name;
        }
        if let Some(surface_type) = plan.surface_type {
            surface.surface_type = surface_type;
            surface.type_is_user_input = true;
            notice::info(sink, format!("{}: type set to {}", surface.name, surface_type));
        }
        if let Some(bc) = plan.boundary_condition {
            surface.boundary_condition = bc;
            notice::info(
                sink,
                format!("{}: boundary condition set to {}", surface.name, bc),
            );
        }
        if plan.shelter {
            surface.sun_exposure = SunExposure::NoSun;
            surface.wind_exposure = WindExposure::NoWind;
        }
        if let Some(construction) = plan.construction {
            notice::info(
                sink,
                format!("{}: construction set to {}", surface.name, construction),
            );
            surface.construction = Some(construction);
        }
        if let Some(material) = plan.material {
            notice::info(
                sink,
                format!("{}: material set to {}", surface.name, material),
            );
            surface.material = Some(material);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bem_core::{EntityId, watts};
    use bem_model::{IntegrationMode, SurfaceType};

    fn fields() -> PvFieldSet {
        PvFieldSet {
            coverage_fraction: 0.5,
            cell_efficiency: 0.12,
            integration_mode: IntegrationMode::Decoupled,
            modules_in_parallel: 2,
            modules_in_series: 3,
            cost: 100.0,
            rated_power: watts(300.0),
        }
    }

    fn inverter() -> Arc<Inverter> {
        Arc::new(Inverter {
            handle: "inv".to_string(),
            name: "Inverter".to_string(),
            cost: 0.0,
            efficiency: 0.95,
            replacement_years: None,
        })
    }

    #[test]
    fn synthesized_names_use_index_and_id() {
        let s = Surface::new(EntityId::new("abc"), "roof", [0.0, 0.0, 1.0], 4);
        assert_eq!(generator_name(2, &s, None), "PVgenerator2 abc");
        assert_eq!(generator_name(2, &s, Some("  ")), "PVgenerator2 abc");
        assert_eq!(generator_name(2, &s, Some("array A")), "array A");
        assert_eq!(performance_name(0, &s), "DefaultSimplePVperformance0 abc");
    }

    #[test]
    fn shading_mounts_on_last_sub_face() {
        let s = Surface::new(EntityId::new("c"), "ctx", [0.0, 1.0, 0.0], 12)
            .with_type(SurfaceType::Shading);
        assert_eq!(mount_name(&s), "ctx_2");
        let wall = Surface::new(EntityId::new("w"), "wall", [0.0, 1.0, 0.0], 12);
        assert_eq!(mount_name(&wall), "wall");
    }

    #[test]
    fn mounting_resets_and_shares_inverter() {
        let mut surfaces = vec![
            Surface::new(EntityId::new("a"), "a", [0.0, 0.0, 1.0], 4),
            Surface::new(EntityId::new("b"), "b", [0.0, 0.0, 1.0], 4),
        ];
        let names = vec!["g0".to_string(), "g1".to_string()];
        let inv = inverter();

        mount_generators(&mut surfaces, &names, vec![fields(), fields()], &inv).unwrap();
        mount_generators(&mut surfaces, &names, vec![fields(), fields()], &inv).unwrap();

        for s in &surfaces {
            assert_eq!(s.pv_generators.len(), 1);
            assert!(Arc::ptr_eq(&s.pv_generators[0].inverter, &inv));
            assert_eq!(s.pv_generators[0].module_count(), 6);
        }
    }
}
