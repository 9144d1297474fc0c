//! Cross-field rules for surface declarations.
//!
//! Rules run in order for each surface:
//! 1. an air wall construction forces the air wall type
//! 2. an air wall type forces the air wall construction
//! 3. a declared type is compared against the type implied by the normal
//! 4. ground shifts the type underground; ground and adiabatic drop exposure
//! 5. construction and material references are resolved against the library
//!
//! Bare-name references are checked for every surface before any full
//! definition is registered.

use std::collections::HashMap;

use bem_model::{BoundaryCondition, Surface, SurfaceType};

use crate::error::{EngineError, EngineResult};
use crate::fields::{SurfaceFieldSet, SurfacePlan};
use crate::notice::{self, NoticeSink};
use crate::store::{DefinitionKind, DefinitionLibrary};

/// Construction name that marks an air wall.
pub const AIR_WALL_CONSTRUCTION: &str = "AIR WALL";

/// (geometry-derived, declared) base code pairs that are not worth a warning.
pub const ACCEPTABLE_TYPE_PAIRS: [(u8, u8); 14] = [
    (1, 3),
    (3, 1),
    (0, 5),
    (5, 0),
    (1, 5),
    (5, 1),
    (4, 0),
    (4, 1),
    (4, 2),
    (4, 3),
    (0, 4),
    (1, 4),
    (2, 4),
    (3, 4),
];

pub fn is_air_wall_construction(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(AIR_WALL_CONSTRUCTION)
}

/// True when a payload is a full definition rather than a bare library name.
pub fn is_full_definition(kind: DefinitionKind, payload: &str) -> bool {
    match kind {
        DefinitionKind::Construction => payload.trim().lines().count() > 1,
        DefinitionKind::Material => payload.split_whitespace().count() > 1,
    }
}

/// Applies rules 1-4 to one surface.
pub fn apply_rules(
    surface: &Surface,
    fields: SurfaceFieldSet,
    sink: &mut dyn NoticeSink,
) -> EngineResult<SurfacePlan> {
    let label = fields.name.clone().unwrap_or_else(|| surface.name.clone());
    let mut surface_type = fields.surface_type;
    let mut construction = fields.construction;

    if construction.as_deref().is_some_and(is_air_wall_construction) {
        surface_type = Some(SurfaceType::AirWall);
        notice::info(
            sink,
            format!(
                "{label}: setting the construction to Air Wall also sets the surface type to air wall"
            ),
        );
    }

    if surface_type == Some(SurfaceType::AirWall)
        && !construction.as_deref().is_some_and(is_air_wall_construction)
    {
        construction = Some(AIR_WALL_CONSTRUCTION.to_string());
        notice::info(
            sink,
            format!("{label}: setting the type to air wall also sets the Air Wall construction"),
        );
    }

    if let Some(declared) = surface_type {
        check_orientation(&label, surface.geometry_type(), declared, sink);
    }

    let mut shelter = false;
    match fields.boundary_condition {
        Some(BoundaryCondition::Ground) => {
            let current = surface_type.unwrap_or(surface.surface_type);
            let shifted = current.underground().ok_or_else(|| {
                EngineError::range(
                    "surface type",
                    &label,
                    current,
                    "has no underground variant for a Ground boundary condition",
                )
            })?;
            surface_type = Some(shifted);
            shelter = true;
        }
        Some(BoundaryCondition::Adiabatic) => shelter = true,
        Some(BoundaryCondition::Outdoors) | None => {}
    }

    Ok(SurfacePlan {
        name: fields.name,
        surface_type,
        boundary_condition: fields.boundary_condition,
        shelter,
        construction,
        material: fields.material,
    })
}

/// Warns when the declared type contradicts the face orientation. The
/// declared type is kept either way.
fn check_orientation(
    label: &str,
    derived: SurfaceType,
    declared: SurfaceType,
    sink: &mut dyn NoticeSink,
) {
    let pair = (derived.base_code(), declared.base_code());
    if pair.0 != pair.1 && !ACCEPTABLE_TYPE_PAIRS.contains(&pair) {
        notice::warn(
            sink,
            format!(
                "{label}: normal direction of the surface is not expected for a {declared}. \
                 The surface is more likely a {derived}. The declared type is kept, \
                 so you may need to flip the surface"
            ),
        );
    }
    if declared == SurfaceType::Window {
        notice::warn(
            sink,
            format!(
                "{label}: for energy simulation add windows to a host surface as glazing; \
                 a standalone window surface is only suitable for daylighting"
            ),
        );
    }
}

/// Rule 5 over all plans: bare names must already exist, full definitions are
/// upserted once each and replaced by their canonical names.
///
/// Every full definition is parsed before the first upsert, so a pass that
/// fails here leaves the library as it was.
pub fn resolve_references(
    plans: &mut [SurfacePlan],
    library: &mut dyn DefinitionLibrary,
    sink: &mut dyn NoticeSink,
) -> EngineResult<()> {
    let materials = library.material_names();
    for plan in plans.iter() {
        if let Some(name) = plan.construction.as_deref()
            && !is_full_definition(DefinitionKind::Construction, name)
            && !library.exists(DefinitionKind::Construction, name)
        {
            return Err(EngineError::UnresolvedReference {
                library: DefinitionKind::Construction.library_name(),
                name: name.to_string(),
            });
        }
        if let Some(name) = plan.material.as_deref()
            && !is_full_definition(DefinitionKind::Material, name)
            && !materials.contains(name)
        {
            return Err(EngineError::UnresolvedReference {
                library: DefinitionKind::Material.library_name(),
                name: name.to_string(),
            });
        }
    }

    for plan in plans.iter() {
        let payloads = [
            (DefinitionKind::Construction, plan.construction.as_deref()),
            (DefinitionKind::Material, plan.material.as_deref()),
        ];
        for (kind, payload) in payloads {
            if let Some(payload) = payload
                && is_full_definition(kind, payload)
                && library.canonical_name(kind, payload).is_none()
            {
                return Err(EngineError::LibraryRegistration {
                    library: kind.library_name(),
                    name: preview(payload),
                });
            }
        }
    }

    let mut registered: HashMap<(DefinitionKind, String), String> = HashMap::new();
    for plan in plans.iter_mut() {
        if let Some(payload) = plan.construction.take() {
            plan.construction = Some(canonical(
                DefinitionKind::Construction,
                payload,
                library,
                &mut registered,
                sink,
            )?);
        }
        if let Some(payload) = plan.material.take() {
            plan.material = Some(canonical(
                DefinitionKind::Material,
                payload,
                library,
                &mut registered,
                sink,
            )?);
        }
    }
    Ok(())
}

fn canonical(
    kind: DefinitionKind,
    payload: String,
    library: &mut dyn DefinitionLibrary,
    registered: &mut HashMap<(DefinitionKind, String), String>,
    sink: &mut dyn NoticeSink,
) -> EngineResult<String> {
    if !is_full_definition(kind, &payload) {
        return Ok(payload.trim().to_string());
    }
    if let Some(name) = registered.get(&(kind, payload.clone())) {
        return Ok(name.clone());
    }

    let registration = library.register(kind, &payload, true);
    if !registration.added {
        let name = if registration.name.is_empty() {
            preview(&payload)
        } else {
            registration.name
        };
        return Err(EngineError::LibraryRegistration {
            library: kind.library_name(),
            name,
        });
    }

    notice::info(
        sink,
        format!(
            "{} added to the {} library",
            registration.name,
            kind.library_name()
        ),
    );
    registered.insert((kind, payload), registration.name.clone());
    Ok(registration.name)
}

const PREVIEW_CHARS: usize = 40;

/// Payload collapsed onto one line and cut to a readable length.
fn preview(payload: &str) -> String {
    let flat = payload.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        flat
    } else {
        let head: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{Notice, Severity};
    use bem_core::EntityId;

    fn wall() -> Surface {
        Surface::new(EntityId::new("w1"), "wall_1", [1.0, 0.0, 0.0], 4)
    }

    fn roof() -> Surface {
        Surface::new(EntityId::new("r1"), "roof_1", [0.0, 0.0, 1.0], 4)
    }

    #[test]
    fn air_wall_construction_overrides_declared_type() {
        let mut notices: Vec<Notice> = Vec::new();
        let plan = apply_rules(
            &wall(),
            SurfaceFieldSet {
                surface_type: Some(SurfaceType::Floor),
                construction: Some("air wall".to_string()),
                ..Default::default()
            },
            &mut notices,
        )
        .unwrap();
        assert_eq!(plan.surface_type, Some(SurfaceType::AirWall));
        assert!(notices.iter().any(|n| n.severity == Severity::Info));
    }

    #[test]
    fn air_wall_type_forces_construction() {
        let mut notices: Vec<Notice> = Vec::new();
        let plan = apply_rules(
            &wall(),
            SurfaceFieldSet {
                surface_type: Some(SurfaceType::AirWall),
                construction: Some("Exterior Wall".to_string()),
                ..Default::default()
            },
            &mut notices,
        )
        .unwrap();
        assert_eq!(plan.construction.as_deref(), Some(AIR_WALL_CONSTRUCTION));
        assert_eq!(plan.surface_type, Some(SurfaceType::AirWall));
    }

    #[test]
    fn mismatched_orientation_warns_but_keeps_declared() {
        let mut notices: Vec<Notice> = Vec::new();
        let plan = apply_rules(
            &roof(),
            SurfaceFieldSet {
                surface_type: Some(SurfaceType::Floor),
                ..Default::default()
            },
            &mut notices,
        )
        .unwrap();
        assert_eq!(plan.surface_type, Some(SurfaceType::Floor));
        let warnings: Vec<_> = notices
            .iter()
            .filter(|n| n.severity == Severity::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("Floor"));
        assert!(warnings[0].message.contains("Roof"));
    }

    #[test]
    fn acceptable_pairs_are_silent() {
        let mut notices: Vec<Notice> = Vec::new();
        apply_rules(
            &roof(),
            SurfaceFieldSet {
                surface_type: Some(SurfaceType::Ceiling),
                ..Default::default()
            },
            &mut notices,
        )
        .unwrap();
        assert!(notices.is_empty());
    }

    #[test]
    fn ground_shifts_type_and_shelters() {
        let mut notices: Vec<Notice> = Vec::new();
        let plan = apply_rules(
            &wall(),
            SurfaceFieldSet {
                boundary_condition: Some(BoundaryCondition::Ground),
                ..Default::default()
            },
            &mut notices,
        )
        .unwrap();
        assert_eq!(plan.surface_type, Some(SurfaceType::UndergroundWall));
        assert!(plan.shelter);
    }

    #[test]
    fn adiabatic_shelters_without_type_change() {
        let mut notices: Vec<Notice> = Vec::new();
        let plan = apply_rules(
            &wall(),
            SurfaceFieldSet {
                boundary_condition: Some(BoundaryCondition::Adiabatic),
                ..Default::default()
            },
            &mut notices,
        )
        .unwrap();
        assert_eq!(plan.surface_type, None);
        assert!(plan.shelter);
    }

    #[test]
    fn ground_on_ceiling_is_range_error() {
        let mut notices: Vec<Notice> = Vec::new();
        let err = apply_rules(
            &roof(),
            SurfaceFieldSet {
                surface_type: Some(SurfaceType::Ceiling),
                boundary_condition: Some(BoundaryCondition::Ground),
                ..Default::default()
            },
            &mut notices,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Range {
                field: "surface type",
                ..
            }
        ));
    }

    #[test]
    fn previews_are_single_line_and_bounded() {
        assert_eq!(preview("Material,\n Broken;"), "Material, Broken;");
        let long = "void plastic ".repeat(10);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn definition_shapes() {
        assert!(!is_full_definition(
            DefinitionKind::Construction,
            "Exterior Wall"
        ));
        assert!(is_full_definition(
            DefinitionKind::Construction,
            "Construction,\n Exterior Wall,\n Brick;"
        ));
        assert!(!is_full_definition(DefinitionKind::Material, "grey_paint"));
        assert!(is_full_definition(
            DefinitionKind::Material,
            "void plastic grey_paint 0 0 5 0.5 0.5 0.5 0 0"
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use bem_core::EntityId;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ground_shifts_by_half_and_drops_exposure(
            x in -1.0_f64..1.0,
            y in -1.0_f64..1.0,
            z in -1.0_f64..1.0,
        ) {
            prop_assume!(x * x + y * y + z * z > 1e-6);
            let surface = Surface::new(EntityId::new("s"), "s", [x, y, z], 4);
            let before = surface.surface_type.code();
            let mut notices: Vec<crate::notice::Notice> = Vec::new();

            let plan = apply_rules(
                &surface,
                SurfaceFieldSet {
                    boundary_condition: Some(BoundaryCondition::Ground),
                    ..Default::default()
                },
                &mut notices,
            )
            .unwrap();

            let after = plan.surface_type.map(SurfaceType::code);
            prop_assert_eq!(after, Some(before + 0.5));
            prop_assert!(plan.shelter);
        }
    }
}
