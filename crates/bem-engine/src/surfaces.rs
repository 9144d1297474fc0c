//! Surface attribute pass.

use bem_model::{Channel, SurfaceRequest, TypeCode};

use crate::broadcast::{ChannelSpec, Fill, Scalar, broadcast};
use crate::engine::{Engine, PassOutcome};
use crate::error::EngineResult;
use crate::notice::NoticeSink;
use crate::validate::{self, SurfaceColumns};
use crate::{build, consistency, resolve};

const NAMES: ChannelSpec<String> = ChannelSpec {
    name: "names",
    describes: "surface name",
    scalar: Scalar::Positional,
    fill: Fill::Leave,
};

const SURFACE_TYPE: ChannelSpec<TypeCode> = ChannelSpec {
    name: "surface_type",
    describes: "surface type",
    scalar: Scalar::Broadcast,
    fill: Fill::Leave,
};

const BOUNDARY_CONDITION: ChannelSpec<String> = ChannelSpec {
    name: "boundary_condition",
    describes: "boundary condition",
    scalar: Scalar::Broadcast,
    fill: Fill::Leave,
};

const CONSTRUCTION: ChannelSpec<String> = ChannelSpec {
    name: "construction",
    describes: "construction",
    scalar: Scalar::Broadcast,
    fill: Fill::Leave,
};

const MATERIAL: ChannelSpec<String> = ChannelSpec {
    name: "material",
    describes: "material",
    scalar: Scalar::Broadcast,
    fill: Fill::Leave,
};

pub(crate) fn run(
    engine: &mut Engine<'_>,
    request: &SurfaceRequest,
    sink: &mut dyn NoticeSink,
) -> EngineResult<PassOutcome> {
    resolve::require_handles(&request.surfaces)?;
    let mut surfaces = resolve::resolve_surfaces(&*engine.store, &request.surfaces)?;
    let labels: Vec<String> = surfaces.iter().map(|s| s.name.clone()).collect();

    let names = suffixed_names(&request.names, surfaces.len());
    let columns = SurfaceColumns {
        names: broadcast(&NAMES, &names, &labels, sink)?,
        surface_type: broadcast(&SURFACE_TYPE, &request.surface_type, &labels, sink)?,
        boundary_condition: broadcast(
            &BOUNDARY_CONDITION,
            &request.boundary_condition,
            &labels,
            sink,
        )?,
        construction: broadcast(&CONSTRUCTION, &request.construction, &labels, sink)?,
        material: broadcast(&MATERIAL, &request.material, &labels, sink)?,
    };

    let fields = validate::surface_fields(&labels, &columns)?;
    let mut plans = surfaces
        .iter()
        .zip(fields)
        .map(|(surface, f)| consistency::apply_rules(surface, f, sink))
        .collect::<EngineResult<Vec<_>>>()?;
    consistency::resolve_references(&mut plans, &mut *engine.library, sink)?;

    build::apply_plans(&mut surfaces, plans, sink)?;
    engine.commit(surfaces)
}

/// One name over several surfaces becomes `<name>_<index>` per surface.
fn suffixed_names(names: &Channel<String>, count: usize) -> Channel<String> {
    match names.values() {
        [single] if count > 1 => (0..count)
            .map(|i| format!("{single}_{i}"))
            .collect::<Vec<_>>()
            .into(),
        _ => names.clone(),
    }
}
