//! PV generator attachment pass.

use std::fmt;

use bem_model::{Channel, IntegrationMode, PvRequest};

use crate::broadcast::{ChannelSpec, Fill, Scalar, broadcast, broadcast_required};
use crate::engine::{Engine, PassOutcome};
use crate::error::EngineResult;
use crate::notice::NoticeSink;
use crate::validate::{self, PvColumns};
use crate::{build, resolve};

const NAMES: ChannelSpec<String> = ChannelSpec {
    name: "names",
    describes: "generator name",
    scalar: Scalar::Positional,
    fill: Fill::Leave,
};

const COVERAGE_FRACTION: ChannelSpec<f64> = ChannelSpec {
    name: "coverage_fraction",
    describes: "surface area fraction",
    scalar: Scalar::Broadcast,
    fill: Fill::Fixed(0.5),
};

const CELL_EFFICIENCY: ChannelSpec<f64> = ChannelSpec {
    name: "cell_efficiency",
    describes: "solar cell efficiency",
    scalar: Scalar::Broadcast,
    fill: Fill::Fixed(0.12),
};

const INTEGRATION_MODE: ChannelSpec<ModeCode> = ChannelSpec {
    name: "integration_mode",
    describes: "integration mode",
    scalar: Scalar::Positional,
    fill: Fill::Fixed(ModeCode(IntegrationMode::MIN_CODE)),
};

/// Integration mode code that prints as its mode name where one exists.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ModeCode(i64);

impl fmt::Display for ModeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match IntegrationMode::from_code(self.0) {
            Some(mode) => f.write_str(mode.name()),
            None => write!(f, "{}", self.0),
        }
    }
}

const MODULES_IN_PARALLEL: ChannelSpec<i64> = ChannelSpec {
    name: "modules_in_parallel",
    describes: "number of PV panels in parallel",
    scalar: Scalar::Positional,
    fill: Fill::Fixed(1),
};

const MODULES_IN_SERIES: ChannelSpec<i64> = ChannelSpec {
    name: "modules_in_series",
    describes: "number of PV panels in series",
    scalar: Scalar::Positional,
    fill: Fill::Fixed(1),
};

const COST: ChannelSpec<f64> = ChannelSpec {
    name: "cost",
    describes: "generator cost",
    scalar: Scalar::Broadcast,
    fill: Fill::First,
};

const RATED_POWER: ChannelSpec<f64> = ChannelSpec {
    name: "rated_power_w",
    describes: "rated power output",
    scalar: Scalar::Broadcast,
    fill: Fill::First,
};

pub(crate) fn run(
    engine: &mut Engine<'_>,
    request: &PvRequest,
    sink: &mut dyn NoticeSink,
) -> EngineResult<PassOutcome> {
    let inverter_handle = validate::require_single("inverter", &request.inverters)?;
    resolve::require_handles(&request.surfaces)?;
    validate::require_values(COVERAGE_FRACTION.name, &request.coverage_fraction)?;
    validate::require_values(CELL_EFFICIENCY.name, &request.cell_efficiency)?;
    validate::require_values(INTEGRATION_MODE.name, &request.integration_mode)?;
    validate::require_values(COST.name, &request.cost)?;
    validate::require_values(RATED_POWER.name, &request.rated_power_w)?;

    let inverter = engine.resources.inverter(inverter_handle)?;
    let mut surfaces = resolve::resolve_surfaces(&*engine.store, &request.surfaces)?;

    let ids: Vec<String> = surfaces.iter().map(|s| s.id.to_string()).collect();
    let explicit = broadcast(&NAMES, &request.names, &ids, sink)?;
    let labels: Vec<String> = surfaces
        .iter()
        .zip(&explicit)
        .enumerate()
        .map(|(i, (surface, name))| build::generator_name(i, surface, name.as_deref()))
        .collect();

    let modes: Channel<ModeCode> = request
        .integration_mode
        .values()
        .iter()
        .map(|&code| ModeCode(code))
        .collect::<Vec<_>>()
        .into();
    let columns = PvColumns {
        coverage_fraction: broadcast_required(
            &COVERAGE_FRACTION,
            &request.coverage_fraction,
            &labels,
            sink,
        )?,
        cell_efficiency: broadcast_required(
            &CELL_EFFICIENCY,
            &request.cell_efficiency,
            &labels,
            sink,
        )?,
        integration_mode: broadcast_required(&INTEGRATION_MODE, &modes, &labels, sink)?
            .into_iter()
            .map(|code| code.0)
            .collect(),
        modules_in_parallel: broadcast_required(
            &MODULES_IN_PARALLEL,
            &request.modules_in_parallel,
            &labels,
            sink,
        )?,
        modules_in_series: broadcast_required(
            &MODULES_IN_SERIES,
            &request.modules_in_series,
            &labels,
            sink,
        )?,
        cost: broadcast_required(&COST, &request.cost, &labels, sink)?,
        rated_power_w: broadcast_required(&RATED_POWER, &request.rated_power_w, &labels, sink)?,
    };

    let fields = validate::pv_fields(&labels, &columns)?;
    build::mount_generators(&mut surfaces, &labels, fields, &inverter)?;

    engine.commit(surfaces)
}
