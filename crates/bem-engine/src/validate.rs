//! Field-level checks. Everything here runs before any surface is mutated.

use bem_core::{CoreError, ensure_finite, ensure_fraction, watts};
use bem_model::{BoundaryCondition, Channel, IntegrationMode, SurfaceType, TypeCode};

use crate::error::{EngineError, EngineResult};
use crate::fields::{PvFieldSet, SurfaceFieldSet};

/// Exactly one handle must be supplied.
pub fn require_single<'a>(what: &'static str, handles: &'a [String]) -> EngineResult<&'a str> {
    match handles {
        [] => Err(EngineError::missing(format!("please connect a {what}"))),
        [one] if one.trim().is_empty() => {
            Err(EngineError::missing(format!("please connect a {what}")))
        }
        [one] => Ok(one.as_str()),
        many => Err(EngineError::Cardinality {
            what,
            count: many.len(),
        }),
    }
}

/// Mandatory channels must carry at least one value.
pub fn require_values<T>(name: &'static str, channel: &Channel<T>) -> EngineResult<()> {
    if channel.is_empty() {
        return Err(EngineError::missing(format!(
            "{name} must contain at least one value"
        )));
    }
    Ok(())
}

pub fn check_fraction(field: &'static str, entity: &str, value: f64) -> EngineResult<f64> {
    ensure_fraction(value, field).map_err(|e| core_to_range(e, field, entity, value))
}

pub fn check_non_negative(field: &'static str, entity: &str, value: f64) -> EngineResult<f64> {
    let value =
        ensure_finite(value, field).map_err(|e| core_to_range(e, field, entity, value))?;
    if value < 0.0 {
        return Err(EngineError::range(field, entity, value, "must be non-negative"));
    }
    Ok(value)
}

pub fn check_mode(field: &'static str, entity: &str, code: i64) -> EngineResult<IntegrationMode> {
    IntegrationMode::from_code(code).ok_or_else(|| {
        EngineError::range(
            field,
            entity,
            code,
            format!(
                "must be an integer between {} and {}",
                IntegrationMode::MIN_CODE,
                IntegrationMode::MAX_CODE
            ),
        )
    })
}

pub fn check_count(field: &'static str, entity: &str, count: i64) -> EngineResult<u32> {
    u32::try_from(count)
        .ok()
        .filter(|c| *c >= 1)
        .ok_or_else(|| EngineError::range(field, entity, count, "must be a whole number >= 1"))
}

pub fn check_surface_type(entity: &str, code: &TypeCode) -> EngineResult<SurfaceType> {
    code.resolve().ok_or_else(|| {
        EngineError::range("surface type", entity, code, "not a known surface type")
    })
}

pub fn check_boundary(entity: &str, value: &str) -> EngineResult<BoundaryCondition> {
    value.parse().map_err(|_| {
        EngineError::range(
            "boundary condition",
            entity,
            value,
            "only Ground, Adiabatic and Outdoors are valid",
        )
    })
}

fn core_to_range(err: CoreError, field: &'static str, entity: &str, value: f64) -> EngineError {
    let reason = match err {
        CoreError::OutOfRange { min, max, .. } => format!("must be between {min} and {max}"),
        CoreError::NonFinite { .. } => "must be finite".to_string(),
    };
    EngineError::range(field, entity, value, reason)
}

/// Broadcast generator channels, one slot per surface.
#[derive(Debug, Clone, Default)]
pub struct PvColumns {
    pub coverage_fraction: Vec<f64>,
    pub cell_efficiency: Vec<f64>,
    pub integration_mode: Vec<i64>,
    pub modules_in_parallel: Vec<i64>,
    pub modules_in_series: Vec<i64>,
    pub cost: Vec<f64>,
    pub rated_power_w: Vec<f64>,
}

/// Validates every column for every surface, in column order, and returns
/// one field set per label.
pub fn pv_fields(labels: &[String], columns: &PvColumns) -> EngineResult<Vec<PvFieldSet>> {
    let n = labels.len();
    let lengths = [
        columns.coverage_fraction.len(),
        columns.cell_efficiency.len(),
        columns.integration_mode.len(),
        columns.modules_in_parallel.len(),
        columns.modules_in_series.len(),
        columns.cost.len(),
        columns.rated_power_w.len(),
    ];
    if lengths.iter().any(|len| *len != n) {
        return Err(EngineError::Internal {
            what: format!("broadcast columns {lengths:?} do not match {n} surfaces"),
        });
    }

    let coverage = check_column(labels, &columns.coverage_fraction, |l, v| {
        check_fraction("coverage fraction", l, *v)
    })?;
    let efficiency = check_column(labels, &columns.cell_efficiency, |l, v| {
        check_fraction("cell efficiency", l, *v)
    })?;
    let modes = check_column(labels, &columns.integration_mode, |l, v| {
        check_mode("integration mode", l, *v)
    })?;
    let parallel = check_column(labels, &columns.modules_in_parallel, |l, v| {
        check_count("modules in parallel", l, *v)
    })?;
    let series = check_column(labels, &columns.modules_in_series, |l, v| {
        check_count("modules in series", l, *v)
    })?;
    let cost = check_column(labels, &columns.cost, |l, v| {
        check_non_negative("cost", l, *v)
    })?;
    let power = check_column(labels, &columns.rated_power_w, |l, v| {
        check_non_negative("rated power", l, *v)
    })?;

    Ok((0..n)
        .map(|i| PvFieldSet {
            coverage_fraction: coverage[i],
            cell_efficiency: efficiency[i],
            integration_mode: modes[i],
            modules_in_parallel: parallel[i],
            modules_in_series: series[i],
            cost: cost[i],
            rated_power: watts(power[i]),
        })
        .collect())
}

/// Broadcast surface channels; `None` means the attribute is not declared.
#[derive(Debug, Clone, Default)]
pub struct SurfaceColumns {
    pub names: Vec<Option<String>>,
    pub surface_type: Vec<Option<TypeCode>>,
    pub boundary_condition: Vec<Option<String>>,
    pub construction: Vec<Option<String>>,
    pub material: Vec<Option<String>>,
}

pub fn surface_fields(
    labels: &[String],
    columns: &SurfaceColumns,
) -> EngineResult<Vec<SurfaceFieldSet>> {
    let n = labels.len();
    let lengths = [
        columns.names.len(),
        columns.surface_type.len(),
        columns.boundary_condition.len(),
        columns.construction.len(),
        columns.material.len(),
    ];
    if lengths.iter().any(|len| *len != n) {
        return Err(EngineError::Internal {
            what: format!("broadcast columns {lengths:?} do not match {n} surfaces"),
        });
    }

    let types = check_column(labels, &columns.surface_type, |l, v| {
        v.as_ref().map(|code| check_surface_type(l, code)).transpose()
    })?;
    let boundaries = check_column(labels, &columns.boundary_condition, |l, v| {
        v.as_deref().map(|bc| check_boundary(l, bc)).transpose()
    })?;

    Ok((0..n)
        .map(|i| SurfaceFieldSet {
            name: non_blank(&columns.names[i]),
            surface_type: types[i],
            boundary_condition: boundaries[i],
            construction: non_blank(&columns.construction[i]),
            material: non_blank(&columns.material[i]),
        })
        .collect())
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_column<T, U>(
    labels: &[String],
    values: &[T],
    check: impl Fn(&str, &T) -> EngineResult<U>,
) -> EngineResult<Vec<U>> {
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| check(label, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("gen{i}")).collect()
    }

    fn columns(n: usize) -> PvColumns {
        PvColumns {
            coverage_fraction: vec![0.5; n],
            cell_efficiency: vec![0.12; n],
            integration_mode: vec![1; n],
            modules_in_parallel: vec![1; n],
            modules_in_series: vec![1; n],
            cost: vec![100.0; n],
            rated_power_w: vec![250.0; n],
        }
    }

    #[test]
    fn inverter_cardinality() {
        assert!(matches!(
            require_single("inverter", &[]),
            Err(EngineError::MissingInput { .. })
        ));
        assert_eq!(
            require_single("inverter", &["a".to_string(), "b".to_string()]),
            Err(EngineError::Cardinality {
                what: "inverter",
                count: 2
            })
        );
        assert_eq!(require_single("inverter", &["a".to_string()]), Ok("a"));
    }

    #[test]
    fn fraction_edges_are_inclusive() {
        assert!(check_fraction("coverage fraction", "g", 0.0).is_ok());
        assert!(check_fraction("coverage fraction", "g", 1.0).is_ok());
        let err = check_fraction("coverage fraction", "g", 1.2).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Range {
                field: "coverage fraction",
                ..
            }
        ));
        assert!(check_fraction("cell efficiency", "g", f64::NAN).is_err());
    }

    #[test]
    fn modes_outside_table_are_rejected() {
        for code in 1..=6 {
            assert!(check_mode("integration mode", "g", code).is_ok());
        }
        assert!(check_mode("integration mode", "g", 0).is_err());
        assert!(check_mode("integration mode", "g", 7).is_err());
    }

    #[test]
    fn first_bad_column_is_reported_with_its_surface() {
        let mut cols = columns(3);
        cols.cell_efficiency[2] = 1.5;
        cols.integration_mode[0] = 9;
        let err = pv_fields(&labels(3), &cols).unwrap_err();
        match err {
            EngineError::Range { field, entity, .. } => {
                assert_eq!(field, "cell efficiency");
                assert_eq!(entity, "gen2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn counts_must_be_positive() {
        let mut cols = columns(2);
        cols.modules_in_series[1] = 0;
        assert!(matches!(
            pv_fields(&labels(2), &cols),
            Err(EngineError::Range {
                field: "modules in series",
                ..
            })
        ));
    }

    #[test]
    fn surface_declarations_parse() {
        let cols = SurfaceColumns {
            names: vec![Some("  ".to_string())],
            surface_type: vec![Some(TypeCode::Name("roof".to_string()))],
            boundary_condition: vec![Some("adiabatic".to_string())],
            construction: vec![None],
            material: vec![Some("glass".to_string())],
        };
        let fields = surface_fields(&labels(1), &cols).unwrap();
        assert_eq!(fields[0].name, None);
        assert_eq!(fields[0].surface_type, Some(SurfaceType::Roof));
        assert_eq!(
            fields[0].boundary_condition,
            Some(BoundaryCondition::Adiabatic)
        );
        assert_eq!(fields[0].material.as_deref(), Some("glass"));
    }

    #[test]
    fn unknown_boundary_condition_is_range_error() {
        let cols = SurfaceColumns {
            names: vec![None],
            surface_type: vec![None],
            boundary_condition: vec![Some("surface".to_string())],
            construction: vec![None],
            material: vec![None],
        };
        assert!(matches!(
            surface_fields(&labels(1), &cols),
            Err(EngineError::Range {
                field: "boundary condition",
                ..
            })
        ));
    }
}
