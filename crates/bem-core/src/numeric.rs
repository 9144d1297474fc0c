use crate::CoreError;

/// Floating point type used throughout the engine
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Accepts values in the closed unit interval `[0, 1]`.
pub fn ensure_fraction(v: Real, what: &'static str) -> Result<Real, CoreError> {
    ensure_in_range(v, 0.0, 1.0, what)
}

pub fn ensure_in_range(
    v: Real,
    min: Real,
    max: Real,
    what: &'static str,
) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v < min || v > max {
        return Err(CoreError::OutOfRange {
            what,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn fraction_bounds_are_inclusive() {
        assert_eq!(ensure_fraction(0.0, "f").unwrap(), 0.0);
        assert_eq!(ensure_fraction(1.0, "f").unwrap(), 1.0);
        assert!(matches!(
            ensure_fraction(1.01, "f"),
            Err(CoreError::OutOfRange { .. })
        ));
        assert!(matches!(
            ensure_fraction(-0.1, "f"),
            Err(CoreError::OutOfRange { .. })
        ));
        assert!(matches!(
            ensure_fraction(Real::INFINITY, "f"),
            Err(CoreError::NonFinite { .. })
        ));
    }
}
