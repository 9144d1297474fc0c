// bem-core/src/units.rs

use uom::si::f64::{Angle as UomAngle, Power as UomPower};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type Power = UomPower;

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn degrees(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn radians(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

/// Rated power in watts, for display and notices.
#[inline]
pub fn as_watts(p: Power) -> f64 {
    use uom::si::power::watt;
    p.get::<watt>()
}

#[inline]
pub fn as_degrees(a: Angle) -> f64 {
    use uom::si::angle::degree;
    a.get::<degree>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        assert!((as_degrees(radians(core::f64::consts::PI)) - 180.0).abs() < 1e-9);
        assert_eq!(as_watts(watts(250.0)), 250.0);
        assert!((as_degrees(degrees(30.0)) - 30.0).abs() < 1e-12);
    }
}
