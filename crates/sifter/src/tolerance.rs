// Local Crate Imports
use crate::{Error, Result, Tolerance};

// Public API ==========================================================================================================

pub trait MassTolerance: Sized {
    /// The largest allowed distance from `theoretical`. For relative tolerances, this scales with the theoretical mass
    fn width(&self, theoretical: f64) -> f64;

    /// Whether an `observed` mass counts as the same peak as a `theoretical` one. Both bounds are inclusive
    fn within(&self, observed: f64, theoretical: f64) -> bool {
        (observed - theoretical).abs() <= self.width(theoretical)
    }

    fn validate(self) -> Result<Self>;
}

impl MassTolerance for Tolerance {
    fn width(&self, theoretical: f64) -> f64 {
        match self {
            Self::Da(da) => *da,
            Self::PPM(ppm) => theoretical.abs() * *ppm / 1e6,
        }
    }

    fn validate(self) -> Result<Self> {
        let (Self::Da(magnitude) | Self::PPM(magnitude)) = self;
        if magnitude.is_finite() && magnitude > 0.0 {
            Ok(self)
        } else {
            Err(Error::NonPositiveTolerance { tolerance: self })
        }
    }
}

/// Parses tolerances like `0.2`, `0.2 Da`, or `10ppm` (units are case-insensitive, and bare numbers are Daltons).
/// Only positive tolerances are accepted
pub fn parse_tolerance(input: &str) -> Result<Tolerance> {
    let invalid = || Error::InvalidTolerance {
        input: input.to_owned(),
    };

    let lowercase = input.trim().to_ascii_lowercase();
    let (magnitude, unit): (_, fn(f64) -> Tolerance) =
        if let Some(ppm) = lowercase.strip_suffix("ppm") {
            (ppm, Tolerance::PPM)
        } else if let Some(da) = lowercase.strip_suffix("da") {
            (da, Tolerance::Da)
        } else {
            (lowercase.as_str(), Tolerance::Da)
        };
    let magnitude: f64 = magnitude.trim().parse().map_err(|_| invalid())?;

    unit(magnitude).validate()
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;

    use super::*;

    #[test]
    fn width() {
        assert_float_absolute_eq!(Tolerance::Da(0.2).width(1_105.577), 0.2);
        assert_float_absolute_eq!(Tolerance::PPM(10.0).width(1_000.0), 0.01);
        assert_float_absolute_eq!(Tolerance::PPM(10.0).width(2_000.0), 0.02);
    }

    #[test]
    fn within_is_inclusive() {
        let tolerance = Tolerance::Da(0.25);
        assert!(tolerance.within(1_000.25, 1_000.0));
        assert!(tolerance.within(999.75, 1_000.0));
        assert!(!tolerance.within(1_000.5, 1_000.0));
        assert!(tolerance.within(1_000.0, 1_000.0));

        let tolerance = Tolerance::PPM(250.0);
        assert!(tolerance.within(1_000.25, 1_000.0));
        assert!(tolerance.within(999.75, 1_000.0));
        assert!(!tolerance.within(1_000.5, 1_000.0));
    }

    #[test]
    fn exact_masses_always_match() {
        for tolerance in [
            Tolerance::Da(0.0),
            Tolerance::Da(0.2),
            Tolerance::PPM(0.0),
            Tolerance::PPM(5.0),
        ] {
            for mass in [800.0, 1_105.577, 3_033.4, 3_500.0] {
                assert!(tolerance.within(mass, mass));
            }
        }
    }

    #[test]
    fn validate() {
        assert!(Tolerance::Da(0.2).validate().is_ok());
        assert!(Tolerance::PPM(10.0).validate().is_ok());
        for tolerance in [
            Tolerance::Da(0.0),
            Tolerance::Da(-0.2),
            Tolerance::Da(f64::NAN),
            Tolerance::PPM(f64::INFINITY),
            Tolerance::PPM(0.0),
        ] {
            assert!(matches!(
                tolerance.validate(),
                Err(Error::NonPositiveTolerance { .. })
            ));
        }
    }

    #[test]
    fn parse() {
        let parse = |s| parse_tolerance(s).unwrap();
        assert_eq!(parse("0.2"), Tolerance::Da(0.2));
        assert_eq!(parse("0.2da"), Tolerance::Da(0.2));
        assert_eq!(parse(" 0.5 Da "), Tolerance::Da(0.5));
        assert_eq!(parse("10ppm"), Tolerance::PPM(10.0));
        assert_eq!(parse("7.5 PPM"), Tolerance::PPM(7.5));

        for invalid in ["", "ppm", "0.2 mDa", "twenty"] {
            assert!(matches!(
                parse_tolerance(invalid),
                Err(Error::InvalidTolerance { .. })
            ));
        }
        assert!(matches!(
            parse_tolerance("-0.2"),
            Err(Error::NonPositiveTolerance { .. })
        ));
    }
}
