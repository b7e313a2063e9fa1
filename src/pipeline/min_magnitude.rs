use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::app_err;

/// Smallest threshold a user may select.
pub const MIN_MAGNITUDE_FLOOR: f64 = 0.0;

/// Largest threshold a user may select.
pub const MIN_MAGNITUDE_CEILING: f64 = 8.0;

/// A user-selected magnitude threshold: `0.0..=8.0` in steps of `0.1`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MinMagnitude(f64);

impl MinMagnitude {
    /// Validate a threshold.
    pub fn new(value: f64) -> crate::Result<Self> {
        if !value.is_finite() || !(MIN_MAGNITUDE_FLOOR..=MIN_MAGNITUDE_CEILING).contains(&value) {
            return Err(app_err!(
                "minimum magnitude must be between {MIN_MAGNITUDE_FLOOR:.1} and {MIN_MAGNITUDE_CEILING:.1}, got {value}"
            ));
        }

        let tenths = value * 10.0;
        if (tenths - tenths.round()).abs() > 1e-9 {
            return Err(app_err!("minimum magnitude must be a multiple of 0.1, got {value}"));
        }

        Ok(Self(tenths.round() / 10.0))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for MinMagnitude {
    fn default() -> Self {
        Self(3.0)
    }
}

impl Display for MinMagnitude {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl FromStr for MinMagnitude {
    type Err = ohno::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_parse_error| app_err!("'{s}' is not a number"))?;
        Self::new(value)
    }
}

/// Command-line value parser for [`MinMagnitude`].
pub fn parse_min_magnitude(s: &str) -> Result<MinMagnitude, String> {
    s.parse::<MinMagnitude>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_three() {
        assert_eq!(MinMagnitude::default().value(), 3.0);
    }

    #[test]
    fn test_accepts_range_bounds() {
        assert_eq!(MinMagnitude::new(0.0).unwrap().value(), 0.0);
        assert_eq!(MinMagnitude::new(8.0).unwrap().value(), 8.0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(MinMagnitude::new(-0.1).is_err());
        assert!(MinMagnitude::new(8.1).is_err());
        assert!(MinMagnitude::new(f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_off_step_values() {
        assert!(MinMagnitude::new(3.05).is_err());
        assert!(MinMagnitude::new(0.01).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!("4.5".parse::<MinMagnitude>().unwrap().value(), 4.5);
        assert_eq!(" 2 ".parse::<MinMagnitude>().unwrap().value(), 2.0);
        assert!("big".parse::<MinMagnitude>().is_err());
    }

    #[test]
    fn test_float_noise_is_snapped_to_step() {
        assert_eq!(MinMagnitude::new(0.1 + 0.2).unwrap().value(), 0.3);
    }

    #[test]
    fn test_display() {
        assert_eq!(MinMagnitude::new(3.0).unwrap().to_string(), "3.0");
    }

    #[test]
    fn test_value_parser_error_is_readable() {
        let err = parse_min_magnitude("9").unwrap_err();
        assert!(err.contains("between 0.0 and 8.0"));
    }
}
