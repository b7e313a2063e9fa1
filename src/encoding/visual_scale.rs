use super::Rgba;
use crate::Result;
use ohno::app_err;
use serde::{Deserialize, Serialize};

/// Color and size scale used to draw events on the map.
///
/// Magnitudes below `moderate_threshold` are minor, magnitudes in
/// `moderate_threshold..significant_threshold` are moderate, and anything at or above
/// `significant_threshold` is significant. Unknown magnitudes get their own color and the
/// minimum radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct VisualScale {
    /// Lowest magnitude drawn as moderate
    pub moderate_threshold: f64,

    /// Lowest magnitude drawn as significant
    pub significant_threshold: f64,

    pub unknown_color: Rgba,
    pub minor_color: Rgba,
    pub moderate_color: Rgba,
    pub significant_color: Rgba,

    /// Radius for a magnitude of zero, and for unknown magnitudes
    pub radius_min: u32,

    /// Radius added per unit of magnitude
    pub radius_scale: f64,
}

impl VisualScale {
    /// Color for a magnitude. `None` and NaN are unknown.
    #[must_use]
    pub fn color(&self, mag: Option<f64>) -> Rgba {
        match mag.filter(|m| !m.is_nan()) {
            None => self.unknown_color,
            Some(m) if m < self.moderate_threshold => self.minor_color,
            Some(m) if m < self.significant_threshold => self.moderate_color,
            Some(_) => self.significant_color,
        }
    }

    /// Point radius for a magnitude, in display units.
    ///
    /// The result is truncated toward zero and not clamped: a negative magnitude can yield a
    /// radius below `radius_min`, or below zero.
    #[must_use]
    pub fn radius(&self, mag: Option<f64>) -> i64 {
        match mag.filter(|m| !m.is_nan()) {
            None => i64::from(self.radius_min),
            Some(m) => {
                #[expect(clippy::cast_possible_truncation, reason = "truncation toward zero is the intended rounding")]
                let radius = (f64::from(self.radius_min) + m * self.radius_scale) as i64;
                radius
            }
        }
    }

    /// Check that the thresholds are ordered and the scale is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.moderate_threshold.is_finite() || !self.significant_threshold.is_finite() {
            return Err(app_err!("scale thresholds must be finite numbers"));
        }

        if self.moderate_threshold >= self.significant_threshold {
            return Err(app_err!(
                "moderate_threshold ({}) must be less than significant_threshold ({})",
                self.moderate_threshold,
                self.significant_threshold
            ));
        }

        if !self.radius_scale.is_finite() {
            return Err(app_err!("radius_scale must be a finite number, got {}", self.radius_scale));
        }

        Ok(())
    }
}

impl Default for VisualScale {
    fn default() -> Self {
        Self {
            moderate_threshold: 3.0,
            significant_threshold: 5.0,
            unknown_color: Rgba::new(128, 128, 128, 180),
            minor_color: Rgba::new(50, 180, 70, 160),
            moderate_color: Rgba::new(230, 200, 40, 170),
            significant_color: Rgba::new(220, 60, 50, 190),
            radius_min: 3000,
            radius_scale: 10000.0,
        }
    }
}

/// Color for a magnitude on the default scale.
#[must_use]
pub fn color_from_mag(mag: Option<f64>) -> Rgba {
    VisualScale::default().color(mag)
}

/// Radius for a magnitude on the default scale.
#[must_use]
pub fn radius_from_mag(mag: Option<f64>) -> i64 {
    VisualScale::default().radius(mag)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAY: Rgba = Rgba::new(128, 128, 128, 180);
    const GREEN: Rgba = Rgba::new(50, 180, 70, 160);
    const YELLOW: Rgba = Rgba::new(230, 200, 40, 170);
    const RED: Rgba = Rgba::new(220, 60, 50, 190);

    #[test]
    fn test_unknown_magnitude() {
        assert_eq!(color_from_mag(None), GRAY);
        assert_eq!(color_from_mag(Some(f64::NAN)), GRAY);
        assert_eq!(radius_from_mag(None), 3000);
        assert_eq!(radius_from_mag(Some(f64::NAN)), 3000);
    }

    #[test]
    fn test_color_boundaries_are_half_open() {
        assert_eq!(color_from_mag(Some(2.9)), GREEN);
        assert_eq!(color_from_mag(Some(3.0)), YELLOW);
        assert_eq!(color_from_mag(Some(4.999)), YELLOW);
        assert_eq!(color_from_mag(Some(5.0)), RED);
    }

    #[test]
    fn test_color_extremes() {
        assert_eq!(color_from_mag(Some(0.0)), GREEN);
        assert_eq!(color_from_mag(Some(-1.2)), GREEN);
        assert_eq!(color_from_mag(Some(9.5)), RED);
    }

    #[test]
    fn test_radius() {
        assert_eq!(radius_from_mag(Some(4.2)), 45000);
        assert_eq!(radius_from_mag(Some(0.0)), 3000);
        assert_eq!(radius_from_mag(Some(1.23456)), 15345);
    }

    #[test]
    fn test_negative_magnitude_radius_is_not_clamped() {
        assert_eq!(radius_from_mag(Some(-0.25)), 500);
        assert_eq!(radius_from_mag(Some(-0.5)), -2000);
    }

    #[test]
    fn test_custom_scale() {
        let scale = VisualScale {
            moderate_threshold: 1.0,
            significant_threshold: 2.0,
            radius_min: 10,
            radius_scale: 1.0,
            ..VisualScale::default()
        };

        assert_eq!(scale.color(Some(0.5)), GREEN);
        assert_eq!(scale.color(Some(1.5)), YELLOW);
        assert_eq!(scale.color(Some(2.0)), RED);
        assert_eq!(scale.radius(Some(2.9)), 12);
        assert_eq!(scale.radius(None), 10);
    }

    #[test]
    fn test_default_is_valid() {
        VisualScale::default().validate().unwrap();
    }

    #[test]
    fn test_validate_inverted_thresholds() {
        let scale = VisualScale {
            moderate_threshold: 5.0,
            significant_threshold: 3.0,
            ..VisualScale::default()
        };
        assert!(scale.validate().is_err());
    }

    #[test]
    fn test_validate_equal_thresholds() {
        let scale = VisualScale {
            moderate_threshold: 4.0,
            significant_threshold: 4.0,
            ..VisualScale::default()
        };
        assert!(scale.validate().is_err());
    }

    #[test]
    fn test_validate_non_finite_scale() {
        let scale = VisualScale {
            radius_scale: f64::INFINITY,
            ..VisualScale::default()
        };
        assert!(scale.validate().is_err());
    }
}
