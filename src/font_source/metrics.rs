//! Font metrics and their override layers
//!
//! Metrics resolve in three tiers: built-in defaults, then values read from
//! an existing font document (or the settings file), then explicit caller
//! overrides.

use serde::{Deserialize, Serialize};

use crate::core::errors::{Error, Result};

/// Font id used when none is given
pub const DEFAULT_FONT_ID: &str = "SVG Font";

/// Metrics written onto the `font` and `font-face` elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FontMetrics {
    pub id: String,
    pub units_per_em: f64,
    pub horiz_adv_x: f64,
    pub ascent: f64,
    pub descent: f64,
    pub x_height: f64,
    pub cap_height: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            id: DEFAULT_FONT_ID.to_string(),
            units_per_em: 512.0,
            horiz_adv_x: 512.0,
            ascent: 480.0,
            descent: -32.0,
            x_height: 240.0,
            cap_height: 480.0,
        }
    }
}

impl FontMetrics {
    /// Overwrite every metric the overrides specify
    pub fn apply(&mut self, overrides: &MetricOverrides) {
        if let Some(id) = &overrides.id {
            self.id = id.clone();
        }
        let numeric = [
            (&mut self.units_per_em, overrides.units_per_em),
            (&mut self.horiz_adv_x, overrides.horiz_adv_x),
            (&mut self.ascent, overrides.ascent),
            (&mut self.descent, overrides.descent),
            (&mut self.x_height, overrides.x_height),
            (&mut self.cap_height, overrides.cap_height),
        ];
        for (metric, value) in numeric {
            if let Some(value) = value {
                *metric = value;
            }
        }
    }

    /// Check that the metrics can drive a conversion
    ///
    /// Units per em must be positive since every scale factor divides by it;
    /// all other metrics must be finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.units_per_em.is_finite() && self.units_per_em > 0.0) {
            return Err(Error::MalformedInput(format!(
                "units-per-em must be a positive number, got {}",
                self.units_per_em
            )));
        }
        let others = [
            ("horiz-adv-x", self.horiz_adv_x),
            ("ascent", self.ascent),
            ("descent", self.descent),
            ("x-height", self.x_height),
            ("cap-height", self.cap_height),
        ];
        match others.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(Error::MalformedInput(format!(
                "font metric {name} must be a finite number, got {value}"
            ))),
            None => Ok(()),
        }
    }

    /// Defaults with the overrides applied
    pub fn with_overrides(overrides: &MetricOverrides) -> Self {
        let mut metrics = Self::default();
        metrics.apply(overrides);
        metrics
    }
}

/// A partial set of metrics, any field may be left out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MetricOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_per_em: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horiz_adv_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap_height: Option<f64>,
}

impl MetricOverrides {
    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn merged_with(&self, other: &MetricOverrides) -> MetricOverrides {
        MetricOverrides {
            id: other.id.clone().or_else(|| self.id.clone()),
            units_per_em: other.units_per_em.or(self.units_per_em),
            horiz_adv_x: other.horiz_adv_x.or(self.horiz_adv_x),
            ascent: other.ascent.or(self.ascent),
            descent: other.descent.or(self.descent),
            x_height: other.x_height.or(self.x_height),
            cap_height: other.cap_height.or(self.cap_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let metrics = FontMetrics::default();
        assert_eq!(metrics.id, "SVG Font");
        assert_eq!(metrics.units_per_em, 512.0);
        assert_eq!(metrics.descent, -32.0);
    }

    #[test]
    fn overrides_win_over_lower_tiers() {
        let document = MetricOverrides {
            units_per_em: Some(1000.0),
            ascent: Some(800.0),
            ..Default::default()
        };
        let explicit = MetricOverrides {
            ascent: Some(900.0),
            id: Some("icons".to_string()),
            ..Default::default()
        };
        let metrics = FontMetrics::with_overrides(&document.merged_with(&explicit));
        assert_eq!(metrics.units_per_em, 1000.0);
        assert_eq!(metrics.ascent, 900.0);
        assert_eq!(metrics.id, "icons");
        assert_eq!(metrics.x_height, 240.0);
    }

    #[test]
    fn degenerate_metrics_are_rejected() {
        assert!(FontMetrics::default().validate().is_ok());
        for units_per_em in [0.0, -512.0, f64::NAN, f64::INFINITY] {
            let metrics = FontMetrics {
                units_per_em,
                ..Default::default()
            };
            assert!(matches!(metrics.validate(), Err(Error::MalformedInput(_))));
        }
        let metrics = FontMetrics {
            descent: f64::NEG_INFINITY,
            ..Default::default()
        };
        assert!(matches!(metrics.validate(), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn overrides_deserialize_from_partial_json() {
        let overrides: MetricOverrides =
            serde_json::from_str(r#"{"units-per-em": 1024, "descent": -128}"#).unwrap();
        assert_eq!(overrides.units_per_em, Some(1024.0));
        assert_eq!(overrides.descent, Some(-128.0));
        assert_eq!(overrides.id, None);
    }
}
