//! Estimator tuning parameters.
//!
//! Defaults reproduce the fixed heuristic constants; every field can be
//! overridden from a JSON file, with missing fields falling back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level estimator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// A keypoint is usable only if its score is strictly above this value.
    pub min_keypoint_score: f64,
    pub calibration: CalibrationConfig,
    pub fallback: FallbackRatios,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_keypoint_score: 0.3,
            calibration: CalibrationConfig::default(),
            fallback: FallbackRatios::default(),
        }
    }
}

/// Torso-span calibration anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Used when no anchor is available or the candidate is rejected.
    pub default_cm_per_pixel: f64,
    /// Assumed adult shoulder-to-hip vertical span.
    pub torso_reference_cm: f64,
    /// Exclusive lower bound for an accepted candidate.
    pub min_cm_per_pixel: f64,
    /// Exclusive upper bound for an accepted candidate.
    pub max_cm_per_pixel: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            default_cm_per_pixel: 0.12,
            torso_reference_cm: 45.0,
            min_cm_per_pixel: 0.05,
            max_cm_per_pixel: 0.3,
        }
    }
}

/// Image-proportion fallbacks, in centimeters per frame pixel.
///
/// Height, arm length and leg length scale with frame height; the widths scale
/// with frame width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackRatios {
    /// Kept at 0.01 for compatibility even though it yields implausibly short heights.
    pub height: f64,
    pub shoulder_width: f64,
    pub chest: f64,
    pub waist: f64,
    pub hips: f64,
    pub arm_length: f64,
    pub leg_length: f64,
}

impl Default for FallbackRatios {
    fn default() -> Self {
        Self {
            height: 0.01,
            shoulder_width: 0.18,
            chest: 0.15,
            waist: 0.12,
            hips: 0.14,
            arm_length: 0.25,
            leg_length: 0.35,
        }
    }
}

impl EstimatorConfig {
    /// Load and validate a config from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the height fallback ratio.
    pub fn with_height_fallback_ratio(mut self, ratio: f64) -> Self {
        self.fallback.height = ratio;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_keypoint_score) {
            return Err(Error::InvalidConfig(format!(
                "min_keypoint_score must be in [0, 1], got {}",
                self.min_keypoint_score
            )));
        }

        let c = &self.calibration;
        positive("calibration.default_cm_per_pixel", c.default_cm_per_pixel)?;
        positive("calibration.torso_reference_cm", c.torso_reference_cm)?;
        positive("calibration.min_cm_per_pixel", c.min_cm_per_pixel)?;
        positive("calibration.max_cm_per_pixel", c.max_cm_per_pixel)?;
        if c.min_cm_per_pixel >= c.max_cm_per_pixel {
            return Err(Error::InvalidConfig(format!(
                "calibration range is empty: ({}, {})",
                c.min_cm_per_pixel, c.max_cm_per_pixel
            )));
        }

        let f = &self.fallback;
        for (name, value) in [
            ("fallback.height", f.height),
            ("fallback.shoulder_width", f.shoulder_width),
            ("fallback.chest", f.chest),
            ("fallback.waist", f.waist),
            ("fallback.hips", f.hips),
            ("fallback.arm_length", f.arm_length),
            ("fallback.leg_length", f.leg_length),
        ] {
            positive(name, value)?;
        }

        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}
