//! Body measurement estimation from one frame and at most one pose.
//!
//! Every measurement independently checks whether the landmarks it needs are
//! usable. If they are not, it falls back to a fixed proportion of the frame
//! width or height and is flagged as estimated. The estimator never fails.

use crate::calibration;
use crate::config::{EstimatorConfig, FallbackRatios};
use crate::keypoints::Landmarks;
use crate::measurements::{Measurement, MeasurementSet, MeasurementValue};
use crate::types::{Frame, PoseResult};

/// Pixels added above the shoulder line when the nose is missing.
const SHOULDER_TO_HEAD_TOP_PX: f64 = 20.0;
/// Pixels added below the knees when the ankles are missing.
const KNEE_TO_FLOOR_PX: f64 = 50.0;

const CHEST_TO_SHOULDER_RATIO: f64 = 1.15;
const WAIST_TO_HIP_RATIO: f64 = 0.85;
const HIPS_TO_HIP_RATIO: f64 = 1.10;

/// Stateless measurement estimator.
///
/// Holds only configuration; the scale factor is derived anew on every call.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Centimeters per pixel for this pose.
    pub fn pixel_to_cm(&self, pose: &PoseResult) -> f64 {
        let landmarks = Landmarks::new(pose, self.config.min_keypoint_score);
        calibration::pixel_to_cm(&landmarks, &self.config.calibration)
    }

    /// Estimate all seven measurements.
    ///
    /// A missing or empty pose yields the complete fallback set.
    pub fn estimate(&self, frame: &Frame, pose: Option<&PoseResult>) -> MeasurementSet {
        let fallback = &self.config.fallback;

        let Some(pose) = pose.filter(|p| !p.is_empty()) else {
            tracing::debug!("No pose available, using image-proportion fallbacks");
            return MeasurementSet::from_fn(|m| {
                MeasurementValue::fallback(fallback_cm(m, frame, fallback))
            });
        };

        let landmarks = Landmarks::new(pose, self.config.min_keypoint_score);
        let scale = calibration::pixel_to_cm(&landmarks, &self.config.calibration);

        MeasurementSet::from_fn(|m| match measure_px(m, &landmarks) {
            Some(px) => MeasurementValue::measured(px * scale),
            None => {
                tracing::debug!("{} falls back to frame proportions", m);
                MeasurementValue::fallback(fallback_cm(m, frame, fallback))
            }
        })
    }
}

/// Estimate with the default configuration.
pub fn estimate(frame: &Frame, pose: Option<&PoseResult>) -> MeasurementSet {
    Estimator::default().estimate(frame, pose)
}

/// Pixel length of a measurement, or `None` when its landmarks are insufficient.
fn measure_px(measurement: Measurement, lm: &Landmarks<'_>) -> Option<f64> {
    use crate::types::Landmark::*;

    match measurement {
        Measurement::Height => body_height_px(lm),
        Measurement::ShoulderWidth => lm.distance(LeftShoulder, RightShoulder),
        Measurement::Chest => {
            // gated on a full torso even though only the shoulders enter the formula
            lm.pair(LeftHip, RightHip)?;
            Some(lm.distance(LeftShoulder, RightShoulder)? * CHEST_TO_SHOULDER_RATIO)
        }
        Measurement::Waist => Some(lm.distance(LeftHip, RightHip)? * WAIST_TO_HIP_RATIO),
        Measurement::Hips => Some(lm.distance(LeftHip, RightHip)? * HIPS_TO_HIP_RATIO),
        Measurement::ArmLength => mean_of_sides(
            lm.distance(LeftShoulder, LeftWrist),
            lm.distance(RightShoulder, RightWrist),
        ),
        Measurement::LegLength => mean_of_sides(
            lm.distance(LeftHip, LeftAnkle),
            lm.distance(RightHip, RightAnkle),
        ),
    }
}

/// Vertical span from the top-of-body anchor to the bottom-of-body anchor.
fn body_height_px(lm: &Landmarks<'_>) -> Option<f64> {
    use crate::types::Landmark::*;

    let top = match lm.get(Nose) {
        Some(nose) => Some(nose.y),
        None => lm
            .pair(LeftShoulder, RightShoulder)
            .map(|(l, r)| l.position().midpoint(&r.position()).y - SHOULDER_TO_HEAD_TOP_PX),
    }?;

    let bottom = match lm.pair(LeftAnkle, RightAnkle) {
        Some((l, r)) => Some(l.y.max(r.y)),
        None => lm
            .pair(LeftKnee, RightKnee)
            .map(|(l, r)| l.y.max(r.y) + KNEE_TO_FLOOR_PX),
    }?;

    Some(bottom - top)
}

/// Average over whichever sides are available.
fn mean_of_sides(left: Option<f64>, right: Option<f64>) -> Option<f64> {
    match (left, right) {
        (Some(l), Some(r)) => Some((l + r) / 2.0),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

fn fallback_cm(measurement: Measurement, frame: &Frame, ratios: &FallbackRatios) -> f64 {
    let width = f64::from(frame.width());
    let height = f64::from(frame.height());
    match measurement {
        Measurement::Height => height * ratios.height,
        Measurement::ShoulderWidth => width * ratios.shoulder_width,
        Measurement::Chest => width * ratios.chest,
        Measurement::Waist => width * ratios.waist,
        Measurement::Hips => width * ratios.hips,
        Measurement::ArmLength => height * ratios.arm_length,
        Measurement::LegLength => height * ratios.leg_length,
    }
}
