//! # body-measure
//!
//! Body measurement estimation from a single image's 2D pose landmarks.
//!
//! This crate provides:
//! - **Keypoint access**: confidence-filtered landmark lookup (score > 0.3)
//! - **Calibration**: a centimeters-per-pixel factor anchored on the torso span
//! - **Measurements**: height, shoulder width, chest, waist, hips, arm and leg length
//! - **Guide fit**: whether the detected body sits inside the capture guide
//!
//! The pose detector is external: feed it an image, then hand its keypoints
//! (`name`, `x`, `y`, `score` in pixel coordinates) to [`Estimator::estimate`].
//!
//! ## Algorithm Overview
//!
//! 1. Resolve the usable landmarks of the pose
//! 2. Derive `pixel_to_cm` from the left shoulder-to-hip vertical span,
//!    assumed to be 45 cm; keep 0.12 cm/px if the anchor is missing or implausible
//! 3. Compute each measurement from its landmarks, scaled by `pixel_to_cm`
//! 4. Any measurement lacking landmarks falls back to a fixed proportion of
//!    the frame size and is flagged as estimated
//!
//! Estimation never fails. All seven measurements are always returned.
//!
//! ## Quick Start
//!
//! ```rust
//! use body_measure::{estimate, Frame, Keypoint, Landmark, Measurement, PoseResult};
//!
//! let frame = Frame::new(640, 480).unwrap();
//! let pose = PoseResult::new(vec![
//!     Keypoint::new(Landmark::LeftShoulder, 100.0, 200.0, 0.9),
//!     Keypoint::new(Landmark::RightShoulder, 200.0, 200.0, 0.9),
//!     Keypoint::new(Landmark::LeftHip, 110.0, 400.0, 0.9),
//!     Keypoint::new(Landmark::RightHip, 190.0, 400.0, 0.9),
//! ]);
//!
//! let set = estimate(&frame, Some(&pose));
//! let shoulders = set[Measurement::ShoulderWidth];
//! assert_eq!(shoulders.centimeters, 23.0);
//! assert!(!shoulders.is_estimated_fallback);
//!
//! // No ankles or knees: height comes from the frame proportions.
//! assert!(set[Measurement::Height].is_estimated_fallback);
//! ```
//!
//! ## Configuration
//!
//! The heuristic constants live in [`EstimatorConfig`]; its defaults match the
//! values above. The height fallback ratio (0.01 cm per frame pixel) is kept
//! for compatibility and can be replaced:
//!
//! ```rust
//! use body_measure::{Estimator, EstimatorConfig, Frame, Measurement};
//!
//! let estimator = Estimator::new(EstimatorConfig::default().with_height_fallback_ratio(0.35));
//! let set = estimator.estimate(&Frame::new(640, 480).unwrap(), None);
//! assert_eq!(set[Measurement::Height].centimeters, 168.0);
//! ```

pub mod calibration;
mod config;
mod error;
mod estimator;
pub mod guide;
pub mod keypoints;
mod measurements;
pub mod report;
mod types;

pub use config::{CalibrationConfig, EstimatorConfig, FallbackRatios};
pub use error::{Error, Result};
pub use estimator::{estimate, Estimator};
pub use guide::{check_fit, GuideFit};
pub use measurements::{round_half_up, Measurement, MeasurementSet, MeasurementValue};
pub use report::MeasurementRecord;
pub use types::{load_pose, Frame, Keypoint, Landmark, Point, PoseResult};
