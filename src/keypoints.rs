//! Confidence-filtered keypoint lookup.
//!
//! An absent or low-confidence landmark is a normal outcome, so lookups return
//! `Option` and never a zero-coordinate placeholder.

use crate::types::{Keypoint, Landmark, PoseResult};

/// Find `landmark` in `pose` if present with `score > min_score`.
///
/// If the detector reports the same name twice, the first usable entry wins.
pub fn get(pose: &PoseResult, landmark: Landmark, min_score: f64) -> Option<&Keypoint> {
    let name = landmark.name();
    pose.keypoints
        .iter()
        .find(|kp| kp.name == name && kp.score > min_score)
}

/// Euclidean pixel distance, or `None` if either endpoint is absent.
pub fn distance(a: Option<&Keypoint>, b: Option<&Keypoint>) -> Option<f64> {
    Some(a?.position().distance(&b?.position()))
}

/// Usable keypoints of one pose, resolved once per estimation call.
#[derive(Debug, Clone, Copy)]
pub struct Landmarks<'a> {
    pose: &'a PoseResult,
    min_score: f64,
}

impl<'a> Landmarks<'a> {
    pub fn new(pose: &'a PoseResult, min_score: f64) -> Self {
        Self { pose, min_score }
    }

    pub fn get(&self, landmark: Landmark) -> Option<&'a Keypoint> {
        get(self.pose, landmark, self.min_score)
    }

    /// Both keypoints of a pair, only when both are usable.
    pub fn pair(&self, a: Landmark, b: Landmark) -> Option<(&'a Keypoint, &'a Keypoint)> {
        Some((self.get(a)?, self.get(b)?))
    }

    pub fn distance(&self, a: Landmark, b: Landmark) -> Option<f64> {
        distance(self.get(a), self.get(b))
    }
}
