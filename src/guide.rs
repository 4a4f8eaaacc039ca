//! Framing check: does the detected body sit inside the capture guide?
//!
//! The guide is a centered box covering 75% of the frame width and 85% of
//! its height, widened on every side by a margin of 10% of the guide width.

use crate::keypoints;
use crate::types::{Frame, Landmark, PoseResult};

const GUIDE_WIDTH_RATIO: f64 = 0.75;
const GUIDE_HEIGHT_RATIO: f64 = 0.85;
const MARGIN_RATIO: f64 = 0.1;
const MIN_INSIDE_FRACTION: f64 = 0.7;

/// Landmarks that must land inside the guide.
pub const GUIDE_LANDMARKS: [Landmark; 7] = [
    Landmark::Nose,
    Landmark::LeftShoulder,
    Landmark::RightShoulder,
    Landmark::LeftHip,
    Landmark::RightHip,
    Landmark::LeftAnkle,
    Landmark::RightAnkle,
];

/// Guide rectangle in pixel coordinates, margin included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideRegion {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl GuideRegion {
    pub fn for_frame(frame: &Frame) -> Self {
        let width = f64::from(frame.width());
        let height = f64::from(frame.height());
        let guide_w = width * GUIDE_WIDTH_RATIO;
        let guide_h = height * GUIDE_HEIGHT_RATIO;
        let margin = guide_w * MARGIN_RATIO;
        let left = (width - guide_w) / 2.0;
        let top = (height - guide_h) / 2.0;
        Self {
            left: left - margin,
            top: top - margin,
            right: left + guide_w + margin,
            bottom: top + guide_h + margin,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Outcome of a guide check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuideFit {
    /// Usable guide landmarks found in the pose.
    pub checked: usize,
    /// How many of those fall inside the guide.
    pub inside: usize,
}

impl GuideFit {
    pub fn fits(&self) -> bool {
        self.checked > 0 && self.inside as f64 / self.checked as f64 >= MIN_INSIDE_FRACTION
    }
}

pub fn check_fit(frame: &Frame, pose: Option<&PoseResult>, min_score: f64) -> GuideFit {
    let Some(pose) = pose else {
        return GuideFit::default();
    };

    let region = GuideRegion::for_frame(frame);
    let mut fit = GuideFit::default();
    for landmark in GUIDE_LANDMARKS {
        if let Some(kp) = keypoints::get(pose, landmark, min_score) {
            fit.checked += 1;
            if region.contains(kp.x, kp.y) {
                fit.inside += 1;
            }
        }
    }

    tracing::debug!("Guide fit: {}/{} landmarks inside", fit.inside, fit.checked);
    fit
}
