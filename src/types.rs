use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 2D point in image pixel coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Canonical body landmarks consumed by the estimator.
///
/// Names follow the COCO/MoveNet keypoint vocabulary produced by common
/// pose detectors (`left_shoulder`, `right_knee`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Landmark {
    pub const ALL: [Landmark; 13] = [
        Landmark::Nose,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
        Landmark::LeftHip,
        Landmark::RightHip,
        Landmark::LeftKnee,
        Landmark::RightKnee,
        Landmark::LeftAnkle,
        Landmark::RightAnkle,
    ];

    /// Detector-facing name of this landmark.
    pub const fn name(self) -> &'static str {
        match self {
            Landmark::Nose => "nose",
            Landmark::LeftShoulder => "left_shoulder",
            Landmark::RightShoulder => "right_shoulder",
            Landmark::LeftElbow => "left_elbow",
            Landmark::RightElbow => "right_elbow",
            Landmark::LeftWrist => "left_wrist",
            Landmark::RightWrist => "right_wrist",
            Landmark::LeftHip => "left_hip",
            Landmark::RightHip => "right_hip",
            Landmark::LeftKnee => "left_knee",
            Landmark::RightKnee => "right_knee",
            Landmark::LeftAnkle => "left_ankle",
            Landmark::RightAnkle => "right_ankle",
        }
    }

    pub fn from_name(name: &str) -> Option<Landmark> {
        Landmark::ALL.into_iter().find(|l| l.name() == name)
    }

    /// The same landmark on the opposite side of the body. Midline landmarks map to themselves.
    pub const fn mirrored(self) -> Landmark {
        match self {
            Landmark::Nose => Landmark::Nose,
            Landmark::LeftShoulder => Landmark::RightShoulder,
            Landmark::RightShoulder => Landmark::LeftShoulder,
            Landmark::LeftElbow => Landmark::RightElbow,
            Landmark::RightElbow => Landmark::LeftElbow,
            Landmark::LeftWrist => Landmark::RightWrist,
            Landmark::RightWrist => Landmark::LeftWrist,
            Landmark::LeftHip => Landmark::RightHip,
            Landmark::RightHip => Landmark::LeftHip,
            Landmark::LeftKnee => Landmark::RightKnee,
            Landmark::RightKnee => Landmark::LeftKnee,
            Landmark::LeftAnkle => Landmark::RightAnkle,
            Landmark::RightAnkle => Landmark::LeftAnkle,
        }
    }
}

impl std::fmt::Display for Landmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, scored landmark as reported by the pose detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Detection confidence in [0, 1]. Missing scores deserialize as 0 (unusable).
    #[serde(default)]
    pub score: f64,
}

impl Keypoint {
    pub fn new(landmark: Landmark, x: f64, y: f64, score: f64) -> Self {
        Self {
            name: landmark.name().to_string(),
            x,
            y,
            score,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn landmark(&self) -> Option<Landmark> {
        Landmark::from_name(&self.name)
    }
}

/// Keypoints detected for a single person in one frame.
///
/// No completeness is implied: any subset of the canonical landmarks may be missing,
/// and keypoints with unrecognized names are carried along but never used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseResult {
    #[serde(default)]
    pub keypoints: Vec<Keypoint>,
}

/// Detector output is either one pose or a list of poses; only the first person is used.
#[derive(Deserialize)]
#[serde(untagged)]
enum PoseInput {
    Many(Vec<PoseResult>),
    One(PoseResult),
}

impl PoseResult {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Parse detector JSON. An empty pose list yields `None`.
    pub fn from_json_str(json: &str) -> Result<Option<Self>> {
        let pose = match serde_json::from_str::<PoseInput>(json)? {
            PoseInput::Many(poses) => poses.into_iter().next(),
            PoseInput::One(pose) => Some(pose),
        };
        Ok(pose)
    }

    /// Copy of this pose with every left/right label swapped.
    pub fn mirrored_labels(&self) -> Self {
        let keypoints = self
            .keypoints
            .iter()
            .map(|kp| match kp.landmark() {
                Some(l) => Keypoint {
                    name: l.mirrored().name().to_string(),
                    ..kp.clone()
                },
                None => kp.clone(),
            })
            .collect();
        Self { keypoints }
    }
}

/// Load a pose from a detector JSON file.
pub fn load_pose<P: AsRef<Path>>(path: P) -> Result<Option<PoseResult>> {
    let json = fs::read_to_string(path)?;
    PoseResult::from_json_str(&json)
}

/// Dimensions of the captured image in pixels. Both are guaranteed positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidFrame { width, height });
        }
        Ok(Self { width, height })
    }

    /// Read the frame dimensions from an image file header.
    pub fn from_image_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (width, height) = image::image_dimensions(path)?;
        Self::new(width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
