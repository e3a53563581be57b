//! Per-frame keypoint set and estimator layouts
//!
//! The pose estimator hands over a flat array of keypoints. Only the six
//! arm landmarks are kept, each as `Option` so a landmark the estimator
//! could not localize is simply absent for that frame.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CurlError, CurlResult};

/// Image-space coordinate in pixels
pub type Point2D = (f32, f32);

// ============================================================================
// LANDMARK INDICES
// ============================================================================

/// COCO-17 (YOLOv8-pose)
const COCO_LEFT_SHOULDER: usize = 5;
const COCO_RIGHT_SHOULDER: usize = 6;
const COCO_LEFT_ELBOW: usize = 7;
const COCO_RIGHT_ELBOW: usize = 8;
const COCO_LEFT_WRIST: usize = 9;
const COCO_RIGHT_WRIST: usize = 10;

/// MediaPipe Pose (33 total)
const MP_LEFT_SHOULDER: usize = 11;
const MP_RIGHT_SHOULDER: usize = 12;
const MP_LEFT_ELBOW: usize = 13;
const MP_RIGHT_ELBOW: usize = 14;
const MP_LEFT_WRIST: usize = 15;
const MP_RIGHT_WRIST: usize = 16;

// ============================================================================
// LANDMARKS AND SIDES
// ============================================================================

/// The arm landmarks a curl needs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Landmark {
    LeftShoulder,
    LeftElbow,
    LeftWrist,
    RightShoulder,
    RightElbow,
    RightWrist,
}

impl Landmark {
    pub const ALL: [Landmark; 6] = [
        Landmark::LeftShoulder,
        Landmark::LeftElbow,
        Landmark::LeftWrist,
        Landmark::RightShoulder,
        Landmark::RightElbow,
        Landmark::RightWrist,
    ];

    fn slot(self) -> usize {
        match self {
            Landmark::LeftShoulder => 0,
            Landmark::LeftElbow => 1,
            Landmark::LeftWrist => 2,
            Landmark::RightShoulder => 3,
            Landmark::RightElbow => 4,
            Landmark::RightWrist => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Landmark::LeftShoulder => "shoulder-left",
            Landmark::LeftElbow => "elbow-left",
            Landmark::LeftWrist => "wrist-left",
            Landmark::RightShoulder => "shoulder-right",
            Landmark::RightElbow => "elbow-right",
            Landmark::RightWrist => "wrist-right",
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which arm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Shoulder, elbow, wrist for this arm
    pub fn landmarks(&self) -> [Landmark; 3] {
        match self {
            Side::Left => [Landmark::LeftShoulder, Landmark::LeftElbow, Landmark::LeftWrist],
            Side::Right => [Landmark::RightShoulder, Landmark::RightElbow, Landmark::RightWrist],
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// ESTIMATOR LAYOUTS
// ============================================================================

/// Keypoint ordering of the upstream pose estimator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeypointLayout {
    /// YOLOv8-pose, 17 COCO keypoints
    #[default]
    #[serde(rename = "coco17", alias = "coco", alias = "yolo")]
    Coco17,
    /// MediaPipe Pose, 33 landmarks
    #[serde(rename = "mediapipe33", alias = "mediapipe")]
    MediaPipe33,
}

impl KeypointLayout {
    pub fn keypoint_count(&self) -> usize {
        match self {
            KeypointLayout::Coco17 => 17,
            KeypointLayout::MediaPipe33 => 33,
        }
    }

    /// Index of a landmark in the estimator's output
    pub fn index(&self, landmark: Landmark) -> usize {
        match (self, landmark) {
            (KeypointLayout::Coco17, Landmark::LeftShoulder) => COCO_LEFT_SHOULDER,
            (KeypointLayout::Coco17, Landmark::LeftElbow) => COCO_LEFT_ELBOW,
            (KeypointLayout::Coco17, Landmark::LeftWrist) => COCO_LEFT_WRIST,
            (KeypointLayout::Coco17, Landmark::RightShoulder) => COCO_RIGHT_SHOULDER,
            (KeypointLayout::Coco17, Landmark::RightElbow) => COCO_RIGHT_ELBOW,
            (KeypointLayout::Coco17, Landmark::RightWrist) => COCO_RIGHT_WRIST,
            (KeypointLayout::MediaPipe33, Landmark::LeftShoulder) => MP_LEFT_SHOULDER,
            (KeypointLayout::MediaPipe33, Landmark::LeftElbow) => MP_LEFT_ELBOW,
            (KeypointLayout::MediaPipe33, Landmark::LeftWrist) => MP_LEFT_WRIST,
            (KeypointLayout::MediaPipe33, Landmark::RightShoulder) => MP_RIGHT_SHOULDER,
            (KeypointLayout::MediaPipe33, Landmark::RightElbow) => MP_RIGHT_ELBOW,
            (KeypointLayout::MediaPipe33, Landmark::RightWrist) => MP_RIGHT_WRIST,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeypointLayout::Coco17 => "coco17",
            KeypointLayout::MediaPipe33 => "mediapipe33",
        }
    }
}

impl FromStr for KeypointLayout {
    type Err = CurlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coco17" | "coco" | "yolo" => Ok(KeypointLayout::Coco17),
            "mediapipe33" | "mediapipe" => Ok(KeypointLayout::MediaPipe33),
            _ => Err(CurlError::UnknownLayout(s.to_string())),
        }
    }
}

// ============================================================================
// KEYPOINT SET
// ============================================================================

/// Arm landmarks for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeypointSet {
    points: [Option<Point2D>; 6],
}

impl KeypointSet {
    /// Empty set: every landmark absent
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, landmark: Landmark, point: Point2D) -> Self {
        self.set(landmark, Some(point));
        self
    }

    pub fn set(&mut self, landmark: Landmark, point: Option<Point2D>) {
        self.points[landmark.slot()] = point;
    }

    pub fn get(&self, landmark: Landmark) -> Option<Point2D> {
        self.points[landmark.slot()]
    }

    /// Shoulder, elbow, wrist if all three are present
    pub fn arm(&self, side: Side) -> Option<(Point2D, Point2D, Point2D)> {
        let [shoulder, elbow, wrist] = side.landmarks();
        Some((self.get(shoulder)?, self.get(elbow)?, self.get(wrist)?))
    }

    /// Absent landmarks of one arm (diagnostics)
    pub fn missing(&self, side: Side) -> Vec<Landmark> {
        side.landmarks()
            .into_iter()
            .filter(|l| self.get(*l).is_none())
            .collect()
    }

    /// Build from the estimator's flat output
    ///
    /// `data` is either `[x, y]` or `[x, y, confidence]` per keypoint, in
    /// the layout's order, or empty when no person was detected. The stride
    /// is taken from the length (see [`infer_stride`]). A keypoint is absent
    /// when its index lies past the end of `data`, when it is non-finite,
    /// sits at exactly (0, 0) (the estimator's "not localized" marker), or
    /// has a confidence below `min_confidence`.
    pub fn from_flat(data: &[f32], layout: KeypointLayout, min_confidence: f32) -> CurlResult<Self> {
        if data.is_empty() {
            return Ok(Self::new());
        }
        let stride = infer_stride(data.len(), layout.keypoint_count())?;

        let mut set = Self::new();
        for landmark in Landmark::ALL {
            let base = layout.index(landmark) * stride;
            let (Some(&x), Some(&y)) = (data.get(base), data.get(base + 1)) else {
                continue;
            };

            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            if x == 0.0 && y == 0.0 {
                continue;
            }
            if stride == 3 {
                match data.get(base + 2) {
                    Some(&confidence) if confidence >= min_confidence => {}
                    _ => continue,
                }
            }

            set.set(landmark, Some((x, y)));
        }

        Ok(set)
    }
}

/// Values per keypoint for a flat array of `len` values
///
/// An exact match for `count` keypoints wins. Otherwise a stride whose
/// keypoint count fits the layout is preferred, 3 over 2; failing that any
/// stride dividing `len`, 3 over 2.
pub fn infer_stride(len: usize, count: usize) -> CurlResult<usize> {
    if len == count * 3 {
        return Ok(3);
    }
    if len == count * 2 {
        return Ok(2);
    }

    let fits = |stride: usize| len % stride == 0 && len / stride <= count;
    if fits(3) {
        Ok(3)
    } else if fits(2) {
        Ok(2)
    } else if len % 3 == 0 {
        Ok(3)
    } else if len % 2 == 0 {
        Ok(2)
    } else {
        Err(CurlError::InvalidKeypointData { len })
    }
}
