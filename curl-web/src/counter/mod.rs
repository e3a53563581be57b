//! Counter module - keypoints in, per-frame rep results out
//!
//! Re-exports only. All logic in submodules.

mod keypoints;
mod rep_counter;

pub use keypoints::{KeypointLayout, KeypointSet, Landmark, Point2D, Side};
pub use rep_counter::{FrameResult, RepCounter};
