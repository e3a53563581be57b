//! Two-arm rep counter
//!
//! Drives one `ArmRepState` per arm from a frame's keypoints. Each arm is
//! updated independently: a missing landmark on one side leaves that side
//! untouched for the frame and never affects the other.

use serde::Serialize;

use super::keypoints::{KeypointSet, Side};
use crate::feedback::{FeedbackEvent, FeedbackSink};
use crate::physics::{calculate_joint_angle, is_degenerate, ArmPhase, ArmRepState, Transition};

/// Everything the overlay needs for one frame
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameResult {
    pub left_count: u32,
    pub right_count: u32,
    pub left_phase: ArmPhase,
    pub right_phase: ArmPhase,
    /// Elbow angle in degrees, `None` when the arm was skipped this frame
    pub left_angle: Option<f32>,
    pub right_angle: Option<f32>,
    pub events: Vec<FeedbackEvent>,
}

impl FrameResult {
    pub fn count(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_count,
            Side::Right => self.right_count,
        }
    }

    pub fn phase(&self, side: Side) -> ArmPhase {
        match side {
            Side::Left => self.left_phase,
            Side::Right => self.right_phase,
        }
    }

    pub fn angle(&self, side: Side) -> Option<f32> {
        match side {
            Side::Left => self.left_angle,
            Side::Right => self.right_angle,
        }
    }
}

/// Per-session counter for both arms
///
/// Frames must be fed in capture order; the hysteresis is order dependent.
#[derive(Clone, Debug, Default)]
pub struct RepCounter {
    left: ArmRepState,
    right: ArmRepState,
}

impl RepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&self, side: Side) -> &ArmRepState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn arm_mut(&mut self, side: Side) -> &mut ArmRepState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn left(&self) -> &ArmRepState {
        &self.left
    }

    pub fn right(&self) -> &ArmRepState {
        &self.right
    }

    /// Reps across both arms
    pub fn total_reps(&self) -> u32 {
        self.left.rep_count() + self.right.rep_count()
    }

    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }

    /// Update both arms from one frame
    pub fn process_frame(&mut self, keypoints: &KeypointSet) -> FrameResult {
        let mut events = Vec::new();
        let left_angle = self.update_arm(Side::Left, keypoints, &mut events);
        let right_angle = self.update_arm(Side::Right, keypoints, &mut events);

        FrameResult {
            left_count: self.left.rep_count(),
            right_count: self.right.rep_count(),
            left_phase: self.left.phase(),
            right_phase: self.right.phase(),
            left_angle,
            right_angle,
            events,
        }
    }

    /// `process_frame`, then hand the frame's events to `sink`
    pub fn process_frame_into<S>(&mut self, keypoints: &KeypointSet, sink: &mut S) -> FrameResult
    where
        S: FeedbackSink + ?Sized,
    {
        let result = self.process_frame(keypoints);
        for event in &result.events {
            sink.emit(*event);
        }
        result
    }

    /// Returns the observed angle, or `None` if the arm was skipped or the
    /// angle is not a number
    fn update_arm(
        &mut self,
        side: Side,
        keypoints: &KeypointSet,
        events: &mut Vec<FeedbackEvent>,
    ) -> Option<f32> {
        let Some((shoulder, elbow, wrist)) = keypoints.arm(side) else {
            log::debug!(
                "Skipping {} arm, missing landmarks: {:?}",
                side,
                keypoints.missing(side)
            );
            return None;
        };

        if is_degenerate(shoulder, elbow, wrist) {
            log::debug!("Degenerate {} arm geometry at elbow {:?}", side, elbow);
        }

        let angle = calculate_joint_angle(shoulder, elbow, wrist);

        let arm = self.arm_mut(side);
        match arm.observe(angle) {
            Transition::CompletedRep => {
                log::debug!("{} arm rep {} at {:.1}°", side, arm.rep_count(), angle);
                events.push(FeedbackEvent::new(side, true));
            }
            Transition::EnteredExtended => {
                log::trace!("{} arm extended at {:.1}°", side, angle);
            }
            Transition::NoChange => {}
        }

        // NaN passes through observe as NoChange but is not worth drawing
        angle.is_finite().then_some(angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::Landmark;
    use approx::assert_abs_diff_eq;

    /// Arm with the elbow at the origin and the given interior angle
    fn arm_at(keypoints: KeypointSet, side: Side, angle_deg: f32) -> KeypointSet {
        let [shoulder, elbow, wrist] = side.landmarks();
        let rad = angle_deg.to_radians();
        keypoints
            .with(shoulder, (0.0, -100.0))
            .with(elbow, (0.0, 0.0))
            .with(wrist, (100.0 * rad.sin(), -100.0 * rad.cos()))
    }

    fn left_at(angle_deg: f32) -> KeypointSet {
        arm_at(KeypointSet::new(), Side::Left, angle_deg)
    }

    #[test]
    fn test_initial_state() {
        let counter = RepCounter::new();
        assert_eq!(counter.left().phase(), ArmPhase::Unknown);
        assert_eq!(counter.right().phase(), ArmPhase::Unknown);
        assert_eq!(counter.total_reps(), 0);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut counter = RepCounter::new();

        let frame1 = counter.process_frame(&left_at(170.0));
        assert_eq!(frame1.left_phase, ArmPhase::Extended);
        assert_eq!(frame1.left_count, 0);
        assert!(frame1.events.is_empty());
        assert_abs_diff_eq!(frame1.left_angle.unwrap(), 170.0, epsilon = 0.01);

        let frame2 = counter.process_frame(&left_at(35.0));
        assert_eq!(frame2.left_phase, ArmPhase::Flexed);
        assert_eq!(frame2.left_count, 1);
        assert_eq!(frame2.events, vec![FeedbackEvent::new(Side::Left, true)]);

        let frame3 = counter.process_frame(&left_at(35.0));
        assert_eq!(frame3.right_count, 0);
        assert_eq!(frame3.right_phase, ArmPhase::Unknown);
        assert_eq!(frame3.right_angle, None);
        assert!(frame3.events.is_empty());
    }

    #[test]
    fn test_missing_right_wrist_isolated() {
        let mut counter = RepCounter::new();
        counter.process_frame(&arm_at(left_at(170.0), Side::Right, 170.0));
        assert_eq!(counter.right().phase(), ArmPhase::Extended);

        // Right wrist drops out while both arms curl
        let mut curl = arm_at(left_at(30.0), Side::Right, 30.0);
        curl.set(Landmark::RightWrist, None);
        let result = counter.process_frame(&curl);

        assert_eq!(result.left_count, 1);
        assert_eq!(result.left_phase, ArmPhase::Flexed);
        assert_eq!(result.right_count, 0);
        assert_eq!(result.right_phase, ArmPhase::Extended);
        assert_eq!(result.right_angle, None);
        assert_eq!(result.events, vec![FeedbackEvent::new(Side::Left, true)]);

        // Wrist comes back: the extension carried over
        let result = counter.process_frame(&arm_at(left_at(30.0), Side::Right, 30.0));
        assert_eq!(result.right_count, 1);
        assert_eq!(result.events, vec![FeedbackEvent::new(Side::Right, true)]);
    }

    #[test]
    fn test_both_arms_same_frame() {
        let mut counter = RepCounter::new();
        counter.process_frame(&arm_at(left_at(170.0), Side::Right, 170.0));
        let result = counter.process_frame(&arm_at(left_at(20.0), Side::Right, 20.0));

        assert_eq!(
            result.events,
            vec![
                FeedbackEvent::new(Side::Left, true),
                FeedbackEvent::new(Side::Right, true)
            ]
        );
        assert_eq!(counter.total_reps(), 2);
    }

    #[test]
    fn test_empty_frame_carries_state() {
        let mut counter = RepCounter::new();
        counter.process_frame(&left_at(170.0));
        let result = counter.process_frame(&KeypointSet::new());
        assert_eq!(result.left_phase, ArmPhase::Extended);
        assert_eq!(result.left_angle, None);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_degenerate_geometry_does_not_panic() {
        let mut counter = RepCounter::new();
        let p = (50.0, 50.0);
        let keypoints = KeypointSet::new()
            .with(Landmark::LeftShoulder, p)
            .with(Landmark::LeftElbow, p)
            .with(Landmark::LeftWrist, p);
        let result = counter.process_frame(&keypoints);
        assert_eq!(result.left_count, 0);
    }

    #[test]
    fn test_nan_keypoint_flows_through_as_no_change() {
        let mut counter = RepCounter::new();
        counter.process_frame(&left_at(170.0));

        let keypoints = left_at(30.0).with(Landmark::LeftWrist, (f32::NAN, 10.0));
        let result = counter.process_frame(&keypoints);
        assert_eq!(result.left_phase, ArmPhase::Extended);
        assert_eq!(result.left_count, 0);
        assert_eq!(result.left_angle, None);
        assert!(result.events.is_empty());

        let result = counter.process_frame(&left_at(30.0));
        assert_eq!(result.left_count, 1);
    }

    #[test]
    fn test_process_frame_into_sink() {
        let mut counter = RepCounter::new();
        let mut sink: Vec<FeedbackEvent> = Vec::new();
        counter.process_frame_into(&left_at(170.0), &mut sink);
        counter.process_frame_into(&left_at(30.0), &mut sink);
        assert_eq!(sink, vec![FeedbackEvent::new(Side::Left, true)]);
    }

    #[test]
    fn test_reset() {
        let mut counter = RepCounter::new();
        counter.process_frame(&left_at(170.0));
        counter.process_frame(&left_at(30.0));
        counter.reset();
        assert_eq!(counter.total_reps(), 0);
        assert_eq!(counter.arm(Side::Left).phase(), ArmPhase::Unknown);
    }
}
