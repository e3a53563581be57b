//! Per-arm curl detection with hysteresis
//!
//! A rep needs the arm to pass through "extended" before a "flexed"
//! sample counts, so jitter around a single threshold never double counts.

use serde::{Deserialize, Serialize};

/// Elbow angle above which the arm is extended (strict)
pub const EXTEND_THRESHOLD: f32 = 160.0;

/// Elbow angle below which an extended arm completes a curl (strict)
pub const FLEX_THRESHOLD: f32 = 40.0;

/// Classified position of one arm
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmPhase {
    #[default]
    Unknown,
    /// Arm hanging straight ("down")
    Extended,
    /// Arm curled up ("up")
    Flexed,
}

impl ArmPhase {
    /// Stage text for overlays
    pub fn label(&self) -> &'static str {
        match self {
            ArmPhase::Unknown => "-",
            ArmPhase::Extended => "down",
            ArmPhase::Flexed => "up",
        }
    }
}

/// Outcome of feeding one angle sample to an arm
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    NoChange,
    EnteredExtended,
    CompletedRep,
}

/// Rep state machine for a single arm
#[derive(Clone, Debug, Default)]
pub struct ArmRepState {
    phase: ArmPhase,
    rep_count: u32,
}

impl ArmRepState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one elbow angle (degrees)
    ///
    /// Never fails: NaN compares false against both thresholds and
    /// falls through to `NoChange`.
    pub fn observe(&mut self, angle: f32) -> Transition {
        if angle > EXTEND_THRESHOLD {
            let previous = std::mem::replace(&mut self.phase, ArmPhase::Extended);
            return if previous == ArmPhase::Extended {
                Transition::NoChange
            } else {
                Transition::EnteredExtended
            };
        }

        if angle < FLEX_THRESHOLD && self.phase == ArmPhase::Extended {
            self.phase = ArmPhase::Flexed;
            self.rep_count += 1;
            return Transition::CompletedRep;
        }

        Transition::NoChange
    }

    pub fn phase(&self) -> ArmPhase {
        self.phase
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Back to `Unknown` with zero reps
    pub fn reset(&mut self) {
        self.phase = ArmPhase::Unknown;
        self.rep_count = 0;
    }
}
