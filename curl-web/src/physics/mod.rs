//! Physics module - joint angles and per-arm rep state
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod arm_state;

pub use angles::{calculate_joint_angle, is_degenerate};
pub use arm_state::{ArmPhase, ArmRepState, Transition, EXTEND_THRESHOLD, FLEX_THRESHOLD};
