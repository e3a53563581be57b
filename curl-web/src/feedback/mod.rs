//! Feedback module - rep events for the speech/overlay sink
//!
//! The counter only produces structured events. Turning them into speech
//! belongs to whoever drains the queue.

mod queue;

pub use queue::{FeedbackQueue, FeedbackSender};

use serde::{Deserialize, Serialize};

use crate::counter::Side;

/// One qualifying rep on one arm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub side: Side,
    pub correct: bool,
}

impl FeedbackEvent {
    pub fn new(side: Side, correct: bool) -> Self {
        Self { side, correct }
    }

    /// Short line for speech or on-screen text
    pub fn message(&self) -> String {
        if self.correct {
            format!("Good rep on your {} arm.", self.side)
        } else {
            format!("Watch your {} arm form.", self.side)
        }
    }
}

/// Receives feedback events
///
/// Implementations must not block: `emit` is called from the frame path.
pub trait FeedbackSink {
    fn emit(&mut self, event: FeedbackEvent);
}

impl FeedbackSink for Vec<FeedbackEvent> {
    fn emit(&mut self, event: FeedbackEvent) {
        self.push(event);
    }
}
