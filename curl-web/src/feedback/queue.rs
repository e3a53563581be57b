//! Bounded, non-blocking feedback queue
//!
//! The frame path pushes with `try_send`. When the consumer has fallen
//! behind, the new event is dropped and a warning logged.

use crossbeam_channel::{self as channel, Receiver, Sender, TryRecvError, TrySendError};

use super::{FeedbackEvent, FeedbackSink};

/// Consumer side, held by the feedback task
pub struct FeedbackQueue {
    receiver: Receiver<FeedbackEvent>,
    sender: Sender<FeedbackEvent>,
}

impl FeedbackQueue {
    /// Queue holding at most `capacity` undelivered events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = channel::bounded(capacity.max(1));
        Self { receiver, sender }
    }

    /// Producer handle for the frame path
    pub fn sender(&self) -> FeedbackSender {
        FeedbackSender {
            sender: self.sender.clone(),
        }
    }

    /// Next pending event, if any
    pub fn try_next(&self) -> Option<FeedbackEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Take every pending event in emission order
    pub fn drain(&self) -> Vec<FeedbackEvent> {
        self.receiver.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

/// Producer side; cheap to clone
#[derive(Clone)]
pub struct FeedbackSender {
    sender: Sender<FeedbackEvent>,
}

impl FeedbackSink for FeedbackSender {
    fn emit(&mut self, event: FeedbackEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                log::warn!("Feedback queue full, dropping: {}", dropped.message());
            }
            Err(TrySendError::Disconnected(dropped)) => {
                log::warn!("Feedback queue closed, dropping: {}", dropped.message());
            }
        }
    }
}
