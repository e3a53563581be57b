//! Curl session and JS bridge
//!
//! Receives pose keypoints from JavaScript once per video frame, runs them
//! through the rep counter and queues feedback for the page's speech loop.
//! Each `CurlSession` owns its own counter; two cameras means two sessions.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::CounterConfig;
use crate::counter::{FrameResult, KeypointLayout, KeypointSet, RepCounter, Side};
use crate::error::CurlResult;
use crate::feedback::{FeedbackEvent, FeedbackQueue, FeedbackSender};

/// Feedback line as handed to the page
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpokenFeedback {
    pub side: Side,
    pub correct: bool,
    pub message: String,
    /// Words per minute
    pub rate: u32,
}

/// One counting session for one subject
#[wasm_bindgen]
pub struct CurlSession {
    config: CounterConfig,
    counter: RepCounter,
    queue: FeedbackQueue,
    sender: FeedbackSender,
    frames: u64,
    malformed_frames: u64,
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

#[wasm_bindgen]
impl CurlSession {
    /// Session with default configuration (YOLOv8-pose keypoints)
    #[wasm_bindgen(constructor)]
    pub fn new() -> CurlSession {
        Self::with_config(CounterConfig::default())
    }

    /// Session from a JSON config object string
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<CurlSession, JsValue> {
        let config = CounterConfig::from_json(json)?;
        Ok(Self::with_config(config))
    }

    /// Default session for a named keypoint layout
    /// ("coco17", "coco", "yolo", "mediapipe33", "mediapipe")
    #[wasm_bindgen(js_name = withLayout)]
    pub fn with_layout_js(layout: &str) -> Result<CurlSession, JsValue> {
        Ok(Self::for_layout(layout)?)
    }

    /// Called from JavaScript with the estimator's flat Float32Array
    /// (17 or 33 keypoints × x, y[, confidence]; empty when nobody is in view)
    ///
    /// Returns the frame result as a plain object. Never throws.
    #[wasm_bindgen(js_name = processFrame)]
    pub fn process_frame_js(&mut self, data: &[f32]) -> JsValue {
        let result = self.process_flat(data);
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    /// Pending feedback lines, oldest first. Called by the speech loop.
    #[wasm_bindgen(js_name = drainFeedback)]
    pub fn drain_feedback_js(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.drain_feedback()).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(getter)]
    pub fn greeting(&self) -> String {
        self.config.greeting.clone()
    }

    #[wasm_bindgen(getter = speechRate)]
    pub fn speech_rate(&self) -> u32 {
        self.config.speech_rate
    }

    #[wasm_bindgen(getter)]
    pub fn layout(&self) -> String {
        self.config.layout.name().to_string()
    }

    #[wasm_bindgen(getter = leftCount)]
    pub fn left_count(&self) -> u32 {
        self.counter.left().rep_count()
    }

    #[wasm_bindgen(getter = rightCount)]
    pub fn right_count(&self) -> u32 {
        self.counter.right().rep_count()
    }

    /// Overlay stage text: "down", "up" or "-"
    #[wasm_bindgen(getter = leftStage)]
    pub fn left_stage(&self) -> String {
        self.counter.left().phase().label().to_string()
    }

    #[wasm_bindgen(getter = rightStage)]
    pub fn right_stage(&self) -> String {
        self.counter.right().phase().label().to_string()
    }

    #[wasm_bindgen(getter = totalReps)]
    pub fn total_reps(&self) -> u32 {
        self.counter.total_reps()
    }

    #[wasm_bindgen(getter = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.frames as f64
    }

    /// Start a new set: zero both arms and discard pending feedback
    pub fn reset(&mut self) {
        self.counter.reset();
        self.queue.drain();
        self.frames = 0;
        self.malformed_frames = 0;
        log::info!("Curl session reset");
    }
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

impl CurlSession {
    pub fn with_config(config: CounterConfig) -> Self {
        let queue = FeedbackQueue::new(config.feedback_capacity);
        let sender = queue.sender();
        log::info!(
            "Curl session started (layout: {}, min confidence: {})",
            config.layout.name(),
            config.min_confidence
        );
        Self {
            config,
            counter: RepCounter::new(),
            queue,
            sender,
            frames: 0,
            malformed_frames: 0,
        }
    }

    pub fn for_layout(layout: &str) -> CurlResult<Self> {
        let config = CounterConfig {
            layout: layout.parse::<KeypointLayout>()?,
            ..CounterConfig::default()
        };
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn counter(&self) -> &RepCounter {
        &self.counter
    }

    /// Frames whose keypoint array length fit neither stride
    pub fn malformed_frames(&self) -> u64 {
        self.malformed_frames
    }

    /// Parse one flat frame and update the counter
    ///
    /// A malformed array is treated as a frame with no landmarks.
    pub fn process_flat(&mut self, data: &[f32]) -> FrameResult {
        let keypoints = match KeypointSet::from_flat(data, self.config.layout, self.config.min_confidence) {
            Ok(keypoints) => keypoints,
            Err(err) => {
                self.malformed_frames += 1;
                log::warn!("{}", err);
                KeypointSet::new()
            }
        };
        self.process_keypoints(&keypoints)
    }

    pub fn process_keypoints(&mut self, keypoints: &KeypointSet) -> FrameResult {
        self.frames += 1;
        self.counter.process_frame_into(keypoints, &mut self.sender)
    }

    /// Raw pending events, oldest first
    pub fn drain_events(&self) -> Vec<FeedbackEvent> {
        self.queue.drain()
    }

    pub fn drain_feedback(&self) -> Vec<SpokenFeedback> {
        self.drain_events()
            .into_iter()
            .map(|event| SpokenFeedback {
                side: event.side,
                correct: event.correct,
                message: event.message(),
                rate: self.config.speech_rate,
            })
            .collect()
    }
}

impl Default for CurlSession {
    fn default() -> Self {
        Self::new()
    }
}
