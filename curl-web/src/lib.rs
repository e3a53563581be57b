//! Curl Web - bicep curl rep counter
//!
//! The page runs the pose estimator and hands keypoints to a `CurlSession`
//! once per frame. This crate only does the counting:
//! - `physics`: elbow angle and the per-arm hysteresis state machine
//! - `counter`: keypoint sets and the two-arm counter
//! - `feedback`: rep events and the non-blocking queue the speech loop drains
//! - `bridge`: wasm_bindgen session object
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! import init, { CurlSession, initLogging } from './curl_web.js';
//!
//! await init();
//! initLogging('info');
//! const session = new CurlSession();
//! speak(session.greeting);
//!
//! function onPose(keypoints /* Float32Array, 17 × [x, y, conf] */) {
//!     const result = session.processFrame(keypoints);
//!     drawOverlay(result);
//! }
//!
//! setInterval(() => {
//!     for (const line of session.drainFeedback()) speak(line.message, line.rate);
//! }, 100);
//! ```

pub mod bridge;
pub mod config;
pub mod counter;
pub mod error;
pub mod feedback;
pub mod physics;

use wasm_bindgen::prelude::*;

pub use bridge::CurlSession;
pub use config::CounterConfig;
pub use counter::{FrameResult, KeypointLayout, KeypointSet, Landmark, RepCounter, Side};
pub use error::{CurlError, CurlResult};
pub use feedback::{FeedbackEvent, FeedbackSink};
pub use physics::{calculate_joint_angle, ArmPhase, ArmRepState, Transition};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Initialize browser console logging
///
/// Level: "trace", "debug", "info", "warn", "error" (anything else: info)
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };

    wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("Curl counter logging at {}", log_level);
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
