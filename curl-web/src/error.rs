//! Error types for the fallible edges of the crate
//!
//! The per-frame path never returns errors: missing landmarks and degenerate
//! geometry degrade to "no update" for the affected arm. Errors only come
//! from configuration and from malformed estimator input at the bridge.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// A specialized `Result` type for curl-web operations.
pub type CurlResult<T> = Result<T, CurlError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CurlError {
    /// Flat keypoint array length is a multiple of neither 2 nor 3
    #[error("Invalid keypoint data: {len} values is not a whole number of (x, y) or (x, y, confidence) keypoints")]
    InvalidKeypointData {
        /// Number of values received
        len: usize,
    },

    /// Layout name not recognised
    #[error("Unknown keypoint layout: '{0}' (expected 'coco17' or 'mediapipe33')")]
    UnknownLayout(String),

    /// Configuration value out of range
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the invalid value
        message: String,
    },

    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CurlError> for JsValue {
    fn from(err: CurlError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
