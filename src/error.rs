//! Crate error type
//!
//! The simulation itself never fails; only settings I/O and
//! platform/GPU setup do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Settings JSON could not be parsed
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file could not be read or written
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A setting is out of range
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    /// Host environment is missing something the game needs
    #[error("platform setup failed: {0}")]
    Platform(String),

    /// Surface, adapter or device setup failed
    #[error("GPU setup failed: {0}")]
    Gpu(String),
}
