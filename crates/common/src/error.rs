//! Error types shared across GazeShift crates.

use std::path::PathBuf;

/// Top-level error type for GazeShift operations.
#[derive(Debug, thiserror::Error)]
pub enum GazeShiftError {
    /// The pose/velocity device could not be opened or queried.
    ///
    /// Recoverable: discovery is retried every tick.
    #[error("Device error: {message}")]
    Device { message: String },

    /// A tick was submitted with a non-positive frame delta.
    ///
    /// Fatal precondition violation: a broken frame clock would otherwise
    /// produce infinite or NaN acceleration estimates.
    #[error("Invalid frame timing: frame delta was {frame_dt} s")]
    InvalidFrameTiming { frame_dt: f32 },

    #[error("Tracking error: {message}")]
    Tracking { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GazeShiftError.
pub type GazeShiftResult<T> = Result<T, GazeShiftError>;

impl GazeShiftError {
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device {
            message: msg.into(),
        }
    }

    pub fn tracking(msg: impl Into<String>) -> Self {
        Self::Tracking {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the pipeline may keep ticking after this error.
    ///
    /// Device errors are transient (the headset is re-discovered every
    /// tick); frame-timing violations are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Device { .. } | Self::Tracking { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_errors_are_recoverable() {
        assert!(GazeShiftError::device("headset not found").is_recoverable());
        assert!(!GazeShiftError::InvalidFrameTiming { frame_dt: 0.0 }.is_recoverable());
    }
}
