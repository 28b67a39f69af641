//! Configuration and error types for winnowing fingerprints.
//!
//! The configuration surface is intentionally tiny: the fingerprint is a pure
//! function of `(text, k, w)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shingle width and winnowing window for the fingerprinting pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnowConfig {
    /// Number of characters per shingle (k-grams over the dense text).
    ///
    /// Larger values make matches more specific; smaller values catch shorter
    /// shared passages but produce more incidental overlap.
    pub k: usize,
    /// Window size for winnowing.
    ///
    /// Every run of `w` consecutive shingles contributes at least one
    /// fingerprint, so any shared substring of `k + w - 1` characters is
    /// guaranteed to be detected.
    pub w: usize,
}

impl WinnowConfig {
    /// Create a new configuration with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shingle width (k).
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the winnowing window size (w).
    pub fn with_w(mut self, w: usize) -> Self {
        self.w = w;
        self
    }

    /// Build a configuration from signed parameters as they arrive from a
    /// wire format, rejecting anything below 1.
    pub fn from_signed(k: i64, w: i64) -> Result<Self, PerceptualError> {
        let k = positive("k", k)?;
        let w = positive("window_size", w)?;
        Ok(Self { k, w })
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.k < 1 {
            return Err(PerceptualError::InvalidParameter {
                param: "k",
                value: 0,
            });
        }
        if self.w < 1 {
            return Err(PerceptualError::InvalidParameter {
                param: "window_size",
                value: 0,
            });
        }
        Ok(())
    }
}

impl Default for WinnowConfig {
    fn default() -> Self {
        Self { k: 5, w: 4 }
    }
}

fn positive(param: &'static str, value: i64) -> Result<usize, PerceptualError> {
    if value < 1 {
        return Err(PerceptualError::InvalidParameter { param, value });
    }
    usize::try_from(value).map_err(|_| PerceptualError::InvalidParameter { param, value })
}

/// Errors returned by the fingerprinting pipeline.
///
/// Short or empty text is never an error; it yields an empty fingerprint set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PerceptualError {
    #[error("invalid parameter: {param} must be >= 1 (got {value})")]
    InvalidParameter { param: &'static str, value: i64 },

    #[error("invalid hash encoding: {0}")]
    InvalidHash(String),
}
