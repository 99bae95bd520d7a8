//! Error types for the Horizon3D view core
//!
//! The camera itself never fails: frustum refresh is a silent skip.
//! Errors only come from validating configuration and variant parameters.

use std::fmt;

/// Result type for Horizon3D operations
pub type Horizon3dResult<T> = Result<T, Horizon3dError>;

/// Horizon3D errors
#[derive(Debug, Clone, PartialEq)]
pub enum Horizon3dError {
    /// Rendering configuration rejected by `RenderingConfig::validate()`
    InvalidConfig(String),

    /// Invalid camera parameter (aspect ratio, clipping planes, ...)
    InvalidParameter(String),
}

impl fmt::Display for Horizon3dError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Horizon3dError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Horizon3dError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for Horizon3dError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
