//! Glob pattern errors

use super::AutoRegError;

/// Creates an invalid pattern error
pub fn invalid(pattern: impl Into<String>) -> AutoRegError {
    AutoRegError::InvalidPattern {
        pattern: pattern.into(),
    }
}
