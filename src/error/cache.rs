//! Cache errors

use super::AutoRegError;

/// Creates a cache unreadable error
pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> AutoRegError {
    AutoRegError::CacheUnreadable {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a cache write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> AutoRegError {
    AutoRegError::CacheWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
