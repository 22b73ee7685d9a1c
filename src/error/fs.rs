//! File system errors

use super::AutoRegError;

/// Creates a source directory not found error
pub fn source_dir_not_found(path: impl Into<String>) -> AutoRegError {
    AutoRegError::SourceDirNotFound { path: path.into() }
}

/// Creates a source directory read error
pub fn source_dir_unreadable(path: impl Into<String>, reason: impl Into<String>) -> AutoRegError {
    AutoRegError::SourceDirUnreadable {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> AutoRegError {
    AutoRegError::IoError {
        message: message.into(),
    }
}
