//! Error types for core module
//!
//! Settings persistence and process setup errors. Game rule errors live in
//! [`crate::game::error`], link errors in [`crate::networking`].

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// A loaded setting is out of range
    #[error("Invalid setting {field}: {message}")]
    InvalidSetting { field: &'static str, message: String },

    /// Tracing subscriber could not be installed
    #[error("Logging setup failed: {message}")]
    Logging { message: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
