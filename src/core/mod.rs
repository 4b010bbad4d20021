//! Core module - Process-level infrastructure
//!
//! Everything a session needs that is not game logic:
//!
//! - [`SessionSettings`] - Tunables loaded from `settings.json`
//! - [`settings_persistence`] - Locating, loading and saving that file
//! - [`logging`] - `tracing` subscriber setup for the binary
//! - [`CoreError`] - Errors from the above
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use memchess::core::{init_tracing, load_settings};
//!
//! init_tracing("info")?;
//! let settings = load_settings(None);
//! ```

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_persistence;

// Re-export commonly used items
pub use error::{CoreError, CoreResult};
pub use logging::init_tracing;
pub use settings::SessionSettings;
pub use settings_persistence::{load_settings, save_settings_to, settings_path};
