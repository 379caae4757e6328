//! Router configuration for AvoidKit.
//!
//! Settings are plain serde structs with per-field defaults, so a partial
//! TOML or JSON file only overrides what it names.

pub mod config;
pub mod error;

pub use config::{PenaltySettings, RouterSettings};
pub use error::{SettingsError, SettingsResult};
