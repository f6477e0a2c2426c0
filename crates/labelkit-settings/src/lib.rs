//! LabelKit Settings Crate
//!
//! Handles application configuration: where template data lives and how
//! template files are written.

pub mod config;
pub mod error;

pub use config::{Config, DataSettings, XmlSettings};
pub use error::{SettingsError, SettingsResult};
pub use labelkit_core::units::Units;
