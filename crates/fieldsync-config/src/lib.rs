//! # Fieldsync Config
//!
//! Layered settings for Fieldsync: TOML files, environment overlays and
//! `FIELDSYNC_` environment variables, validated on load.

mod loader;
mod settings;

pub use loader::*;
pub use settings::*;
