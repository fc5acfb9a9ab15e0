//! Configuration management module
//!
//! This module handles loading of the tool's own settings from defaults,
//! a TOML configuration file, and environment variables.

pub mod settings;

pub use settings::*;
