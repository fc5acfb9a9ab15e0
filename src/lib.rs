//! mariner-baremetal - Mariner Baremetal Installer Image Tool
//!
//! A CLI for managing Mariner baremetal installer image resources through
//! the Azure provisioning API: request construction from a host
//! configuration file, authentication, and response reporting.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod utils;

// Re-export commonly used types
pub use error::{MarinerError, Result};
