//! Utility functions module
//!
//! Helpers shared by the installer pipeline: HTTP client construction,
//! network error classification, Azure CLI detection and small parsers.

pub mod azure_detect;
pub mod helpers;
pub mod network;

pub use helpers::*;
pub use network::*;
