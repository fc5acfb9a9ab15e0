//! Installer image management module
//!
//! Turns command parameters and a host configuration file into authenticated
//! requests against the Mariner provisioning API, and turns the responses
//! into console output or errors.

pub mod endpoint;
pub mod host_config;
pub mod location;
pub mod models;
pub mod operations;
pub mod request;
pub mod response;
pub mod transport;

pub use endpoint::*;
pub use host_config::*;
pub use models::*;
pub use operations::*;
pub use request::*;
pub use response::*;
pub use transport::*;
