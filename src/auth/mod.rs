//! Authentication module for Azure services
//!
//! Supplies bearer tokens for Azure Resource Manager, either from
//! `DefaultAzureCredential` or from a token handed in by the caller.

pub mod provider;

pub use provider::*;
