//! Response interpretation and reporting
//!
//! Only `200 OK` counts as success, plus `204 No Content` for delete which
//! means the installer image was already gone.

use serde_json::Value;
use std::io::Write;
use tracing::{debug, error};

use super::models::OperationKind;
use crate::error::{MarinerError, Result};

/// Outcome of a single installer request
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// Request succeeded; carries the parsed JSON body if there was one
    Success(Option<Value>),
    /// Delete of an installer image that no longer exists
    AlreadyDeleted,
    /// Any other status code, with the raw response body
    Failure { status: u16, body: String },
}

impl ResponseOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ResponseOutcome::Failure { .. })
    }

    /// Turn a failure outcome into an `ApiError`
    pub fn into_result(self) -> Result<ResponseOutcome> {
        match self {
            ResponseOutcome::Failure { status, body } => Err(MarinerError::api(status, body)),
            outcome => Ok(outcome),
        }
    }
}

/// Map an HTTP status and body to an outcome for the given operation
pub fn interpret(kind: OperationKind, status: u16, body: &str) -> Result<ResponseOutcome> {
    match (kind, status) {
        (OperationKind::Delete, 200) => Ok(ResponseOutcome::Success(None)),
        (OperationKind::Delete, 204) => Ok(ResponseOutcome::AlreadyDeleted),
        (_, 200) => {
            if body.trim().is_empty() {
                debug!("Empty response body for {} request", kind);
                return Ok(ResponseOutcome::Success(None));
            }
            let payload: Value = serde_json::from_str(body).map_err(|e| {
                MarinerError::serialization(format!("Failed to parse {} response: {}", kind, e))
            })?;
            Ok(ResponseOutcome::Success(Some(payload)))
        }
        _ => Ok(ResponseOutcome::Failure {
            status,
            body: body.to_string(),
        }),
    }
}

/// Message logged when a request fails
pub fn failure_message(kind: OperationKind, installer_name: Option<&str>, status: u16) -> String {
    match (kind, installer_name) {
        (OperationKind::List, _) | (_, None) => format!(
            "Failed to {} Mariner Baremetal installer image resources with status code {}",
            kind, status
        ),
        (_, Some(name)) => format!(
            "Failed to {} Mariner Baremetal installer image {} with status code {}",
            kind, name, status
        ),
    }
}

/// Write the user-facing result of `outcome` to `out`; failures go to the error log
pub fn report<W: Write>(
    out: &mut W,
    kind: OperationKind,
    installer_name: Option<&str>,
    outcome: &ResponseOutcome,
) -> Result<()> {
    let name = installer_name.unwrap_or_default();
    match outcome {
        ResponseOutcome::Success(_) if kind == OperationKind::Delete => {
            writeln!(out, "Successfully deleted Mariner Baremetal installer image {}", name)?;
        }
        ResponseOutcome::Success(Some(payload)) => {
            writeln!(out, "{}", serde_json::to_string_pretty(payload)?)?;
        }
        ResponseOutcome::Success(None) => {}
        ResponseOutcome::AlreadyDeleted => {
            writeln!(out, "Already deleted Mariner Baremetal installer image {}", name)?;
        }
        ResponseOutcome::Failure { status, body } => {
            error!(
                status = *status,
                body = %body,
                "{}",
                failure_message(kind, installer_name, *status)
            );
        }
    }
    Ok(())
}
