// ABOUTME: Data types returned by the cloud provider seam.
// ABOUTME: Resource containers, deployment operations, and operation states.

use crate::types::{ContainerName, OperationId, Region};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, region-scoped grouping that owns every resource created inside
/// it. Created at workflow start, exclusively owned by one workflow, and
/// destroyed at workflow end regardless of outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceContainer {
    /// Unique within the subscription scope.
    pub name: ContainerName,
    pub region: Region,
    /// Provider-reported provisioning state at creation time.
    pub provisioning_state: String,
}

/// State of an asynchronous deployment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationState {
    Accepted,
    Running,
    Succeeded,
    Failed,
    Canceled,
}

impl OperationState {
    /// Terminal states end polling; no further transitions occur.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationState::Succeeded | OperationState::Failed | OperationState::Canceled
        )
    }

    /// Parse a provider-reported provisioning state string.
    ///
    /// Providers report a handful of in-flight states ("Accepted",
    /// "Creating", "Updating", ...) that all mean "not terminal yet"; those
    /// map to `Running` unless they are exactly "Accepted".
    pub fn parse(s: &str) -> Self {
        match s {
            "Accepted" => OperationState::Accepted,
            "Succeeded" => OperationState::Succeeded,
            "Failed" => OperationState::Failed,
            "Canceled" | "Cancelled" => OperationState::Canceled,
            _ => OperationState::Running,
        }
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationState::Accepted => "Accepted",
            OperationState::Running => "Running",
            OperationState::Succeeded => "Succeeded",
            OperationState::Failed => "Failed",
            OperationState::Canceled => "Canceled",
        };
        write!(f, "{s}")
    }
}

/// The asynchronous unit of work returned by the provider after submission.
///
/// Only re-polling the provider produces a new view of the operation; it is
/// never mutated locally.
#[derive(Debug, Clone)]
pub struct DeploymentOperation {
    pub operation_id: OperationId,
    pub state: OperationState,
    /// Present only when `state` is `Failed`.
    pub last_error: Option<String>,
    /// When this view of the operation was fetched from the provider.
    pub observed_at: DateTime<Utc>,
}

impl DeploymentOperation {
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}
