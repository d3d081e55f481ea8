// ABOUTME: Error types for the provisioning workflow.
// ABOUTME: Covers creation, submission, polling, timeout, and cancellation.

use crate::provider::ProviderError;
use thiserror::Error;

/// Errors surfaced by the provisioning workflow.
///
/// Cleanup failures are deliberately absent: they are logged and reported in
/// `ProvisionOutcome::cleanup` so they can never mask the body's result.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Resource container creation failed. Nothing exists; no cleanup runs.
    #[error("failed to create resource container: {0}")]
    CreationFailed(ProviderError),

    /// Deployment submission failed. The container exists and is cleaned up.
    #[error("failed to submit deployment: {0}")]
    SubmissionFailed(ProviderError),

    /// The provider gave an authoritative error while polling, or transient
    /// retries were exhausted.
    #[error("failed to poll deployment operation: {0}")]
    PollingFailed(ProviderError),

    /// The configured polling timeout elapsed before a terminal state.
    #[error("deployment operation still in flight after {0} seconds")]
    PollTimeout(u64),

    /// The workflow was canceled while waiting on the operation.
    #[error("provisioning canceled")]
    Canceled,
}
