// ABOUTME: Cleanup scope guaranteeing container deletion on every exit path.
// ABOUTME: Result-returning replacement for a try/finally block.

use std::future::Future;

use super::error::ProvisionError;
use crate::provider::ProviderClient;
use crate::report::ProgressSink;
use crate::types::ContainerName;

/// How the guaranteed cleanup of a resource container ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The container was deleted.
    Deleted,
    /// The provider reported the container absent; nothing was ever created
    /// under it, so there was nothing to clean up.
    AlreadyAbsent,
    /// Deletion failed. Logged, never allowed to mask the body's result.
    Failed(String),
}

/// Run `body` and then delete `container`, exactly once, on every exit path.
///
/// The deletion attempt and its outcome are reported through `sink`. A
/// `NotFound` answer from the provider is benign and suppressed to an
/// informational line. The body's result always wins: a cleanup failure is
/// reported in the returned `CleanupOutcome`, not grafted onto the error.
pub async fn with_cleanup<C, F, T>(
    client: &C,
    container: &ContainerName,
    sink: &dyn ProgressSink,
    body: F,
) -> (Result<T, ProvisionError>, CleanupOutcome)
where
    C: ProviderClient + ?Sized,
    F: Future<Output = Result<T, ProvisionError>>,
{
    let result = body.await;

    sink.line(&format!("Deleting resource container: {container}"));
    let cleanup = match client.delete_container(container).await {
        Ok(()) => {
            sink.line(&format!("Deleted resource container: {container}"));
            CleanupOutcome::Deleted
        }
        Err(e) if e.is_not_found() => {
            sink.line("Nothing was created under the container; no cleanup necessary");
            CleanupOutcome::AlreadyAbsent
        }
        Err(e) => {
            tracing::warn!(container = %container, error = %e, "container cleanup failed");
            sink.line(&format!("Failed to delete resource container: {e}"));
            CleanupOutcome::Failed(e.to_string())
        }
    };

    (result, cleanup)
}
