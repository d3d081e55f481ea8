// ABOUTME: Polls a deployment operation to a terminal state.
// ABOUTME: Constant interval, explicit timeout, transient retry budget, cancellation.

use std::time::Instant;

use tokio::sync::watch;

use super::error::ProvisionError;
use crate::config::PollConfig;
use crate::provider::{DeploymentOperation, ProviderClient};
use crate::types::{ContainerName, OperationId};

/// Query the operation until it reaches `Succeeded`, `Failed`, or `Canceled`.
///
/// One state query is issued per iteration, separated by the configured
/// fixed interval. Transient transport errors are retried up to the
/// configured budget (reset on any successful query); authoritative provider
/// errors propagate immediately as `PollingFailed`. A raised cancellation
/// signal observed between queries aborts with `Canceled`.
///
/// # Errors
///
/// `PollingFailed`, `PollTimeout`, or `Canceled`.
pub async fn poll_to_terminal<C: ProviderClient + ?Sized>(
    client: &C,
    container: &ContainerName,
    operation_id: &OperationId,
    config: &PollConfig,
    mut cancel: Option<watch::Receiver<bool>>,
) -> Result<DeploymentOperation, ProvisionError> {
    let started = Instant::now();
    let mut transient_budget = config.max_transient_retries;

    loop {
        if cancel.as_ref().is_some_and(|c| *c.borrow()) {
            return Err(ProvisionError::Canceled);
        }

        match client.operation_state(container, operation_id).await {
            Ok(operation) => {
                if operation.is_terminal() {
                    return Ok(operation);
                }
                tracing::debug!(
                    operation = %operation_id,
                    state = %operation.state,
                    observed_at = %operation.observed_at,
                    "operation still in flight"
                );
                transient_budget = config.max_transient_retries;
            }
            Err(e) if e.is_transient() => {
                if transient_budget == 0 {
                    return Err(ProvisionError::PollingFailed(e));
                }
                transient_budget -= 1;
                tracing::debug!(
                    operation = %operation_id,
                    error = %e,
                    retries_left = transient_budget,
                    "transient error while polling"
                );
            }
            Err(e) => return Err(ProvisionError::PollingFailed(e)),
        }

        if let Some(timeout) = config.timeout {
            if started.elapsed() + config.interval > timeout {
                return Err(ProvisionError::PollTimeout(timeout.as_secs()));
            }
        }

        match cancel.as_mut() {
            Some(rx) => {
                tokio::select! {
                    _ = tokio::time::sleep(config.interval) => {}
                    changed = rx.changed() => {
                        // A closed sender means the caller is gone; treat it
                        // the same as an explicit cancel.
                        if changed.is_err() || *rx.borrow() {
                            return Err(ProvisionError::Canceled);
                        }
                    }
                }
            }
            None => tokio::time::sleep(config.interval).await,
        }
    }
}
