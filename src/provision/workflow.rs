// ABOUTME: The deployment lifecycle orchestrator.
// ABOUTME: Create container, submit, poll to terminal state, always tear down.

use tokio::sync::watch;

use super::error::ProvisionError;
use super::guard::{CleanupOutcome, with_cleanup};
use super::poll::poll_to_terminal;
use super::request::{DeployMode, DeploymentRequest, ProvisioningTarget};
use crate::config::PollConfig;
use crate::provider::{OperationState, ProviderClient};
use crate::report::ProgressSink;
use crate::types::{ContainerName, DeploymentName, Region, random_name};

/// Result of a completed provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    pub container: ContainerName,
    pub deployment: DeploymentName,
    /// Final observed operation state. With `wait` disabled this is the
    /// submission-time state and need not be terminal.
    pub state: OperationState,
    /// Error detail reported by the provider for a `Failed` operation.
    pub last_error: Option<String>,
    /// How the guaranteed container teardown ended.
    pub cleanup: CleanupOutcome,
}

/// Drives one provisioning workflow: create a disposable resource container,
/// submit a deployment against it, wait for the operation, and tear the
/// container down on every path.
pub struct Provisioner<'a> {
    target: ProvisioningTarget,
    mode: DeployMode,
    region: Region,
    container_prefix: String,
    deployment_prefix: String,
    poll: PollConfig,
    sink: &'a dyn ProgressSink,
}

impl<'a> Provisioner<'a> {
    pub fn new(target: ProvisioningTarget, region: Region, sink: &'a dyn ProgressSink) -> Self {
        Self {
            target,
            mode: DeployMode::default(),
            region,
            container_prefix: "nephosrg".to_string(),
            deployment_prefix: "nephosdeploy".to_string(),
            poll: PollConfig::default(),
            sink,
        }
    }

    pub fn mode(mut self, mode: DeployMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn container_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.container_prefix = prefix.into();
        self
    }

    pub fn deployment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.deployment_prefix = prefix.into();
        self
    }

    pub fn poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Run the workflow without external cancellation.
    pub async fn run<C: ProviderClient + ?Sized>(
        &self,
        client: &C,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        self.run_with_cancel(client, None).await
    }

    /// Run the workflow. A raised `cancel` signal observed while waiting on
    /// the operation aborts with `Canceled`, after the container teardown.
    ///
    /// Ordering is strict on every path: create, submit, zero or more state
    /// queries, delete. Creation failure aborts immediately with no cleanup,
    /// since nothing exists yet. Any failure after creation still runs the
    /// teardown before propagating.
    pub async fn run_with_cancel<C: ProviderClient + ?Sized>(
        &self,
        client: &C,
        cancel: Option<watch::Receiver<bool>>,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        let container = ContainerName::new(random_name(&self.container_prefix));
        let created = client
            .create_container(&container, &self.region)
            .await
            .map_err(ProvisionError::CreationFailed)?;
        self.sink.line(&format!(
            "Created resource container {} in {}",
            created.name, created.region
        ));

        let deployment = DeploymentName::new(random_name(&self.deployment_prefix));
        let request = DeploymentRequest::new(deployment.clone(), self.target.clone(), self.mode);
        self.sink.line(&format!(
            "Starting deployment {} from {}",
            deployment,
            self.target.template_source()
        ));

        let (result, cleanup) = with_cleanup(client, &container, self.sink, async {
            let operation = client
                .submit_deployment(&container, &request)
                .await
                .map_err(ProvisionError::SubmissionFailed)?;
            self.sink
                .line(&format!("Submitted deployment {deployment}"));

            let operation = if self.poll.wait && !operation.is_terminal() {
                poll_to_terminal(client, &container, &operation.operation_id, &self.poll, cancel)
                    .await?
            } else {
                operation
            };

            self.sink
                .line(&format!("Current deployment state: {}", operation.state));
            Ok(operation)
        })
        .await;

        let operation = result?;
        Ok(ProvisionOutcome {
            container,
            deployment,
            state: operation.state,
            last_error: operation.last_error,
            cleanup,
        })
    }
}
