// ABOUTME: The cloud provider client seam consumed by the provisioner.
// ABOUTME: Create/delete containers, submit deployments, query operations.

use async_trait::async_trait;

use super::error::ProviderError;
use super::types::{DeploymentOperation, ResourceContainer};
use crate::provision::DeploymentRequest;
use crate::types::{ContainerName, OperationId, Region};

/// Remote operations against a cloud provider's management plane.
///
/// The provisioner drives everything through this trait; the wire protocol,
/// authentication, and retry behavior below a single call are the
/// implementation's concern.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Create a resource container in the given region.
    async fn create_container(
        &self,
        name: &ContainerName,
        region: &Region,
    ) -> Result<ResourceContainer, ProviderError>;

    /// Delete a resource container and everything it owns.
    ///
    /// Returns `ProviderError::NotFound` when the container does not exist,
    /// which callers may treat as benign.
    async fn delete_container(&self, name: &ContainerName) -> Result<(), ProviderError>;

    /// Submit a deployment against a container. Returns the accepted
    /// operation handle, not the final result.
    async fn submit_deployment(
        &self,
        container: &ContainerName,
        request: &DeploymentRequest,
    ) -> Result<DeploymentOperation, ProviderError>;

    /// Fetch the current view of a previously submitted operation.
    async fn operation_state(
        &self,
        container: &ContainerName,
        operation_id: &OperationId,
    ) -> Result<DeploymentOperation, ProviderError>;
}
