// ABOUTME: Provisioning workflow: request types, cleanup guard, polling, orchestrator.
// ABOUTME: The one hard invariant is exactly-once container teardown on every path.

mod error;
mod guard;
mod poll;
mod request;
mod workflow;

pub use error::ProvisionError;
pub use guard::{CleanupOutcome, with_cleanup};
pub use poll::poll_to_terminal;
pub use request::{DeployMode, DeploymentRequest, ProvisioningTarget, TemplateSource};
pub use workflow::{ProvisionOutcome, Provisioner};
