// ABOUTME: Cloud provider client seam: trait, data types, errors, HTTP implementation.
// ABOUTME: The provisioner only ever talks to the ProviderClient trait.

mod error;
mod rest;
mod traits;
mod types;

pub use error::ProviderError;
pub use rest::RestClient;
pub use traits::ProviderClient;
pub use types::{DeploymentOperation, OperationState, ResourceContainer};
