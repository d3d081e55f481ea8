// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent name confusion at compile time.

mod id;
mod name_gen;
mod region;

pub use id::{ContainerName, DeploymentName, OperationId};
pub use name_gen::random_name;
pub use region::{Region, RegionError};
