// ABOUTME: Immutable description of what to provision.
// ABOUTME: Template deployments and managed-application installs share one request shape.

use crate::types::DeploymentName;
use serde_json::Value;
use std::fmt;

/// Where the infrastructure template comes from. Content is opaque to the
/// provisioner and never parsed locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A remote document fetched by the provider.
    Uri(String),
    /// Inline template content passed through verbatim.
    Inline(Value),
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Uri(uri) => write!(f, "{uri}"),
            TemplateSource::Inline(_) => write!(f, "<inline template>"),
        }
    }
}

/// How existing resources in the container are treated on deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeployMode {
    /// Leave resources not named by the template untouched.
    #[default]
    Incremental,
    /// Replace the container's contents with exactly what the template names.
    Complete,
}

impl DeployMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployMode::Incremental => "Incremental",
            DeployMode::Complete => "Complete",
        }
    }
}

/// What gets submitted against the container: a plain template deployment or
/// a managed-application install. One workflow handles both variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningTarget {
    /// Deploy a template directly.
    Template(TemplateSource),
    /// Install a managed application from a published definition.
    ManagedApplication {
        /// The application definition to instantiate.
        definition: TemplateSource,
        /// Plan/kind identifier understood by the provider.
        kind: String,
    },
}

impl ProvisioningTarget {
    pub fn template_source(&self) -> &TemplateSource {
        match self {
            ProvisioningTarget::Template(source) => source,
            ProvisioningTarget::ManagedApplication { definition, .. } => definition,
        }
    }
}

/// An immutable deployment request. Constructed once, never mutated.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    name: DeploymentName,
    target: ProvisioningTarget,
    mode: DeployMode,
}

impl DeploymentRequest {
    pub fn new(name: DeploymentName, target: ProvisioningTarget, mode: DeployMode) -> Self {
        Self { name, target, mode }
    }

    pub fn name(&self) -> &DeploymentName {
        &self.name
    }

    pub fn target(&self) -> &ProvisioningTarget {
        &self.target
    }

    pub fn mode(&self) -> DeployMode {
        self.mode
    }
}
