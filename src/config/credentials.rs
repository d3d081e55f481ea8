// ABOUTME: Service principal credentials loaded from the environment.
// ABOUTME: Absence of any variable is a startup-time fatal error.

use crate::error::{Error, Result};

pub const TENANT_ID_VAR: &str = "TENANT_ID";
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";
pub const SUBSCRIPTION_ID_VAR: &str = "SUBSCRIPTION_ID";

/// Identity used by the provider client. Validated for presence before any
/// workflow runs; a missing variable never becomes a workflow error.
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub subscription_id: String,
}

impl Credentials {
    /// Read all four variables, failing on the first missing or empty one.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            tenant_id: require(TENANT_ID_VAR)?,
            client_id: require(CLIENT_ID_VAR)?,
            client_secret: require(CLIENT_SECRET_VAR)?,
            subscription_id: require(SUBSCRIPTION_ID_VAR)?,
        })
    }
}

// Keep the secret out of debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("subscription_id", &self.subscription_id)
            .finish()
    }
}

fn require(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingEnvVar(name.to_string())),
    }
}
