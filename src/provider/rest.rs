// ABOUTME: HTTP implementation of the provider seam against an ARM-style REST API.
// ABOUTME: Client-credentials token acquisition with caching, JSON management calls.

use chrono::Utc;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::error::ProviderError;
use super::traits::ProviderClient;
use super::types::{DeploymentOperation, OperationState, ResourceContainer};
use crate::config::Credentials;
use crate::provision::{DeploymentRequest, ProvisioningTarget, TemplateSource};
use crate::types::{ContainerName, OperationId, Region};

const API_VERSION: &str = "2021-04-01";
const MANAGED_APP_API_VERSION: &str = "2021-07-01";

/// Renew the cached token this long before its reported expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(120);

/// Management-plane client speaking an ARM-style REST dialect.
///
/// Tokens come from the identity endpoint's client-credentials flow and are
/// cached until shortly before expiry. All other calls are plain JSON over
/// HTTPS against the management endpoint.
pub struct RestClient {
    http: reqwest::Client,
    credentials: Credentials,
    management_endpoint: String,
    identity_endpoint: String,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

impl RestClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_endpoints(
            credentials,
            "https://management.azure.com",
            "https://login.microsoftonline.com",
        )
    }

    /// Point the client at non-default endpoints, e.g. a sovereign cloud or
    /// a local stub in tests.
    pub fn with_endpoints(
        credentials: Credentials,
        management_endpoint: &str,
        identity_endpoint: &str,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            management_endpoint: management_endpoint.trim_end_matches('/').to_string(),
            identity_endpoint: identity_endpoint.trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        }
    }

    async fn bearer_token(&self) -> Result<String, ProviderError> {
        if let Some(cached) = self.token.lock().as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.value.clone());
            }
        }

        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.identity_endpoint, self.credentials.tenant_id
        );
        let scope = format!("{}/.default", self.management_endpoint);
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", scope.as_str()),
        ];

        let response = self
            .http
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthFailed(format!(
                "token request returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::AuthFailed(e.to_string()))?;

        let expires_at = Instant::now()
            + Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *self.token.lock() = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at,
        });
        Ok(token.access_token)
    }

    fn container_url(&self, name: &ContainerName) -> String {
        format!(
            "{}/subscriptions/{}/resourcegroups/{}?api-version={}",
            self.management_endpoint, self.credentials.subscription_id, name, API_VERSION
        )
    }

    fn deployment_path(&self, container: &ContainerName, request: &DeploymentRequest) -> String {
        match request.target() {
            ProvisioningTarget::Template(_) => format!(
                "/subscriptions/{}/resourcegroups/{}/providers/Microsoft.Resources/deployments/{}?api-version={}",
                self.credentials.subscription_id,
                container,
                request.name(),
                API_VERSION
            ),
            ProvisioningTarget::ManagedApplication { .. } => format!(
                "/subscriptions/{}/resourcegroups/{}/providers/Microsoft.Solutions/applications/{}?api-version={}",
                self.credentials.subscription_id,
                container,
                request.name(),
                MANAGED_APP_API_VERSION
            ),
        }
    }

    // Submission returns the resource's own path (with api-version) as the
    // operation id, so polling works the same for both target variants.
    fn operation_url(&self, operation_id: &OperationId) -> String {
        format!("{}{}", self.management_endpoint, operation_id)
    }

    fn deployment_body(request: &DeploymentRequest) -> Value {
        let template_fields = |source: &TemplateSource| match source {
            TemplateSource::Uri(uri) => json!({ "templateLink": { "uri": uri } }),
            TemplateSource::Inline(content) => json!({ "template": content }),
        };

        match request.target() {
            ProvisioningTarget::Template(source) => {
                let mut properties = template_fields(source);
                properties["mode"] = json!(request.mode().as_str());
                json!({ "properties": properties })
            }
            ProvisioningTarget::ManagedApplication { definition, kind } => {
                let mut properties = template_fields(definition);
                properties["mode"] = json!(request.mode().as_str());
                json!({ "kind": kind, "properties": properties })
            }
        }
    }

    async fn send_json(
        &self,
        builder: reqwest::RequestBuilder,
        subject: &str,
    ) -> Result<Value, ProviderError> {
        let token = self.bearer_token().await?;
        let response = builder
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            // DELETE answers have empty bodies.
            let text = response
                .text()
                .await
                .map_err(|e| ProviderError::Transport(e.to_string()))?;
            if text.is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|e| ProviderError::Provider(format!("malformed response body: {e}")));
        }

        let body = response.text().await.unwrap_or_default();
        let detail = format!("{subject}: {status}: {body}");
        Err(match status.as_u16() {
            401 | 403 => ProviderError::AuthFailed(detail),
            404 => ProviderError::NotFound(subject.to_string()),
            409 => ProviderError::AlreadyExists(subject.to_string()),
            429 => ProviderError::QuotaExceeded(detail),
            400 | 422 => ProviderError::Rejected(detail),
            s if s >= 500 => ProviderError::Transport(detail),
            _ => ProviderError::Provider(detail),
        })
    }
}

fn provisioning_state(body: &Value) -> OperationState {
    body.pointer("/properties/provisioningState")
        .and_then(Value::as_str)
        .map(OperationState::parse)
        .unwrap_or(OperationState::Accepted)
}

fn last_error(body: &Value) -> Option<String> {
    body.pointer("/properties/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl ProviderClient for RestClient {
    async fn create_container(
        &self,
        name: &ContainerName,
        region: &Region,
    ) -> Result<ResourceContainer, ProviderError> {
        let url = self.container_url(name);
        let body = json!({ "location": region.as_str() });
        let response = self
            .send_json(self.http.put(&url).json(&body), name.as_str())
            .await?;

        Ok(ResourceContainer {
            name: name.clone(),
            region: region.clone(),
            provisioning_state: response
                .pointer("/properties/provisioningState")
                .and_then(Value::as_str)
                .unwrap_or("Succeeded")
                .to_string(),
        })
    }

    async fn delete_container(&self, name: &ContainerName) -> Result<(), ProviderError> {
        let url = self.container_url(name);
        self.send_json(self.http.delete(&url), name.as_str())
            .await?;
        Ok(())
    }

    async fn submit_deployment(
        &self,
        container: &ContainerName,
        request: &DeploymentRequest,
    ) -> Result<DeploymentOperation, ProviderError> {
        let path = self.deployment_path(container, request);
        let url = format!("{}{}", self.management_endpoint, path);
        let body = Self::deployment_body(request);
        let response = self
            .send_json(self.http.put(&url).json(&body), request.name().as_str())
            .await?;

        Ok(DeploymentOperation {
            operation_id: OperationId::new(path),
            state: provisioning_state(&response),
            last_error: last_error(&response),
            observed_at: Utc::now(),
        })
    }

    async fn operation_state(
        &self,
        _container: &ContainerName,
        operation_id: &OperationId,
    ) -> Result<DeploymentOperation, ProviderError> {
        let url = self.operation_url(operation_id);
        let response = self
            .send_json(self.http.get(&url), operation_id.as_str())
            .await?;

        Ok(DeploymentOperation {
            operation_id: operation_id.clone(),
            state: provisioning_state(&response),
            last_error: last_error(&response),
            observed_at: Utc::now(),
        })
    }
}
