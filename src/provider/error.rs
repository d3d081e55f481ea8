// ABOUTME: Error taxonomy for cloud provider operations.
// ABOUTME: Splits transient transport failures from authoritative provider answers.

use thiserror::Error;

/// Errors from provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("request rejected by provider: {0}")]
    Rejected(String),

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider error: {0}")]
    Provider(String),
}

impl ProviderError {
    /// Transient errors are worth retrying; everything else is an
    /// authoritative answer from the provider and must propagate.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Transport(_))
    }

    /// Whether this error means the resource was already gone. Benign when
    /// raised by deletion.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}
