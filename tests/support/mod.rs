// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted fake provider and a capturing progress sink.

// Each test binary only uses part of this module, so allow dead_code.
#![allow(dead_code)]

use std::sync::Once;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use nephos::provider::{
    DeploymentOperation, OperationState, ProviderClient, ProviderError, ResourceContainer,
};
use nephos::provision::DeploymentRequest;
use nephos::report::ProgressSink;
use nephos::types::{ContainerName, OperationId, Region};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("nephos=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// One recorded provider call, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Submit(String),
    Poll,
    Delete(String),
}

/// What the fake should answer for a given call site.
pub enum Script {
    Ok,
    Fail(fn(String) -> ProviderError),
}

/// One scripted answer to an `operation_state` call.
#[derive(Clone, Copy)]
pub enum PollAnswer {
    State(OperationState),
    Error(fn() -> ProviderError),
}

/// Scripted in-memory provider. Records every call so tests can assert the
/// exact create -> submit -> poll* -> delete ordering, and answers polls from
/// a pre-programmed state sequence.
pub struct FakeProvider {
    pub calls: Mutex<Vec<Call>>,
    pub create: Script,
    pub submit: Script,
    pub delete: Script,
    /// Answers for successive `operation_state` calls. The last entry
    /// repeats once the script runs dry.
    pub poll_states: Mutex<Vec<PollAnswer>>,
    /// Detail string attached to a scripted `Failed` state.
    pub failure_detail: Option<String>,
}

impl FakeProvider {
    pub fn succeeding() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            create: Script::Ok,
            submit: Script::Ok,
            delete: Script::Ok,
            poll_states: Mutex::new(vec![PollAnswer::State(OperationState::Succeeded)]),
            failure_detail: None,
        }
    }

    pub fn create_fails(error: fn(String) -> ProviderError) -> Self {
        Self {
            create: Script::Fail(error),
            ..Self::succeeding()
        }
    }

    pub fn submit_fails(error: fn(String) -> ProviderError) -> Self {
        Self {
            submit: Script::Fail(error),
            ..Self::succeeding()
        }
    }

    pub fn delete_fails(error: fn(String) -> ProviderError) -> Self {
        Self {
            delete: Script::Fail(error),
            ..Self::succeeding()
        }
    }

    /// Program the answers for successive polls.
    pub fn with_poll_states(self, states: Vec<PollAnswer>) -> Self {
        assert!(!states.is_empty(), "poll script cannot be empty");
        *self.poll_states.lock() = states;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, matches: fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| matches(c)).count()
    }

    fn operation(&self, id: &OperationId, state: OperationState) -> DeploymentOperation {
        let last_error = (state == OperationState::Failed)
            .then(|| self.failure_detail.clone().unwrap_or_else(|| "provisioning failed".into()));
        DeploymentOperation {
            operation_id: id.clone(),
            state,
            last_error,
            observed_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ProviderClient for FakeProvider {
    async fn create_container(
        &self,
        name: &ContainerName,
        region: &Region,
    ) -> Result<ResourceContainer, ProviderError> {
        self.calls.lock().push(Call::Create(name.to_string()));
        match &self.create {
            Script::Ok => Ok(ResourceContainer {
                name: name.clone(),
                region: region.clone(),
                provisioning_state: "Succeeded".to_string(),
            }),
            Script::Fail(make) => Err(make(name.to_string())),
        }
    }

    async fn delete_container(&self, name: &ContainerName) -> Result<(), ProviderError> {
        self.calls.lock().push(Call::Delete(name.to_string()));
        match &self.delete {
            Script::Ok => Ok(()),
            Script::Fail(make) => Err(make(name.to_string())),
        }
    }

    async fn submit_deployment(
        &self,
        _container: &ContainerName,
        request: &DeploymentRequest,
    ) -> Result<DeploymentOperation, ProviderError> {
        self.calls
            .lock()
            .push(Call::Submit(request.name().to_string()));
        match &self.submit {
            Script::Ok => {
                let id = OperationId::new(request.name().as_str());
                Ok(self.operation(&id, OperationState::Accepted))
            }
            Script::Fail(make) => Err(make(request.name().to_string())),
        }
    }

    async fn operation_state(
        &self,
        _container: &ContainerName,
        operation_id: &OperationId,
    ) -> Result<DeploymentOperation, ProviderError> {
        self.calls.lock().push(Call::Poll);
        let next = {
            let mut states = self.poll_states.lock();
            if states.len() > 1 {
                states.remove(0)
            } else {
                // Repeat the final scripted answer.
                states[0]
            }
        };
        match next {
            PollAnswer::State(state) => Ok(self.operation(operation_id, state)),
            PollAnswer::Error(make) => Err(make()),
        }
    }
}

/// Sink that captures every progress line for assertion.
#[derive(Default)]
pub struct CaptureSink {
    lines: Mutex<Vec<String>>,
}

impl CaptureSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl ProgressSink for CaptureSink {
    fn line(&self, message: &str) {
        self.lines.lock().push(message.to_string());
    }
}
