// ABOUTME: Polling policy configuration for long-running operations.
// ABOUTME: Constant interval, explicit timeout, bounded transient retries.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Fixed delay between state queries. No exponential backoff.
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,

    /// Overall deadline for reaching a terminal state. `None` polls forever.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,

    /// How many consecutive transient transport errors to tolerate before
    /// giving up. Authoritative provider errors propagate immediately.
    #[serde(default = "default_max_transient_retries")]
    pub max_transient_retries: u32,

    /// When false, report the submission-time state once and skip the loop.
    #[serde(default = "default_wait")]
    pub wait: bool,
}

fn default_interval() -> Duration {
    Duration::from_secs(10)
}

fn default_max_transient_retries() -> u32 {
    3
}

fn default_wait() -> bool {
    true
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            timeout: None,
            max_transient_retries: default_max_transient_retries(),
            wait: default_wait(),
        }
    }
}
