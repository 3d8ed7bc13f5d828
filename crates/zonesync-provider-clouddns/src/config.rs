//! Provider configuration
//!
//! Project and credential fields are opaque to the provider core; the
//! adapter that constructs the real RPC client consumes them. The provider
//! itself uses `batch_size`, the zone `visibility` filter and the
//! change-set `poll` policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use zonesync_core::{Error, Result};

use crate::transport::ZoneVisibility;

/// Configuration for [`CloudDnsProvider`](crate::CloudDnsProvider)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudDnsConfig {
    /// Remote project identifier
    #[serde(default)]
    pub project: Option<String>,

    /// Path to a service-account credentials file
    #[serde(default)]
    pub credentials_file: Option<String>,

    /// Maximum number of changes submitted in one change set
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Which remote zones this provider instance sees
    #[serde(default)]
    pub visibility: VisibilityFilter,

    /// How completion of a submitted change set is awaited
    #[serde(default)]
    pub poll: PollPolicy,
}

impl CloudDnsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::config("batch_size must be greater than zero"));
        }
        if self.poll.max_attempts == 0 {
            return Err(Error::config("poll.max_attempts must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for CloudDnsConfig {
    fn default() -> Self {
        Self {
            project: None,
            credentials_file: None,
            batch_size: default_batch_size(),
            visibility: VisibilityFilter::default(),
            poll: PollPolicy::default(),
        }
    }
}

/// Zone visibility filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityFilter {
    /// No filtering
    #[default]
    Any,
    /// Only publicly resolvable zones
    Public,
    /// Only private zones
    Private,
}

impl VisibilityFilter {
    /// Whether a zone with the given visibility passes the filter
    pub fn matches(&self, visibility: ZoneVisibility) -> bool {
        match self {
            VisibilityFilter::Any => true,
            VisibilityFilter::Public => visibility == ZoneVisibility::Public,
            VisibilityFilter::Private => visibility == ZoneVisibility::Private,
        }
    }
}

/// Bounded fixed-interval polling, no backoff
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PollPolicy {
    /// Maximum number of status reloads before giving up
    #[serde(default = "default_poll_attempts")]
    pub max_attempts: u32,

    /// Seconds slept after each pending status
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,
}

impl PollPolicy {
    /// The sleep interval as a [`Duration`]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Total seconds a fully exhausted poll loop waits
    pub fn timeout_secs(&self) -> u64 {
        u64::from(self.max_attempts) * self.interval_secs
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_poll_attempts(),
            interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_batch_size() -> usize {
    1000
}

fn default_poll_attempts() -> u32 {
    120
}

fn default_poll_interval_secs() -> u64 {
    5
}
