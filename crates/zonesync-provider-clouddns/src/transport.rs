//! Remote transport boundary
//!
//! The managed-zone service is reached through an opaque RPC client. This
//! module pins down exactly the surface the provider needs from it; the
//! concrete client (HTTP, gRPC, an SDK) lives outside this crate and test
//! suites substitute mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use zonesync_core::Result;

/// One remote managed zone
///
/// `name` is the service-internal zone identifier; `dns_name` is the
/// dot-terminated domain the zone serves. `dns_name` is unique among the
/// zones one provider instance manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteZone {
    pub name: String,
    pub dns_name: String,
    pub visibility: ZoneVisibility,
}

/// Visibility of a remote managed zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneVisibility {
    Public,
    Private,
}

/// One record set as observed on the remote service
///
/// `name` is always fully qualified and dot-terminated. Each entry of
/// `rrdatas` is one wire-format string encoding of one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecordSet {
    pub name: String,
    pub record_type: String,
    pub ttl: u32,
    pub rrdatas: Vec<String>,
}

/// One page of a paginated listing
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Continuation token; `None` means this was the last page
    pub next_page_token: Option<String>,
}

/// Lifecycle status of a submitted change set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Pending,
    Done,
}

/// The managed-zone RPC surface
#[async_trait]
pub trait CloudDnsApi: Send + Sync {
    /// List one page of managed zones
    async fn list_zones(&self, page_token: Option<&str>) -> Result<Page<RemoteZone>>;

    /// List one page of record sets in `zone`
    async fn list_record_sets(
        &self,
        zone: &RemoteZone,
        page_token: Option<&str>,
    ) -> Result<Page<RemoteRecordSet>>;

    /// Create a managed zone named `name` serving `dns_name`
    async fn create_zone(&self, name: &str, dns_name: &str) -> Result<RemoteZone>;

    /// Open a change set builder for `zone`
    ///
    /// Construction is client-side; nothing reaches the remote service
    /// until [`ChangeSetHandle::submit`] is called.
    fn change_set(&self, zone: &RemoteZone) -> Box<dyn ChangeSetHandle>;
}

/// A batch of record-set additions and deletions applied as one remote
/// transaction
#[async_trait]
pub trait ChangeSetHandle: Send {
    /// Queue a record set for addition
    fn add_record_set(&mut self, record_set: RemoteRecordSet);

    /// Queue a record set for deletion
    fn delete_record_set(&mut self, record_set: RemoteRecordSet);

    /// Submit the queued operations to the remote service
    async fn submit(&mut self) -> Result<()>;

    /// Re-read the change set's lifecycle status
    async fn reload_status(&mut self) -> Result<ChangeStatus>;
}
