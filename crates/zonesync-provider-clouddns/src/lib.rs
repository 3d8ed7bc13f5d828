// # Cloud DNS managed-zone provider
//
// Provider plugin reconciling zonesync zones against a Google-Cloud-style
// managed zone service.
//
// - Reads remote state through a paginated, memoized cache (`cache`)
// - Translates records between the model and the remote rrdata strings
//   (`codec`)
// - Applies change lists as batched change sets with bounded completion
//   polling, creating the managed zone on first apply when needed
//
// The remote service is reached through the `transport::CloudDnsApi`
// trait; the concrete RPC client is injected by the surrounding adapter.
//
// ## Constraints
//
// - NO retry beyond the bounded status poll (retry policy is the
//   caller's responsibility)
// - NO rollback across batches: completed change sets stay applied when a
//   later batch fails
// - NO internal parallelism; a provider instance assumes single-threaded
//   access to its caches

pub mod cache;
pub mod codec;
pub mod config;
pub mod transport;

use std::sync::Arc;

use async_trait::async_trait;
use rand::RngExt;
use tracing::{debug, info};

use zonesync_core::{Change, Error, Record, RecordType, Result, Zone, ZoneProvider};

use crate::cache::ZoneCache;
use crate::config::{CloudDnsConfig, PollPolicy, VisibilityFilter};
use crate::transport::{ChangeSetHandle, ChangeStatus, CloudDnsApi, RemoteRecordSet, RemoteZone};

/// Managed-zone provider instance
///
/// Holds the zone and record-set caches for its own lifetime; create one
/// instance per reconciliation run if fresh remote state matters.
pub struct CloudDnsProvider {
    api: Arc<dyn CloudDnsApi>,
    batch_size: usize,
    visibility: VisibilityFilter,
    poll: PollPolicy,
    cache: ZoneCache,
}

impl CloudDnsProvider {
    /// Create a provider over an injected RPC client
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `config` fails validation.
    pub fn new(api: Arc<dyn CloudDnsApi>, config: CloudDnsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            api,
            batch_size: config.batch_size,
            visibility: config.visibility,
            poll: config.poll,
            cache: ZoneCache::new(),
        })
    }

    /// The remote zone for `dns_name`, created lazily on first use
    async fn resolve_zone(&self, dns_name: &str) -> Result<RemoteZone> {
        match self
            .cache
            .zone(self.api.as_ref(), self.visibility, dns_name)
            .await?
        {
            Some(zone) => Ok(zone),
            None => self.create_zone(dns_name).await,
        }
    }

    /// Create a managed zone serving `dns_name` and register it in the
    /// cache
    async fn create_zone(&self, dns_name: &str) -> Result<RemoteZone> {
        let name = derive_zone_name(dns_name);
        let zone = self.api.create_zone(&name, dns_name).await?;
        info!(zone = %zone.name, dns_name, "created managed zone");
        self.cache.insert_zone(zone.clone()).await;
        Ok(zone)
    }

    /// The record set to delete for `existing`
    ///
    /// Prefers the exact wire value the remote reported; falls back to
    /// re-deriving the encoding from the model record when the cache has
    /// no match, so drift between cache and remote cannot abort a delete.
    async fn rrset_for_delete(
        &self,
        zone: &RemoteZone,
        existing: &Record,
    ) -> Result<RemoteRecordSet> {
        let derived = codec::rrset_for(zone, existing);
        let cached = self
            .cache
            .find_record_set(self.api.as_ref(), zone, &derived.name, &derived.record_type)
            .await?;
        Ok(cached.unwrap_or(derived))
    }

    /// Poll a submitted change set until it leaves the pending state
    async fn wait_for_done(&self, change_set: &mut dyn ChangeSetHandle) -> Result<()> {
        let mut status = ChangeStatus::Pending;
        for _ in 0..self.poll.max_attempts {
            status = change_set.reload_status().await?;
            if status != ChangeStatus::Pending {
                break;
            }
            debug!("waiting for change set to complete");
            tokio::time::sleep(self.poll.interval()).await;
        }
        if status != ChangeStatus::Done {
            return Err(Error::ApplyTimeout {
                elapsed_secs: self.poll.timeout_secs(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ZoneProvider for CloudDnsProvider {
    async fn populate(&self, zone: &mut Zone, lenient: bool) -> Result<bool> {
        debug!(zone = zone.name(), lenient, "populate");

        let Some(remote) = self
            .cache
            .zone(self.api.as_ref(), self.visibility, zone.name())
            .await?
        else {
            info!(zone = zone.name(), "populate: no remote counterpart");
            return Ok(false);
        };

        let mut added = 0usize;
        for record_set in self.cache.record_sets(self.api.as_ref(), &remote).await? {
            let Ok(record_type) = record_set.record_type.parse::<RecordType>() else {
                // outside the supported-type allow-list
                continue;
            };
            let name = relative_name(&record_set.name, zone.name());
            let data = codec::decode(record_type, &record_set)?;
            zone.add_record(Record::new(name, record_set.ttl, data), lenient)?;
            added += 1;
        }

        info!(zone = zone.name(), records = added, "populate: done");
        Ok(true)
    }

    async fn apply(&self, zone_name: &str, changes: &[Change]) -> Result<()> {
        debug!(zone = zone_name, changes = changes.len(), "apply");

        let zone = self.resolve_zone(zone_name).await?;

        for batch in changes.chunks(self.batch_size) {
            let mut change_set = self.api.change_set(&zone);
            for change in batch {
                match change {
                    Change::Create { new } => {
                        change_set.add_record_set(codec::rrset_for(&zone, new));
                    }
                    Change::Delete { existing } => {
                        let record_set = self.rrset_for_delete(&zone, existing).await?;
                        change_set.delete_record_set(record_set);
                    }
                    Change::Update { existing, new } => {
                        // an update is delete-then-add within one change set
                        let record_set = self.rrset_for_delete(&zone, existing).await?;
                        change_set.delete_record_set(record_set);
                        change_set.add_record_set(codec::rrset_for(&zone, new));
                    }
                    other => {
                        return Err(Error::unsupported_change(format!("{other:?}")));
                    }
                }
            }
            change_set.submit().await?;
            self.wait_for_done(change_set.as_mut()).await?;
        }

        Ok(())
    }

    fn supports(&self, _record_type: RecordType) -> bool {
        // RecordType is exactly the set this provider can manage
        true
    }

    fn supports_root_ns(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &'static str {
        "clouddns"
    }
}

/// Derive a compliant internal name for a new managed zone
///
/// Remote zone names must begin with a letter, end with a letter or
/// digit, contain only lowercase letters, digits and dashes, and be at
/// most 63 characters long. The random suffix keeps names unique across
/// recreations of the same domain.
fn derive_zone_name(dns_name: &str) -> String {
    let label = dns_name.to_lowercase().replace('.', "-");
    let suffix = format!("{:032x}", rand::rng().random::<u128>());
    let mut name: String = format!("zone-{label}-{suffix}").chars().take(63).collect();
    // truncation can land on a dash; shed it so the name still ends with
    // a letter or digit
    while name.ends_with('-') {
        name.pop();
    }
    name
}

/// Make a fully-qualified record name zone-relative
///
/// The zone apex maps to the empty string. A name outside the zone keeps
/// its FQDN (minus the trailing dot), so out-of-zone glue records survive
/// population verbatim.
fn relative_name(fqdn: &str, zone_name: &str) -> String {
    if fqdn == zone_name {
        return String::new();
    }
    if let Some(prefix) = fqdn.strip_suffix(zone_name) {
        if let Some(relative) = prefix.strip_suffix('.') {
            return relative.to_string();
        }
    }
    fqdn.strip_suffix('.').unwrap_or(fqdn).to_string()
}
