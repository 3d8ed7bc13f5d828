//! Memoized remote state
//!
//! The provider fetches the remote zone list and per-zone record sets at
//! most once per instance. Both caches are explicit owned fields with a
//! single-owner contract: they are never evicted or refreshed, so callers
//! that mutate remote zones out-of-band will observe stale state. An empty
//! fetch result is cached like any other; that staleness trade-off is
//! deliberate.

use std::collections::HashMap;

use tokio::sync::Mutex;

use zonesync_core::Result;

use crate::config::VisibilityFilter;
use crate::transport::{CloudDnsApi, RemoteRecordSet, RemoteZone};

/// Zone list and record set cache for one provider instance
pub struct ZoneCache {
    /// Remote zones keyed by dns_name; `None` until first fetched.
    // The lock is held across the paginated fetch so the list is only
    // ever pulled once.
    zones: Mutex<Option<HashMap<String, RemoteZone>>>,
    /// Record sets keyed by the owning zone's dns_name
    record_sets: Mutex<HashMap<String, Vec<RemoteRecordSet>>>,
}

impl ZoneCache {
    pub fn new() -> Self {
        Self {
            zones: Mutex::new(None),
            record_sets: Mutex::new(HashMap::new()),
        }
    }

    /// Look up the remote zone serving `dns_name`, fetching the full zone
    /// list on first use
    ///
    /// The visibility filter is applied per page before caching, so
    /// filtered-out zones are invisible to every later lookup.
    pub async fn zone(
        &self,
        api: &dyn CloudDnsApi,
        visibility: VisibilityFilter,
        dns_name: &str,
    ) -> Result<Option<RemoteZone>> {
        let mut zones = self.zones.lock().await;
        if zones.is_none() {
            let mut map = HashMap::new();
            let mut page_token: Option<String> = None;
            loop {
                let page = api.list_zones(page_token.as_deref()).await?;
                for zone in page.items {
                    if visibility.matches(zone.visibility) {
                        map.insert(zone.dns_name.clone(), zone);
                    }
                }
                page_token = page.next_page_token;
                if page_token.is_none() {
                    break;
                }
            }
            *zones = Some(map);
        }
        Ok(zones.as_ref().and_then(|map| map.get(dns_name)).cloned())
    }

    /// Register a freshly created zone
    pub async fn insert_zone(&self, zone: RemoteZone) {
        let mut zones = self.zones.lock().await;
        zones
            .get_or_insert_with(HashMap::new)
            .insert(zone.dns_name.clone(), zone);
    }

    /// All record sets of `zone`, fetched page by page on first use
    pub async fn record_sets(
        &self,
        api: &dyn CloudDnsApi,
        zone: &RemoteZone,
    ) -> Result<Vec<RemoteRecordSet>> {
        let mut cache = self.record_sets.lock().await;
        if let Some(sets) = cache.get(&zone.dns_name) {
            return Ok(sets.clone());
        }

        let mut sets = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = api.list_record_sets(zone, page_token.as_deref()).await?;
            sets.extend(page.items);
            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }
        cache.insert(zone.dns_name.clone(), sets.clone());
        Ok(sets)
    }

    /// Find the remote record set matching an exact fully-qualified name
    /// and type
    ///
    /// A miss is not an error; callers fall back to re-deriving the wire
    /// encoding from the model record.
    pub async fn find_record_set(
        &self,
        api: &dyn CloudDnsApi,
        zone: &RemoteZone,
        fqdn: &str,
        record_type: &str,
    ) -> Result<Option<RemoteRecordSet>> {
        Ok(self
            .record_sets(api, zone)
            .await?
            .into_iter()
            .find(|rr| rr.name == fqdn && rr.record_type == record_type))
    }
}

impl Default for ZoneCache {
    fn default() -> Self {
        Self::new()
    }
}
