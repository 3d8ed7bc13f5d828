//! Test doubles and fixtures for the provider contract tests
//!
//! `MockCloudDnsApi` serves a scripted set of zones and record sets
//! through the real pagination contract and records every change-set
//! operation in call order, so tests can assert on the exact sequence the
//! provider produced.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use zonesync_core::Result;
use zonesync_provider_clouddns::transport::{
    ChangeSetHandle, ChangeStatus, CloudDnsApi, Page, RemoteRecordSet, RemoteZone,
    ZoneVisibility,
};

/// One recorded change-set operation, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Add(RemoteRecordSet),
    Delete(RemoteRecordSet),
}

/// Everything one change set saw
#[derive(Debug, Clone, Default)]
pub struct ChangeSetLog {
    pub ops: Vec<Op>,
    pub submitted: bool,
    pub reloads: usize,
}

/// A scripted CloudDnsApi that tracks calls
pub struct MockCloudDnsApi {
    zones: Vec<RemoteZone>,
    record_sets: HashMap<String, Vec<RemoteRecordSet>>,
    page_size: usize,
    list_zones_calls: AtomicUsize,
    list_record_sets_calls: AtomicUsize,
    created_zones: Mutex<Vec<RemoteZone>>,
    change_sets: Arc<Mutex<Vec<ChangeSetLog>>>,
    statuses: Arc<Mutex<VecDeque<ChangeStatus>>>,
    default_status: ChangeStatus,
}

impl MockCloudDnsApi {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            record_sets: HashMap::new(),
            page_size: 1000,
            list_zones_calls: AtomicUsize::new(0),
            list_record_sets_calls: AtomicUsize::new(0),
            created_zones: Mutex::new(Vec::new()),
            change_sets: Arc::new(Mutex::new(Vec::new())),
            statuses: Arc::new(Mutex::new(VecDeque::new())),
            default_status: ChangeStatus::Done,
        }
    }

    /// Serve listings in pages of `page_size` items
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Add a public remote zone
    pub fn with_zone(self, dns_name: &str) -> Self {
        self.with_zone_visibility(dns_name, ZoneVisibility::Public)
    }

    /// Add a remote zone with explicit visibility
    pub fn with_zone_visibility(mut self, dns_name: &str, visibility: ZoneVisibility) -> Self {
        self.zones.push(RemoteZone {
            name: dns_name.trim_end_matches('.').replace('.', "-"),
            dns_name: dns_name.to_string(),
            visibility,
        });
        self
    }

    /// Script the record sets served for one zone
    pub fn with_record_sets(mut self, dns_name: &str, sets: Vec<RemoteRecordSet>) -> Self {
        self.record_sets.insert(dns_name.to_string(), sets);
        self
    }

    /// Script the statuses returned by `reload_status`, in order; once the
    /// script runs out the default status is returned forever
    pub fn with_statuses(self, statuses: &[ChangeStatus]) -> Self {
        self.statuses.lock().unwrap().extend(statuses.iter().copied());
        self
    }

    /// Status returned once the scripted statuses are exhausted
    pub fn with_default_status(mut self, status: ChangeStatus) -> Self {
        self.default_status = status;
        self
    }

    pub fn list_zones_calls(&self) -> usize {
        self.list_zones_calls.load(Ordering::SeqCst)
    }

    pub fn list_record_sets_calls(&self) -> usize {
        self.list_record_sets_calls.load(Ordering::SeqCst)
    }

    pub fn created_zones(&self) -> Vec<RemoteZone> {
        self.created_zones.lock().unwrap().clone()
    }

    /// Every change set opened so far, in order
    pub fn change_sets(&self) -> Vec<ChangeSetLog> {
        self.change_sets.lock().unwrap().clone()
    }

    fn page_of<T: Clone>(&self, items: &[T], page_token: Option<&str>) -> Page<T> {
        let start: usize = page_token.map(|t| t.parse().unwrap()).unwrap_or(0);
        let end = (start + self.page_size).min(items.len());
        Page {
            items: items[start..end].to_vec(),
            next_page_token: (end < items.len()).then(|| end.to_string()),
        }
    }
}

#[async_trait]
impl CloudDnsApi for MockCloudDnsApi {
    async fn list_zones(&self, page_token: Option<&str>) -> Result<Page<RemoteZone>> {
        self.list_zones_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.page_of(&self.zones, page_token))
    }

    async fn list_record_sets(
        &self,
        zone: &RemoteZone,
        page_token: Option<&str>,
    ) -> Result<Page<RemoteRecordSet>> {
        self.list_record_sets_calls.fetch_add(1, Ordering::SeqCst);
        let sets = self.record_sets.get(&zone.dns_name).cloned().unwrap_or_default();
        Ok(self.page_of(&sets, page_token))
    }

    async fn create_zone(&self, name: &str, dns_name: &str) -> Result<RemoteZone> {
        let zone = RemoteZone {
            name: name.to_string(),
            dns_name: dns_name.to_string(),
            visibility: ZoneVisibility::Public,
        };
        self.created_zones.lock().unwrap().push(zone.clone());
        Ok(zone)
    }

    fn change_set(&self, _zone: &RemoteZone) -> Box<dyn ChangeSetHandle> {
        let mut log = self.change_sets.lock().unwrap();
        log.push(ChangeSetLog::default());
        Box::new(MockChangeSet {
            index: log.len() - 1,
            log: Arc::clone(&self.change_sets),
            statuses: Arc::clone(&self.statuses),
            default_status: self.default_status,
        })
    }
}

struct MockChangeSet {
    index: usize,
    log: Arc<Mutex<Vec<ChangeSetLog>>>,
    statuses: Arc<Mutex<VecDeque<ChangeStatus>>>,
    default_status: ChangeStatus,
}

#[async_trait]
impl ChangeSetHandle for MockChangeSet {
    fn add_record_set(&mut self, record_set: RemoteRecordSet) {
        self.log.lock().unwrap()[self.index].ops.push(Op::Add(record_set));
    }

    fn delete_record_set(&mut self, record_set: RemoteRecordSet) {
        self.log.lock().unwrap()[self.index].ops.push(Op::Delete(record_set));
    }

    async fn submit(&mut self) -> Result<()> {
        self.log.lock().unwrap()[self.index].submitted = true;
        Ok(())
    }

    async fn reload_status(&mut self) -> Result<ChangeStatus> {
        self.log.lock().unwrap()[self.index].reloads += 1;
        let scripted = self.statuses.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or(self.default_status))
    }
}

/// Shorthand for building a remote record set fixture
pub fn rrset(name: &str, record_type: &str, ttl: u32, rrdatas: &[&str]) -> RemoteRecordSet {
    RemoteRecordSet {
        name: name.to_string(),
        record_type: record_type.to_string(),
        ttl,
        rrdatas: rrdatas.iter().map(|s| s.to_string()).collect(),
    }
}
