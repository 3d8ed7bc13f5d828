//! Zone model
//!
//! A [`Zone`] is the mutable container the orchestration layer hands to a
//! provider's `populate`, and the reference point for record fqdns. Zone
//! names are always dot-terminated.

use tracing::warn;

use crate::error::{Error, Result};
use crate::record::{Record, RecordType};

/// A DNS zone: a dot-terminated domain name and its records
#[derive(Debug, Clone)]
pub struct Zone {
    name: String,
    records: Vec<Record>,
}

impl Zone {
    /// Create an empty zone
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZone`] if `name` is not dot-terminated.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !name.ends_with('.') {
            return Err(Error::invalid_zone(format!(
                "zone name must end with a dot: {name}"
            )));
        }
        Ok(Self {
            name,
            records: Vec::new(),
        })
    }

    /// The dot-terminated zone name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The records added so far, in insertion order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Find a record by relative name and type
    pub fn find(&self, name: &str, record_type: RecordType) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.name == name && r.record_type() == record_type)
    }

    /// Add a record to the zone
    ///
    /// Validation rejects dot-terminated (non-relative) names and
    /// duplicate name+type pairs. With `lenient` set, validation failures
    /// are logged and the record is added anyway.
    pub fn add_record(&mut self, record: Record, lenient: bool) -> Result<()> {
        if let Err(err) = self.validate(&record) {
            if !lenient {
                return Err(err);
            }
            warn!(zone = %self.name, record = %record.name, "lenient add: {err}");
        }
        self.records.push(record);
        Ok(())
    }

    fn validate(&self, record: &Record) -> Result<()> {
        if record.name.ends_with('.') {
            return Err(Error::invalid_record(format!(
                "record name must be zone-relative: {}",
                record.name
            )));
        }
        if self.find(&record.name, record.record_type()).is_some() {
            return Err(Error::duplicate_record(format!(
                "{} {} already exists in {}",
                record.record_type(),
                if record.name.is_empty() { "@" } else { &record.name },
                self.name
            )));
        }
        Ok(())
    }
}
