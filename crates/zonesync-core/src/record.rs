//! Provider-neutral DNS record model
//!
//! A [`Record`] is a zone-relative name, a TTL and a [`RecordData`] payload.
//! `RecordData` is a tagged enum with one variant per supported record
//! type, so invalid field combinations are unrepresentable and the
//! supported type set is statically enumerable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Record types the zonesync model can express
///
/// This is the complete allow-list. Anything else observed on a remote
/// service is skipped during population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Alias,
    Caa,
    Cname,
    Ds,
    Mx,
    Naptr,
    Ns,
    Ptr,
    Spf,
    Srv,
    Txt,
}

impl RecordType {
    /// All supported record types, in presentation order
    pub const ALL: [RecordType; 13] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Alias,
        RecordType::Caa,
        RecordType::Cname,
        RecordType::Ds,
        RecordType::Mx,
        RecordType::Naptr,
        RecordType::Ns,
        RecordType::Ptr,
        RecordType::Spf,
        RecordType::Srv,
        RecordType::Txt,
    ];

    /// The presentation name of the type (e.g. "AAAA")
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Alias => "ALIAS",
            RecordType::Caa => "CAA",
            RecordType::Cname => "CNAME",
            RecordType::Ds => "DS",
            RecordType::Mx => "MX",
            RecordType::Naptr => "NAPTR",
            RecordType::Ns => "NS",
            RecordType::Ptr => "PTR",
            RecordType::Spf => "SPF",
            RecordType::Srv => "SRV",
            RecordType::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    /// Case-insensitive parse; unsupported names are errors
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_record(format!("unsupported record type: {s}")))
    }
}

/// One CAA value: `<flags> <tag> <value>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaaValue {
    pub flags: u8,
    pub tag: String,
    pub value: String,
}

/// One DS value: `<key_tag> <algorithm> <digest_type> <digest>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsValue {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,
    pub digest: String,
}

/// One MX value: `<preference> <exchange>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxValue {
    pub preference: u16,
    pub exchange: String,
}

/// One NAPTR value:
/// `<order> <preference> <flags> <service> <regexp> <replacement>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaptrValue {
    pub order: u16,
    pub preference: u16,
    pub flags: String,
    pub service: String,
    pub regexp: String,
    pub replacement: String,
}

/// One SRV value: `<priority> <weight> <port> <target>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrvValue {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// Type-specific record payload
///
/// Singleton types (CNAME, ALIAS, PTR) carry exactly one `value`; every
/// other type carries an ordered `values` list. Cardinality beyond that is
/// the planner's business, not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum RecordData {
    A { values: Vec<String> },
    Aaaa { values: Vec<String> },
    Alias { value: String },
    Caa { values: Vec<CaaValue> },
    Cname { value: String },
    Ds { values: Vec<DsValue> },
    Mx { values: Vec<MxValue> },
    Naptr { values: Vec<NaptrValue> },
    Ns { values: Vec<String> },
    Ptr { value: String },
    Spf { values: Vec<String> },
    Srv { values: Vec<SrvValue> },
    Txt { values: Vec<String> },
}

impl RecordData {
    /// The record type this payload belongs to
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A { .. } => RecordType::A,
            RecordData::Aaaa { .. } => RecordType::Aaaa,
            RecordData::Alias { .. } => RecordType::Alias,
            RecordData::Caa { .. } => RecordType::Caa,
            RecordData::Cname { .. } => RecordType::Cname,
            RecordData::Ds { .. } => RecordType::Ds,
            RecordData::Mx { .. } => RecordType::Mx,
            RecordData::Naptr { .. } => RecordType::Naptr,
            RecordData::Ns { .. } => RecordType::Ns,
            RecordData::Ptr { .. } => RecordType::Ptr,
            RecordData::Spf { .. } => RecordType::Spf,
            RecordData::Srv { .. } => RecordType::Srv,
            RecordData::Txt { .. } => RecordType::Txt,
        }
    }
}

/// One DNS record
///
/// `name` is zone-relative; the empty string denotes the zone apex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub ttl: u32,
    #[serde(flatten)]
    pub data: RecordData,
}

impl Record {
    /// Create a new record
    pub fn new(name: impl Into<String>, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            ttl,
            data,
        }
    }

    /// The record type of this record's payload
    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// The fully-qualified, dot-terminated name of this record within
    /// `zone_name` (itself dot-terminated)
    pub fn fqdn(&self, zone_name: &str) -> String {
        if self.name.is_empty() {
            zone_name.to_string()
        } else {
            format!("{}.{}", self.name, zone_name)
        }
    }
}

/// Maximum length of a single character-string within a TXT rdata
pub const TXT_SEGMENT_MAX: usize = 255;

/// Render one TXT/SPF value in its chunked wire representation
///
/// Double quotes are escaped, the value is split into segments of at most
/// [`TXT_SEGMENT_MAX`] characters and the segments are emitted as one
/// quoted, space-separated string. Remote services with per-string length
/// limits accept this form for values of any length.
pub fn chunked_value(value: &str) -> String {
    let escaped = value.replace('"', "\\\"");
    let chars: Vec<char> = escaped.chars().collect();
    let segments: Vec<String> = chars
        .chunks(TXT_SEGMENT_MAX)
        .map(|segment| segment.iter().collect())
        .collect();
    format!("\"{}\"", segments.join("\" \""))
}
