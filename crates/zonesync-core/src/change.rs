//! Planned zone changes
//!
//! Changes are computed entirely by the external diff layer; providers
//! only consume them. The enum is non-exhaustive so provider crates keep a
//! wildcard arm and fail cleanly if a planner ever hands them a change
//! kind they do not understand.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// One planned mutation of a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
#[non_exhaustive]
pub enum Change {
    /// Create a record that does not exist remotely
    Create { new: Record },
    /// Replace an existing record in place
    Update { existing: Record, new: Record },
    /// Remove an existing record
    Delete { existing: Record },
}

impl Change {
    /// The record this change is keyed on (the desired one where there is
    /// a choice)
    pub fn record(&self) -> &Record {
        match self {
            Change::Create { new } => new,
            Change::Update { new, .. } => new,
            Change::Delete { existing } => existing,
        }
    }
}
