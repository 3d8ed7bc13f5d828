// # zonesync-core
//
// Provider-neutral model for the zonesync DNS-as-code system.
//
// ## Architecture Overview
//
// This library defines the types shared between the planning/orchestration
// layer and the provider plugins:
//
// - **Record model**: typed record data for every supported record type
// - **Zone**: a mutable container of records, identified by a
//   dot-terminated domain name
// - **Change**: one planned Create/Update/Delete, produced by the external
//   diff layer and consumed by providers
// - **ZoneProvider**: the trait every provider plugin implements
//
// ## Design Principles
//
// 1. **Separation of Concerns**: the model knows nothing about any remote
//    service; providers translate it to their own wire formats
// 2. **Statically enumerable types**: the supported record types are a
//    closed enum, not a runtime lookup
// 3. **Plugin-Based**: providers live in their own crates and depend only
//    on this one

pub mod change;
pub mod error;
pub mod record;
pub mod traits;
pub mod zone;

// Re-export core types for convenience
pub use change::Change;
pub use error::{Error, Result};
pub use record::{
    CaaValue, DsValue, MxValue, NaptrValue, Record, RecordData, RecordType, SrvValue,
};
pub use traits::ZoneProvider;
pub use zone::Zone;
