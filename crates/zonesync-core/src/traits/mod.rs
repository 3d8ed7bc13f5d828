//! Trait boundaries between the orchestration layer and provider plugins

mod zone_provider;

pub use zone_provider::ZoneProvider;
