// # Zone Provider Trait
//
// Defines the interface every provider plugin implements.
//
// ## Implementations
//
// - Google-Cloud-style managed zones: `zonesync-provider-clouddns` crate
// - Future: Route53, Cloudflare, etc.
//
// A provider has exactly two jobs: observe remote state faithfully
// (`populate`) and apply a precomputed change list durably (`apply`).
// Computing *which* changes are needed is the planner's job, never the
// provider's.

use async_trait::async_trait;

use crate::change::Change;
use crate::error::Result;
use crate::record::RecordType;
use crate::zone::Zone;

/// Trait for provider plugin implementations
///
/// # Thread Safety
///
/// Implementations must be usable behind a shared reference across async
/// tasks, but a single provider instance assumes single-threaded access to
/// its internal caches: callers that apply to the same zone concurrently
/// must sequence those calls themselves.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// Hydrate `zone` with the records currently present on the remote
    /// service
    ///
    /// Records of unsupported types are skipped. With `lenient` set,
    /// records that fail model validation are kept instead of aborting.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: the zone exists remotely (even if it held no records)
    /// - `Ok(false)`: no remote counterpart; `zone` is left untouched
    async fn populate(&self, zone: &mut Zone, lenient: bool) -> Result<bool>;

    /// Apply an ordered change list to the named zone
    ///
    /// Creates the remote zone if it does not exist yet. Changes are
    /// applied in batches; batches already completed are not rolled back
    /// when a later one fails.
    ///
    /// # Parameters
    ///
    /// - `zone_name`: dot-terminated name of the zone to converge
    /// - `changes`: ordered Create/Update/Delete list from the planner
    async fn apply(&self, zone_name: &str, changes: &[Change]) -> Result<()>;

    /// Whether this provider can manage records of the given type
    fn supports(&self, record_type: RecordType) -> bool;

    /// Whether this provider supports geo-routed records
    fn supports_geo(&self) -> bool {
        false
    }

    /// Whether this provider supports dynamic/weighted records
    fn supports_dynamic(&self) -> bool {
        false
    }

    /// Whether this provider manages NS records at the zone apex
    fn supports_root_ns(&self) -> bool {
        false
    }

    /// Provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}
