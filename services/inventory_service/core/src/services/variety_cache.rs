use crate::repositories::Variety;

/// The lone piece of shared mutable state inside the process (§5, §9):
/// a concurrent map keyed by variety id, with value semantics — once a
/// variety is stored it is never mutated in place, only replaced or
/// removed wholesale by `clear`. Isolated behind this trait so tests can
/// inject a no-op cache and verify business logic does not depend on
/// stale contents (§9).
///
/// Every method is synchronous: lookups never suspend the calling task,
/// which is what makes this cache safe to hold across the suspension
/// points the rest of the engine hits on every database call (§5).
pub trait VarietyCache: Send + Sync {
    fn get(&self, variety_id: &str) -> Option<Variety>;
    fn put(&self, variety: Variety);
    /// The supplemented `ClearJenisCache` administrative operation
    /// (see SPEC_FULL supplemented feature 4).
    fn clear(&self);
}

/// A cache that never stores anything, so callers always hit the
/// repository. Used in tests that must prove correctness independent of
/// cache state (§9).
#[derive(Debug, Default)]
pub struct NoopVarietyCache;

impl VarietyCache for NoopVarietyCache {
    fn get(&self, _variety_id: &str) -> Option<Variety> {
        None
    }

    fn put(&self, _variety: Variety) {}

    fn clear(&self) {}
}
