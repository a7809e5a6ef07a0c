//! The in-process variety cache (§4.3, §5, §9): the one piece of shared
//! mutable state in the whole engine, backed by `dashmap` the same way
//! the teacher reaches for a concurrent map wherever it needs one
//! without introducing a lock of its own.

use dashmap::DashMap;

use inventory_service_core::repositories::Variety;
use inventory_service_core::services::VarietyCache;

#[derive(Debug, Default)]
pub struct DashMapVarietyCache {
    entries: DashMap<String, Variety>,
}

impl DashMapVarietyCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl VarietyCache for DashMapVarietyCache {
    fn get(&self, variety_id: &str) -> Option<Variety> {
        self.entries.get(variety_id).map(|v| v.clone())
    }

    fn put(&self, variety: Variety) {
        self.entries.insert(variety.id.clone(), variety);
    }

    /// The supplemented `ClearJenisCache` administrative operation (see
    /// SPEC_FULL supplemented feature 4).
    fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variety(id: &str) -> Variety {
        Variety {
            id: id.to_string(),
            kode: "MNT".to_string(),
            name: "Montong".to_string(),
        }
    }

    #[test]
    fn put_then_get_round_trips() {
        let cache = DashMapVarietyCache::new();
        cache.put(variety("v1"));
        assert_eq!(cache.get("v1"), Some(variety("v1")));
    }

    #[test]
    fn miss_returns_none() {
        let cache = DashMapVarietyCache::new();
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn clear_drops_every_entry() {
        let cache = DashMapVarietyCache::new();
        cache.put(variety("v1"));
        cache.put(variety("v2"));
        cache.clear();
        assert_eq!(cache.get("v1"), None);
        assert_eq!(cache.get("v2"), None);
    }
}
