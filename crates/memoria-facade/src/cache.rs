//! Short-TTL read cache over the full memory listing (§4.L), amortizing
//! repeated scans during bursty traffic. Invalidated on every write.

use std::sync::Arc;

use memoria_core::config::FacadeConfig;
use memoria_core::record::MemoryRecord;
use moka::sync::Cache;

const LISTING_KEY: &str = "all";

pub struct ListingCache {
    cache: Cache<&'static str, Arc<Vec<MemoryRecord>>>,
}

impl ListingCache {
    pub fn new(config: &FacadeConfig) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(config.cache_ttl()).build();
        Self { cache }
    }

    pub fn get_or_load(&self, load: impl FnOnce() -> memoria_store::StoreResult<Vec<MemoryRecord>>) -> memoria_store::StoreResult<Arc<Vec<MemoryRecord>>> {
        if let Some(cached) = self.cache.get(LISTING_KEY) {
            return Ok(cached);
        }
        let fresh = Arc::new(load()?);
        self.cache.insert(LISTING_KEY, fresh.clone());
        Ok(fresh)
    }

    pub fn invalidate(&self) {
        self.cache.invalidate(LISTING_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn repeated_loads_within_ttl_hit_the_cache() {
        let config = FacadeConfig::default();
        let cache = ListingCache::new(&config);
        let load_count = Cell::new(0);

        let load = || {
            load_count.set(load_count.get() + 1);
            Ok(vec![])
        };
        cache.get_or_load(load).unwrap();
        cache.get_or_load(load).unwrap();

        assert_eq!(load_count.get(), 1);
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let config = FacadeConfig::default();
        let cache = ListingCache::new(&config);
        let load_count = Cell::new(0);

        let load = || {
            load_count.set(load_count.get() + 1);
            Ok(vec![])
        };
        cache.get_or_load(load).unwrap();
        cache.invalidate();
        cache.get_or_load(load).unwrap();

        assert_eq!(load_count.get(), 2);
    }
}
