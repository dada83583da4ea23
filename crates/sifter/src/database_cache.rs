// Standard Library Imports
use std::{path::Path, sync::Arc};

// External Crate Imports
use fingerprint::{DatabaseLoader, MassWindow, TheoreticalDatabase};
use log::{debug, info};
use parking_lot::Mutex;

// Local Crate Imports
use crate::{CacheKey, CacheSlot, DatabaseCache, Result};

// Public API ==========================================================================================================

impl DatabaseCache {
    #[must_use]
    pub fn new(loader: DatabaseLoader) -> Self {
        Self {
            loader,
            state: Mutex::default(),
        }
    }

    /// Returns the database loaded from `path` and restricted to `window`, loading it if it isn't already cached.
    /// Concurrent callers asking for the same database wait for a single load, then share its result.
    ///
    /// Asking for a different folder than the last call evicts every database loaded from other folders
    pub fn get_or_load(
        &self,
        path: impl AsRef<Path>,
        window: MassWindow,
    ) -> Result<Arc<TheoreticalDatabase>> {
        let path = path.as_ref();
        let key = CacheKey {
            path: path.to_owned(),
            window,
        };
        let slot = self.slot(&key);

        if let Some(database) = slot.get() {
            debug!("reusing the cached database from {} within {window}", path.display());
            return Ok(Arc::clone(database));
        }

        // NOTE: The state lock isn't held here, so loads of other databases aren't held up by this one
        match slot.get_or_try_init(|| self.loader.load(path, window).map(Arc::new)) {
            Ok(database) => Ok(Arc::clone(database)),
            Err(error) => {
                self.discard_empty_slot(&key, &slot);
                Err(error.into())
            }
        }
    }

    /// Drops every cached database loaded from `path`, so the next request reloads it from disk
    pub fn invalidate(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.state.lock();
        state.slots.retain(|key, _| key.path != path);
        if state.path.as_deref() == Some(path) {
            state.path = None;
        }
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.slots.clear();
        state.path = None;
    }

    /// The number of databases currently loaded. Loads that are still in progress (or that failed) aren't counted
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .slots
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn loader(&self) -> &DatabaseLoader {
        &self.loader
    }
}

// Private Functions ===================================================================================================

impl DatabaseCache {
    fn slot(&self, key: &CacheKey) -> CacheSlot {
        let mut state = self.state.lock();
        if state.path.as_ref() != Some(&key.path) {
            if !state.slots.is_empty() {
                info!("evicting cached databases not loaded from {}", key.path.display());
            }
            state.slots.retain(|cached, _| cached.path == key.path);
            state.path = Some(key.path.clone());
        }

        Arc::clone(state.slots.entry(key.clone()).or_default())
    }

    fn discard_empty_slot(&self, key: &CacheKey, slot: &CacheSlot) {
        let mut state = self.state.lock();
        let is_empty_slot = state
            .slots
            .get(key)
            .is_some_and(|cached| Arc::ptr_eq(cached, slot) && cached.get().is_none());
        if is_empty_slot {
            state.slots.remove(key);
        }
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    const DATABASE: &str = "tests/data/database";
    const EMPTY_DATABASE: &str = "tests/data/empty_database";

    #[test]
    fn loads_are_reused() {
        let cache = DatabaseCache::default();
        assert!(cache.is_empty());

        let window = MassWindow::default();
        let first = cache.get_or_load(DATABASE, window).unwrap();
        let second = cache.get_or_load(DATABASE, window).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        // A different window is a different database
        let narrow = cache
            .get_or_load(DATABASE, MassWindow::new(1_000.0, 1_500.0).unwrap())
            .unwrap();
        assert!(!Arc::ptr_eq(&first, &narrow));
        assert_eq!(narrow.window(), MassWindow::new(1_000.0, 1_500.0).unwrap());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn concurrent_loads_are_shared() {
        let cache = DatabaseCache::default();
        let window = MassWindow::default();

        let databases: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.get_or_load(DATABASE, window).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(databases.iter().all(|db| Arc::ptr_eq(db, &databases[0])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let cache = DatabaseCache::default();
        let window = MassWindow::default();
        for _ in 0..3 {
            assert!(cache.get_or_load("tests/data/not_a_database", window).is_err());
        }
        assert!(cache.is_empty());
        assert!(cache.state.lock().slots.is_empty());
    }

    #[test]
    fn len_does_not_wait_for_loads() {
        let cache = DatabaseCache::default();
        let window = MassWindow::default();
        let key = CacheKey {
            path: DATABASE.into(),
            window,
        };

        let slot = cache.slot(&key);
        let database = slot.get_or_init(|| {
            // A load is in progress, but the cache can still be queried
            assert!(cache.is_empty());
            Arc::new(cache.loader().load(DATABASE, window).unwrap())
        });

        assert_eq!(cache.len(), 1);
        let cached = cache.get_or_load(DATABASE, window).unwrap();
        assert!(Arc::ptr_eq(database, &cached));
    }

    #[test]
    fn changing_folders_evicts() {
        let cache = DatabaseCache::default();
        let window = MassWindow::default();

        let first = cache.get_or_load(DATABASE, window).unwrap();
        cache.get_or_load(EMPTY_DATABASE, window).unwrap();
        assert_eq!(cache.len(), 1);

        let reloaded = cache.get_or_load(DATABASE, window).unwrap();
        assert!(!Arc::ptr_eq(&first, &reloaded));
        assert_eq!(first, reloaded);
    }

    #[test]
    fn invalidate_and_clear() {
        let cache = DatabaseCache::new(DatabaseLoader::new().with_species_suffix("_peptides"));
        let window = MassWindow::default();

        let first = cache.get_or_load(DATABASE, window).unwrap();
        cache.invalidate(EMPTY_DATABASE);
        assert_eq!(cache.len(), 1);

        cache.invalidate(DATABASE);
        assert!(cache.is_empty());
        let reloaded = cache.get_or_load(DATABASE, window).unwrap();
        assert!(!Arc::ptr_eq(&first, &reloaded));

        cache.clear();
        assert!(cache.is_empty());
    }
}
