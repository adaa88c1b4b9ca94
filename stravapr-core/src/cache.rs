//! Per-run entity caches.
//!
//! Each command builds an empty [`EntityCaches`], fills it as it resolves
//! activities and segments, and drops it when done. Entries are never evicted:
//! once an id is cached the fetch function is not called for it again.

use crate::domain::{Activity, ActivityId, Segment, SegmentId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Memoizes fetches by id for the lifetime of one command.
#[derive(Debug)]
pub struct EntityCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for EntityCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, V> EntityCache<K, V>
where
    K: Eq + Hash + Copy + std::fmt::Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `id`, calling `fetch` only on a miss.
    ///
    /// A failed fetch leaves the cache untouched, so a later call may try again.
    pub fn get_or_fetch<E, F>(&mut self, id: K, fetch: F) -> Result<&V, E>
    where
        F: FnOnce(K) -> Result<V, E>,
    {
        match self.entries.entry(id) {
            Entry::Occupied(entry) => {
                debug!(%id, "cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!(%id, "cache miss");
                let value = fetch(id)?;
                Ok(entry.insert(value))
            }
        }
    }

    /// Store `value` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: K, value: V) -> &V {
        match self.entries.entry(id) {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(value),
        }
    }

    pub fn get(&self, id: &K) -> Option<&V> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntityCache<ActivityId, Activity> {
    /// Return the activity with its segment efforts loaded.
    ///
    /// A cached summary (no efforts) does not count as a hit: the detailed
    /// version is fetched and replaces it.
    pub fn get_or_fetch_detailed<E, F>(
        &mut self,
        id: ActivityId,
        fetch_detailed: F,
    ) -> Result<&Activity, E>
    where
        F: FnOnce(ActivityId) -> Result<Activity, E>,
    {
        if self.get(&id).is_some_and(Activity::is_detailed) {
            debug!(%id, "detailed activity cache hit");
            return Ok(&self.entries[&id]);
        }
        debug!(%id, "fetching activity with all efforts");
        let activity = fetch_detailed(id)?;
        Ok(self.insert(id, activity))
    }
}

pub type ActivityCache = EntityCache<ActivityId, Activity>;
pub type SegmentCache = EntityCache<SegmentId, Segment>;

/// The two caches a command works with.
#[derive(Debug, Default)]
pub struct EntityCaches {
    pub activities: ActivityCache,
    pub segments: SegmentCache,
}

impl EntityCaches {
    pub fn new() -> Self {
        Self::default()
    }
}
