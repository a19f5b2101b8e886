//! Daily Calculation Service and Recalculation Orchestrator (spec §4.4,
//! §4.5), plus the keyed-lease primitive both use to serialize mutations
//! to the same `(employee, date)` / `(employee, year, month)` (spec §5).

pub mod daily;
pub mod recalc;

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// A lazily-populated table of per-key mutexes. `with_lock` hands out the
/// mutex for `key` (creating it on first use) and holds it for the
/// duration of `f`, serializing concurrent callers on the same key while
/// leaving distinct keys free to proceed in parallel (spec §5 "a
/// straightforward implementation takes a per-`(employee, date)` lease").
pub struct KeyedLocks<K> {
    table: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    pub fn new() -> Self {
        Self { table: Mutex::new(HashMap::new()) }
    }

    pub fn with_lock<R>(&self, key: K, f: impl FnOnce() -> R) -> R {
        let lease = {
            let mut table = self.table.lock();
            table.entry(key).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
        };
        let _guard = lease.lock();
        f()
    }
}

impl<K: Eq + Hash + Clone> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}
