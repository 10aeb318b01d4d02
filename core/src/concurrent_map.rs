//! Fixed-shard map with one lock per shard, used to accumulate per-document
//! scores from many worker threads without a global lock.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

/// Integer keys that can pick a shard. Keys are expected to be non-negative.
pub trait ShardKey: Copy + Ord {
    fn shard_of(self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {$(
        impl ShardKey for $t {
            #[inline]
            fn shard_of(self, shard_count: usize) -> usize {
                (self as u64 % shard_count as u64) as usize
            }
        }
    )*};
}

impl_shard_key!(i32, i64, u32, u64, usize);

/// Scoped exclusive access to one entry. The shard stays locked until this is dropped.
pub type Access<'a, V> = MappedMutexGuard<'a, V>;

pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// A shard count of 0 is treated as 1.
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1)).map(|_| Mutex::new(BTreeMap::new())).collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize { self.shards.len() }

    fn shard(&self, key: K) -> &Mutex<BTreeMap<K, V>> {
        &self.shards[key.shard_of(self.shards.len())]
    }

    /// Lock the owning shard and return the entry for `key`, inserting a default value if absent.
    pub fn access(&self, key: K) -> Access<'_, V>
    where
        V: Default,
    {
        MutexGuard::map(self.shard(key).lock(), |map| map.entry(key).or_default())
    }

    /// Remove `key` if present.
    pub fn erase(&self, key: K) {
        self.shard(key).lock().remove(&key);
    }

    /// Merge every shard into one ordered map.
    ///
    /// All shard locks are taken in ascending shard order and held together
    /// while copying, so the result is a consistent cut of the whole map.
    pub fn snapshot(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let guards: Vec<_> = self.shards.iter().map(|shard| shard.lock()).collect();
        let mut out = BTreeMap::new();
        for guard in &guards {
            out.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn access_creates_default_entry() {
        let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(7);
        *map.access(3) += 1.5;
        *map.access(3) += 1.0;
        assert_eq!(map.snapshot().get(&3), Some(&2.5));
    }

    #[test]
    fn erase_is_noop_for_absent_key() {
        let map: ConcurrentMap<i32, u32> = ConcurrentMap::new(7);
        *map.access(1) = 4;
        map.erase(2);
        map.erase(1);
        assert!(map.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_ordered_across_shards() {
        let map: ConcurrentMap<u32, u32> = ConcurrentMap::new(3);
        for key in [9, 1, 7, 3, 0, 14] {
            *map.access(key) = key * 10;
        }
        let keys: Vec<u32> = map.snapshot().into_keys().collect();
        assert_eq!(keys, vec![0, 1, 3, 7, 9, 14]);
    }

    #[test]
    fn zero_shards_clamps_to_one() {
        let map: ConcurrentMap<usize, u8> = ConcurrentMap::new(0);
        assert_eq!(map.shard_count(), 1);
        *map.access(42) = 1;
        assert_eq!(map.snapshot().len(), 1);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let map: ConcurrentMap<i32, u64> = ConcurrentMap::new(7);
        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for i in 0..1000 {
                        *map.access(i % 50) += 1;
                    }
                });
            }
        });
        let snapshot = map.snapshot();
        assert_eq!(snapshot.len(), 50);
        assert!(snapshot.values().all(|&count| count == 8 * 20));
    }
}
