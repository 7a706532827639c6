//! Sharded map for accumulating values from many worker threads.
//!
//! The key space is split into a fixed number of shards (`key mod shards`),
//! each behind its own mutex. Writers touching different shards never wait on
//! each other.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Integer keys that can be assigned to a shard.
pub trait ShardKey: Copy + Ord {
    fn shard(self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(
            impl ShardKey for $t {
                #[inline]
                fn shard(self, shard_count: usize) -> usize {
                    (self as i128).rem_euclid(shard_count as i128) as usize
                }
            }
        )*
    };
}

impl_shard_key!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// Locked handle to a single entry. The shard stays locked while it lives.
pub type Access<'a, V> = MappedMutexGuard<'a, V>;

pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V: Default> ConcurrentMap<K, V> {
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        let shards = (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_for(&self, key: K) -> &Mutex<BTreeMap<K, V>> {
        &self.shards[key.shard(self.shards.len())]
    }

    /// Lock `key`'s shard and return its entry, inserting a default value if absent.
    pub fn access(&self, key: K) -> Access<'_, V> {
        MutexGuard::map(self.shard_for(key).lock(), |shard| shard.entry(key).or_default())
    }

    pub fn add_to(&self, key: K, delta: V)
    where
        V: AddAssign,
    {
        *self.access(key) += delta;
    }

    pub fn erase(&self, key: K) {
        self.shard_for(key).lock().remove(&key);
    }

    /// Merge every shard into one ordered map.
    ///
    /// Shards are locked one at a time in ascending index order. Call this once
    /// all writers have finished.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.lock();
            merged.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        merged
    }

    /// Like [`build_ordinary_map`](Self::build_ordinary_map) but moves the values out.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.extend(shard.into_inner());
        }
        merged
    }
}
