//! Per-character locks for read-modify-write sequences.

use std::sync::Arc;

use charsheet_domain::name_key;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per case-folded character name.
///
/// Held across load, mutate and save so two callers in this process never
/// interleave changes to the same character. Entries nobody holds or waits on
/// are pruned on the next `lock` call.
#[derive(Default)]
pub struct CharacterLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl CharacterLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, name: &str) -> OwnedMutexGuard<()> {
        let key = name_key(name);
        // A held guard or a waiter keeps its own clone of the Arc.
        self.locks.retain(|held, mutex| *held == key || Arc::strong_count(mutex) > 1);

        let mutex = self
            .locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        mutex.lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
