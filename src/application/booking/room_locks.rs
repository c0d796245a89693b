//! Per-room lock registry
//!
//! Serializes orchestrated operations touching one room: the conflict
//! probe and the insert/update run under the same lock, so two writers
//! can never both pass the availability check before either commits.
//! Rooms are independent; operations on different rooms run in parallel.
//! Acquisition is bounded: a timed-out waiter aborts instead of queueing
//! forever.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{DomainError, DomainResult};

/// Default wait before an operation gives up on a contended room
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RoomLockRegistry {
    locks: DashMap<i32, Arc<Mutex<()>>>,
    timeout: Duration,
}

impl RoomLockRegistry {
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            timeout,
        }
    }

    /// Acquire the lock for `room_id`, waiting up to the configured
    /// timeout. The returned guard releases the lock on drop.
    pub async fn acquire(&self, room_id: i32) -> DomainResult<OwnedMutexGuard<()>> {
        let lock = self
            .locks
            .entry(room_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        tokio::time::timeout(self.timeout, lock.lock_owned())
            .await
            .map_err(|_| {
                DomainError::ConcurrentModification(format!(
                    "timed out waiting for room {} after {:?}",
                    room_id, self.timeout
                ))
            })
    }
}

impl Default for RoomLockRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_LOCK_TIMEOUT)
    }
}

// ── Tests ──────────────────────────────────────────────────────
