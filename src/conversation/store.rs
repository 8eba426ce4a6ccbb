//! Bounded in-memory conversation store
//!
//! Maps a sender address to its conversation state. Memory is bounded two
//! ways: at most `capacity` senders are tracked (least recently used is
//! evicted first) and a sender idle for longer than `idle_ttl` starts over.
//!
//! Each sender's state sits behind its own async mutex, so one turn is a
//! single read-modify-write even while the engine awaits the model. The
//! index itself is behind a synchronous mutex that is never held across an
//! await.
//!
//! An entry whose cell is still referenced outside the index (a turn holds
//! or awaits its lock) is never dropped, so the store may run over capacity
//! until those turns finish.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tokio::time::Instant;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(n) => n,
    None => unreachable!(),
};
const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Retention policy for the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub capacity: NonZeroUsize,
    pub idle_ttl: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            idle_ttl: DEFAULT_IDLE_TTL,
        }
    }
}

struct Entry<S> {
    state: Arc<AsyncMutex<S>>,
    last_seen: Instant,
}

impl<S> Entry<S> {
    /// A turn holds or waits for this cell
    fn in_use(&self) -> bool {
        Arc::strong_count(&self.state) > 1
    }
}

/// Exclusive access to one sender's state for the duration of a turn
pub type SenderGuard<S> = OwnedMutexGuard<S>;

pub struct ConversationStore<S> {
    entries: Mutex<LruCache<String, Entry<S>>>,
    config: StoreConfig,
}

impl<S: Default + Clone + Send + 'static> ConversationStore<S> {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            entries: Mutex::new(LruCache::unbounded()),
            config,
        }
    }

    /// Lock a sender's state, creating a fresh one for unknown or expired
    /// senders. Other senders are not blocked while the guard is held.
    pub async fn lock(&self, sender: &str) -> SenderGuard<S> {
        self.cell(sender).lock_owned().await
    }

    /// Current state of a sender (fresh state if unknown)
    #[allow(dead_code)] // Turns go through lock(); used for inspection
    pub async fn get(&self, sender: &str) -> S {
        self.lock(sender).await.clone()
    }

    /// Replace a sender's state
    #[allow(dead_code)] // Turns go through lock()
    pub async fn set(&self, sender: &str, state: S) {
        *self.lock(sender).await = state;
    }

    /// Number of tracked senders, expired ones included until purged
    pub fn len(&self) -> usize {
        self.index().len()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn index(&self) -> std::sync::MutexGuard<'_, LruCache<String, Entry<S>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get-or-create the per-sender cell, refreshing its recency
    fn cell(&self, sender: &str) -> Arc<AsyncMutex<S>> {
        let now = Instant::now();
        let mut entries = self.index();

        self.purge_expired(&mut entries, now);

        let state = match entries.get_mut(sender) {
            Some(entry) => {
                entry.last_seen = now;
                Arc::clone(&entry.state)
            }
            None => {
                let state = Arc::new(AsyncMutex::new(S::default()));
                let entry = Entry {
                    state: Arc::clone(&state),
                    last_seen: now,
                };
                entries.put(sender.to_string(), entry);
                state
            }
        };

        // `state` is held here, so the caller's own entry counts as in use
        self.enforce_capacity(&mut entries);
        state
    }

    /// Drop idle entries past the TTL. Recency order matches `last_seen`
    /// order, so the walk stops at the first entry still inside the TTL.
    fn purge_expired(&self, entries: &mut LruCache<String, Entry<S>>, now: Instant) {
        let ttl = self.config.idle_ttl;
        let expired: Vec<String> = entries
            .iter()
            .rev()
            .take_while(|(_, entry)| now.duration_since(entry.last_seen) > ttl)
            .filter(|(_, entry)| !entry.in_use())
            .map(|(sender, _)| sender.clone())
            .collect();

        for sender in expired {
            entries.pop(&sender);
            tracing::debug!(sender = %sender, "Conversation expired");
        }
    }

    /// Evict least recently used idle entries until back within capacity
    fn enforce_capacity(&self, entries: &mut LruCache<String, Entry<S>>) {
        while entries.len() > self.config.capacity.get() {
            let victim = entries
                .iter()
                .rev()
                .find(|(_, entry)| !entry.in_use())
                .map(|(sender, _)| sender.clone());

            let Some(sender) = victim else {
                tracing::debug!(
                    tracked = entries.len(),
                    capacity = self.config.capacity.get(),
                    "Store over capacity, every entry is in use"
                );
                break;
            };
            entries.pop(&sender);
            tracing::debug!(sender = %sender, "Conversation evicted (store at capacity)");
        }
    }
}
