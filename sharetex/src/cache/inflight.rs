//! Coalescing of concurrent fetches for one key.
//!
//! The registry maps each key to a weak handle on the shared future doing
//! the work. A second request for a key that is still being fetched awaits
//! the same future instead of starting another one. The registry never
//! keeps work alive on its own: when every caller waiting on a fetch goes
//! away the future is dropped, and the next request starts fresh.

use std::fmt;
use std::hash::Hash;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use tracing::debug;

type SharedWork<T> = Shared<BoxFuture<'static, T>>;

/// Registry of fetches currently running, keyed by `K`.
pub struct InFlight<K, T>
where
    K: Eq + Hash,
{
    pending: DashMap<K, WeakShared<BoxFuture<'static, T>>>,
}

impl<K, T> InFlight<K, T>
where
    K: Eq + Hash + Clone + fmt::Display,
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            pending: DashMap::new(),
        }
    }

    /// Await the fetch for `key`, starting it with `start` if none is live.
    ///
    /// `start` is only called when no other caller is fetching `key`.
    pub async fn run<F>(&self, key: K, start: F) -> T
    where
        F: FnOnce() -> BoxFuture<'static, T>,
    {
        let work = self.join_or_start(&key, start);
        let output = work.await;

        // Forget the entry once its work has finished or been abandoned
        self.pending
            .remove_if(&key, |_, weak| match weak.upgrade() {
                Some(live) => live.peek().is_some(),
                None => true,
            });
        output
    }

    fn join_or_start<F>(&self, key: &K, start: F) -> SharedWork<T>
    where
        F: FnOnce() -> BoxFuture<'static, T>,
    {
        match self.pending.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                if let Some(live) = entry.get().upgrade() {
                    debug!(key = %key, "Joining in-flight fetch");
                    return live;
                }
                let work = start().shared();
                if let Some(weak) = work.downgrade() {
                    entry.insert(weak);
                }
                work
            }
            Entry::Vacant(entry) => {
                let work = start().shared();
                if let Some(weak) = work.downgrade() {
                    entry.insert(weak);
                }
                work
            }
        }
    }

    /// Whether a live fetch for `key` is registered.
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending
            .get(key)
            .and_then(|weak| weak.upgrade())
            .is_some_and(|live| live.peek().is_none())
    }

    /// Number of live fetches.
    pub fn len(&self) -> usize {
        self.pending
            .iter()
            .filter(|entry| entry.value().upgrade().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, T> Default for InFlight<K, T>
where
    K: Eq + Hash + Clone + fmt::Display,
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, T> fmt::Debug for InFlight<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlight")
            .field("entries", &self.pending.len())
            .finish()
    }
}
