//! Trailing-edge debouncing of search requests, keyed by session.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Outcome of waiting out the debounce delay.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Settled {
    /// No newer call arrived for this key during the delay; go ahead.
    Latest,
    /// A newer call for this key arrived; drop this one.
    Superseded,
}

/// Lets only the last call per key through, once the key has been quiet for `delay`.
#[derive(Debug)]
pub struct SearchDebouncer<K> {
    delay: Duration,
    next_ticket: AtomicU64,
    latest: Mutex<HashMap<K, u64>>,
}

impl<K: Eq + Hash + Clone> SearchDebouncer<K> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_ticket: AtomicU64::new(0),
            latest: Mutex::new(HashMap::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Register a call for `key`, wait `delay`, and report whether it is still the latest.
    pub async fn settle(&self, key: K) -> Settled {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut g) = self.latest.lock() {
            g.insert(key.clone(), ticket);
        }
        tokio::time::sleep(self.delay).await;

        let Ok(mut g) = self.latest.lock() else {
            return Settled::Latest;
        };
        match g.get(&key) {
            Some(&t) if t == ticket => {
                g.remove(&key);
                Settled::Latest
            }
            _ => Settled::Superseded,
        }
    }

    /// Drop bookkeeping for `key` (e.g. when its session expires).
    pub fn forget(&self, key: &K) {
        if let Ok(mut g) = self.latest.lock() {
            g.remove(key);
        }
    }
}
