//! In-memory page sessions.
//!
//! Each landing-page load gets its own [`PageState`]. Nothing is persisted;
//! sessions idle for longer than the configured TTL are evicted, and the
//! store never holds more than `max_sessions` entries.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::flows::PageState;

const MAX_TTL_SECONDS: u64 = 100 * 365 * 24 * 3600;

struct Entry {
    page: PageState,
    last_seen: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(idle_ttl_seconds: u64, max_sessions: usize) -> Self {
        // Clamp to a century so the conversion cannot overflow.
        let idle_ttl = Duration::seconds(idle_ttl_seconds.min(MAX_TTL_SECONDS) as i64);
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Open a fresh page session. When the store is full the least recently
    /// seen session makes room.
    pub fn create(&self) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut sessions = self.inner.lock();

        self.evict_idle(&mut sessions, now);

        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::debug!(session_id = %oldest, "Session store full, dropped oldest page session");
        }

        sessions.insert(
            id,
            Entry {
                page: PageState::default(),
                last_seen: now,
            },
        );
        id
    }

    /// Drop every idle session. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let mut sessions = self.inner.lock();
        self.evict_idle(&mut sessions, Utc::now())
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, Entry>, now: DateTime<Utc>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= self.idle_ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted idle page sessions");
        }
        evicted
    }

    /// Sweep idle sessions on a fixed interval for as long as the runtime
    /// lives, so an idle server does not hold expired pages until the next
    /// landing-page load.
    pub fn spawn_sweeper(&self, every: std::time::Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                store.sweep();
            }
        })
    }

    /// Run a state transition on a session. `None` if the session is unknown.
    /// The lock is held only for the duration of `f`.
    pub fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut PageState) -> R) -> Option<R> {
        let mut sessions = self.inner.lock();
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Utc::now();
        Some(f(&mut entry.page))
    }

    pub fn snapshot(&self, id: Uuid) -> Option<PageState> {
        self.update(id, |page| page.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
