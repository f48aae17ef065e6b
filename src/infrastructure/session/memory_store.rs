//! Process-local booking session store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::booking::BookingSession;
use crate::error::AppError;
use crate::utils::id_generator::generate_session_id;

struct Entry {
    session: BookingSession,
    last_seen: Instant,
}

impl Entry {
    fn is_expired(&self, idle_timeout: Duration) -> bool {
        self.last_seen.elapsed() >= idle_timeout
    }
}

/// In-memory map of session ID to [`BookingSession`].
///
/// Sessions live only as long as the process and expire after
/// `idle_timeout` without a request. When `capacity` is reached, the least
/// recently used session is evicted to make room.
///
/// All mutations run inside [`InMemorySessionStore::update`] while the store
/// lock is held, so two requests for the same session never interleave. The
/// lock is never held across I/O.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
    idle_timeout: Duration,
    capacity: usize,
}

impl InMemorySessionStore {
    pub fn new(idle_timeout: Duration, capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
            capacity: capacity.max(1),
        }
    }

    /// Creates a session with defaults and returns its ID.
    pub async fn open(&self, today: NaiveDate) -> String {
        let mut sessions = self.sessions.lock().await;

        let idle_timeout = self.idle_timeout;
        sessions.retain(|_, entry| !entry.is_expired(idle_timeout));

        if sessions.len() >= self.capacity
            && let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| id.clone())
        {
            debug!("Session store full, evicting least recently used session");
            sessions.remove(&oldest);
        }

        let id = generate_session_id();
        sessions.insert(
            id.clone(),
            Entry {
                session: BookingSession::new(today),
                last_seen: Instant::now(),
            },
        );
        debug!(active = sessions.len(), "Booking session opened");
        id
    }

    /// True if the session exists and has not expired.
    pub async fn contains(&self, id: &str) -> bool {
        let sessions = self.sessions.lock().await;
        sessions
            .get(id)
            .is_some_and(|entry| !entry.is_expired(self.idle_timeout))
    }

    /// Runs `f` against the session and refreshes its idle timer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session does not exist or has
    /// expired, otherwise whatever `f` returns.
    pub async fn update<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut BookingSession) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.sessions.lock().await;

        let expired = match sessions.get(id) {
            Some(entry) => entry.is_expired(self.idle_timeout),
            None => return Err(session_not_found()),
        };
        if expired {
            sessions.remove(id);
            return Err(session_not_found());
        }

        let entry = sessions.get_mut(id).ok_or_else(session_not_found)?;
        entry.last_seen = Instant::now();
        f(&mut entry.session)
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.lock().await.remove(id).is_some()
    }

    /// Number of stored sessions, including ones not yet swept.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn session_not_found() -> AppError {
    AppError::not_found("Booking session not found or expired", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::Step;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    #[tokio::test]
    async fn test_open_and_update() {
        let store = InMemorySessionStore::new(Duration::from_secs(60), 10);
        let id = store.open(today()).await;

        assert!(store.contains(&id).await);
        let step = store.update(&id, |s| Ok(s.step())).await.unwrap();
        assert_eq!(step, Step::Selection);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = InMemorySessionStore::new(Duration::from_secs(60), 10);

        let err = store.update(&"x".repeat(22), |s| Ok(s.step())).await.unwrap_err();
        assert_eq!(err.code(), "not_found");
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let store = InMemorySessionStore::new(Duration::ZERO, 10);
        let id = store.open(today()).await;

        assert!(!store.contains(&id).await);
        assert!(store.update(&id, |s| Ok(s.step())).await.is_err());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let store = InMemorySessionStore::new(Duration::from_secs(60), 2);
        let first = store.open(today()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = store.open(today()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        // Touch the first session so the second becomes the oldest
        store.update(&first, |_| Ok(())).await.unwrap();
        let third = store.open(today()).await;

        assert_eq!(store.len().await, 2);
        assert!(store.contains(&first).await);
        assert!(!store.contains(&second).await);
        assert!(store.contains(&third).await);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_session() {
        let store = InMemorySessionStore::new(Duration::from_secs(60), 10);
        let id = store.open(today()).await;

        let result = store.update(&id, |s| s.advance()).await;
        assert!(result.is_err());
        assert!(store.contains(&id).await);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemorySessionStore::new(Duration::from_secs(60), 10);
        let id = store.open(today()).await;

        assert!(store.remove(&id).await);
        assert!(!store.remove(&id).await);
    }
}
