//! In-memory session store.
//!
//! Each session is an independent [`Session`]; the map shards its locks so
//! requests for different sessions never wait on each other.

use basket_core::Session;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug)]
pub struct SessionRecord {
    pub session: Session,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, SessionRecord>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.sessions.insert(
            id,
            SessionRecord {
                session,
                created_at: now,
                updated_at: now,
            },
        );
        tracing::info!(session_id = %id, active = self.len(), "session created");
        id
    }

    /// Read a session without touching it.
    pub fn view<R>(&self, id: Uuid, f: impl FnOnce(&SessionRecord) -> R) -> Option<R> {
        self.sessions.get(&id).map(|record| f(&record))
    }

    /// Run `f` with exclusive access to one session.
    pub fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut SessionRecord) -> R) -> Option<R> {
        let mut record = self.sessions.get_mut(&id)?;
        record.updated_at = Utc::now();
        Some(f(&mut record))
    }

    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "session deleted");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}
