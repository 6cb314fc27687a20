//! Session ledger: per-session reading history with age-based eviction.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};

use crate::random::OrdinaryRandom;
use crate::reading::Reading;

/// A sequence of readings grouped under one id.
#[derive(Debug, Clone)]
pub struct Session {
    /// `session_<unix-ms>_<base36>`.
    pub id: String,
    /// Readings in the order they were added.
    pub readings: Vec<Reading>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Last creation or append. Drives eviction.
    pub last_activity: DateTime<Utc>,
}

/// Shared store of sessions.
///
/// Appends and sweeps are serialized by one lock; nothing else in the core
/// holds mutable shared state.
pub struct SessionLedger {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: TimeDelta,
    rng: OrdinaryRandom,
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new(TimeDelta::hours(24))
    }
}

impl SessionLedger {
    /// A ledger evicting sessions idle for longer than `ttl`.
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            rng: OrdinaryRandom::new(),
        }
    }

    /// Idle time after which a session is swept.
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a new, empty session.
    pub fn create_session(&self) -> Session {
        let now = Utc::now();
        let mut sessions = self.lock();
        let id = loop {
            let id = format!("session_{}_{}", now.timestamp_millis(), self.rng.token());
            if !sessions.contains_key(&id) {
                break id;
            }
        };
        let session = Session {
            id: id.clone(),
            readings: Vec::new(),
            created_at: now,
            last_activity: now,
        };
        sessions.insert(id, session.clone());
        tracing::info!(session = %session.id, "created session");
        session
    }

    /// Append a reading. Unknown ids are not created implicitly; the reading
    /// is dropped and `false` returned.
    pub fn add_reading(&self, session_id: &str, reading: Reading) -> bool {
        let mut sessions = self.lock();
        match sessions.get_mut(session_id) {
            Some(session) => {
                tracing::debug!(session = session_id, reading = %reading.id, "recorded reading");
                session.readings.push(reading);
                session.last_activity = Utc::now();
                true
            }
            None => {
                tracing::warn!(session = session_id, "reading not recorded: unknown session");
                false
            }
        }
    }

    /// Readings of a session in append order; empty for unknown ids.
    pub fn readings(&self, session_id: &str) -> Vec<Reading> {
        self.lock()
            .get(session_id)
            .map(|s| s.readings.clone())
            .unwrap_or_default()
    }

    /// Snapshot of a session.
    pub fn get_session(&self, session_id: &str) -> Option<Session> {
        self.lock().get(session_id).cloned()
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.lock().len()
    }

    /// Remove sessions idle for longer than the ttl. Returns how many went.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    /// [`sweep`](Self::sweep) against an explicit clock.
    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.ttl;
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, s| s.last_activity >= cutoff);
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::warn!(removed, remaining = sessions.len(), "swept idle sessions");
        }
        removed
    }
}
