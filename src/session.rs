//! # Session Store
//!
//! In-memory conversation state keyed by user. Sessions that stay idle for
//! longer than the configured TTL are treated as abandoned and dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use teloxide::types::UserId;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::dialogue::AdminDialogueState;

#[derive(Debug)]
struct SessionEntry {
    state: AdminDialogueState,
    touched_at: Instant,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.touched_at) >= ttl
    }
}

/// Shared map of user sessions with TTL eviction
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<UserId, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Handle bound to one user's session
    pub fn dialogue(&self, user_id: UserId) -> AdminDialogue {
        AdminDialogue {
            store: self.clone(),
            user_id,
        }
    }

    /// Current state for `user_id`; expired sessions read as idle and are removed
    pub async fn get(&self, user_id: UserId) -> AdminDialogueState {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();

        match sessions.get(&user_id) {
            Some(entry) if entry.is_expired(self.ttl, now) => {
                debug!(user_id = %user_id, "Session expired");
                sessions.remove(&user_id);
                AdminDialogueState::Idle
            }
            Some(entry) => entry.state.clone(),
            None => AdminDialogueState::Idle,
        }
    }

    /// Replace the state for `user_id` and refresh its TTL
    pub async fn update(&self, user_id: UserId, state: AdminDialogueState) {
        let mut sessions = self.sessions.lock().await;
        if state.is_idle() {
            sessions.remove(&user_id);
        } else {
            sessions.insert(
                user_id,
                SessionEntry {
                    state,
                    touched_at: Instant::now(),
                },
            );
        }
    }

    /// Drop the session for `user_id`
    pub async fn remove(&self, user_id: UserId) {
        self.sessions.lock().await.remove(&user_id);
    }

    /// Remove every expired session, returning how many were dropped
    pub async fn evict_expired(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(self.ttl, now));
        before - sessions.len()
    }

    /// Periodically evict expired sessions in the background
    pub fn spawn_reaper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = store.evict_expired().await;
                if evicted > 0 {
                    debug!(evicted, "Evicted idle sessions");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// One user's view of the session store, shaped like a teloxide `Dialogue`
#[derive(Debug, Clone)]
pub struct AdminDialogue {
    store: SessionStore,
    user_id: UserId,
}

impl AdminDialogue {
    pub async fn get(&self) -> AdminDialogueState {
        self.store.get(self.user_id).await
    }

    pub async fn update(&self, state: AdminDialogueState) {
        self.store.update(self.user_id, state).await
    }

    pub async fn exit(&self) {
        self.store.remove(self.user_id).await
    }
}
