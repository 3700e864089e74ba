use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct Session {
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// In-memory admin sessions keyed by a random opaque token. The token is
/// what goes into the session cookie; nothing about the admin is stored
/// beyond the expiry, since there is only one shared admin identity.
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::hours(ttl_hours.max(1)),
        }
    }

    pub fn create(&self) -> Uuid {
        let token = Uuid::new_v4();
        let now = Utc::now();
        self.sessions.insert(
            token,
            Session {
                created_at: now,
                expires_at: now + self.ttl,
            },
        );
        token
    }

    /// Expired entries are evicted on read.
    pub fn is_valid(&self, token: Uuid) -> bool {
        if let Some(session) = self.sessions.get(&token) {
            if session.expires_at > Utc::now() {
                return true;
            }
            drop(session);
            self.sessions.remove(&token);
        }
        false
    }

    pub fn revoke(&self, token: Uuid) -> bool {
        self.sessions.remove(&token).is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
