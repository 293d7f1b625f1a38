use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{error, warn};
use uuid::Uuid;

use crate::errors::ClarioError;

/// Sessions last two months.
pub const SESSION_TTL_DAYS: i64 = 60;

#[derive(Debug, Clone, Copy)]
struct SessionRecord {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

/// In-memory sessions addressed by signed cookie values of the form
/// `<session uuid>.<hex HMAC-SHA256(secret, session uuid)>`.
#[derive(Clone)]
pub struct SessionStore {
    secret: Arc<String>,
    sessions: Arc<RwLock<HashMap<Uuid, SessionRecord>>>,
}

impl SessionStore {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Arc::new(secret.to_string()),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Opens a session for `user_id` and returns the cookie value.
    /// Expired sessions are swept on every issue.
    pub fn issue(&self, user_id: Uuid) -> Result<String, ClarioError> {
        self.issue_at(user_id, Utc::now())
    }

    fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<String, ClarioError> {
        let session_id = Uuid::new_v4();
        let record = SessionRecord {
            user_id,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        };
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| ClarioError::StoreError(format!("session lock poisoned: {e}")))?;
        sessions.retain(|_, r| r.expires_at > now);
        sessions.insert(session_id, record);
        drop(sessions);

        Ok(format!(
            "{session_id}.{}",
            compute_signature(&session_id.to_string(), &self.secret)
        ))
    }

    /// Returns the user behind a cookie value, if it is authentic and unexpired.
    pub fn resolve(&self, cookie_value: &str) -> Option<Uuid> {
        self.resolve_at(cookie_value, Utc::now())
    }

    fn resolve_at(&self, cookie_value: &str, now: DateTime<Utc>) -> Option<Uuid> {
        let session_id = self.verified_id(cookie_value)?;

        let record = {
            let sessions = self.sessions.read().ok()?;
            *sessions.get(&session_id)?
        };

        if record.expires_at <= now {
            if let Ok(mut sessions) = self.sessions.write() {
                sessions.remove(&session_id);
            }
            return None;
        }

        Some(record.user_id)
    }

    /// Ends the session behind a cookie value. Unknown values are ignored.
    pub fn revoke(&self, cookie_value: &str) {
        let Some(session_id) = self.verified_id(cookie_value) else {
            return;
        };
        match self.sessions.write() {
            Ok(mut sessions) => {
                sessions.remove(&session_id);
            }
            Err(e) => error!("Failed to revoke session: {}", e),
        }
    }

    fn verified_id(&self, cookie_value: &str) -> Option<Uuid> {
        let (id, signature) = cookie_value.split_once('.')?;
        if !verify_signature(id, signature, &self.secret) {
            warn!("Session cookie signature verification failed");
            return None;
        }
        Uuid::parse_str(id).ok()
    }
}

pub fn compute_signature(session_id: &str, secret: &str) -> String {
    let mut mac = match Hmac::<Sha256>::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return String::new();
        }
    };
    mac.update(session_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn verify_signature(session_id: &str, signature: &str, secret: &str) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    let mut mac = match Hmac::<Sha256>::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return false;
        }
    };
    mac.update(session_id.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_resolve() {
        let store = SessionStore::new("secret");
        let user = Uuid::new_v4();
        let cookie = store.issue(user).unwrap();
        assert_eq!(store.resolve(&cookie), Some(user));
    }

    #[test]
    fn test_tampered_cookie_is_rejected() {
        let store = SessionStore::new("secret");
        let cookie = store.issue(Uuid::new_v4()).unwrap();
        let (id, _) = cookie.split_once('.').unwrap();
        let forged = format!("{id}.{}", compute_signature(id, "other-secret"));
        assert_eq!(store.resolve(&forged), None);
        assert_eq!(store.resolve("not-a-cookie"), None);
        assert_eq!(store.resolve(&format!("{id}.zz")), None);
    }

    #[test]
    fn test_signed_but_unknown_session_is_rejected() {
        let store = SessionStore::new("secret");
        let id = Uuid::new_v4().to_string();
        let cookie = format!("{id}.{}", compute_signature(&id, "secret"));
        assert_eq!(store.resolve(&cookie), None);
    }

    #[test]
    fn test_expired_session_is_evicted() {
        let store = SessionStore::new("secret");
        let user = Uuid::new_v4();
        let issued = Utc::now() - Duration::days(SESSION_TTL_DAYS + 1);
        let cookie = store.issue_at(user, issued).unwrap();
        assert_eq!(store.resolve(&cookie), None);
        assert!(store.sessions.read().unwrap().is_empty());
    }

    #[test]
    fn test_issue_sweeps_abandoned_expired_sessions() {
        let store = SessionStore::new("secret");
        let long_ago = Utc::now() - Duration::days(SESSION_TTL_DAYS + 30);
        for _ in 0..1000 {
            store.issue_at(Uuid::new_v4(), long_ago).unwrap();
        }

        let user = Uuid::new_v4();
        let cookie = store.issue(user).unwrap();

        assert_eq!(store.resolve(&cookie), Some(user));
        assert_eq!(store.sessions.read().unwrap().len(), 1);
    }

    #[test]
    fn test_revoke() {
        let store = SessionStore::new("secret");
        let cookie = store.issue(Uuid::new_v4()).unwrap();
        store.revoke(&cookie);
        assert_eq!(store.resolve(&cookie), None);
        store.revoke("garbage");
    }

    #[test]
    fn test_signature_roundtrip() {
        let sig = compute_signature("abc", "secret");
        assert!(verify_signature("abc", &sig, "secret"));
        assert!(!verify_signature("abd", &sig, "secret"));
    }
}
