//! Accounts, sessions and the per-request identity gate.

pub mod credentials;
pub mod password;
pub mod session;

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use uuid::Uuid;

pub use credentials::{CredentialStore, InMemoryCredentialStore, NewUser, User, first_letter};
pub use session::SessionStore;

pub const SESSION_COOKIE: &str = "clario_session";

/// Who is calling, resolved fresh for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerIdentity {
    Authenticated(Uuid),
    Anonymous,
}

impl CallerIdentity {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, CallerIdentity::Authenticated(_))
    }

    #[must_use]
    pub const fn user_id(&self) -> Option<Uuid> {
        match self {
            CallerIdentity::Authenticated(id) => Some(*id),
            CallerIdentity::Anonymous => None,
        }
    }
}

/// Finds a cookie by name across every `Cookie` header.
pub fn get_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim())
        })
}

pub fn identify(headers: &HeaderMap, sessions: &SessionStore) -> CallerIdentity {
    get_cookie(headers, SESSION_COOKIE)
        .and_then(|cookie| sessions.resolve(cookie))
        .map_or(CallerIdentity::Anonymous, CallerIdentity::Authenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_get_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; lang=en"));
        headers.append(COOKIE, HeaderValue::from_static("clario_session=abc.def"));
        assert_eq!(get_cookie(&headers, "lang"), Some("en"));
        assert_eq!(get_cookie(&headers, SESSION_COOKIE), Some("abc.def"));
        assert_eq!(get_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_identify() {
        let sessions = SessionStore::new("secret");
        let user = Uuid::new_v4();
        let cookie = sessions.issue(user).unwrap();

        let mut headers = HeaderMap::new();
        assert_eq!(identify(&headers, &sessions), CallerIdentity::Anonymous);

        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}={cookie}")).unwrap(),
        );
        assert_eq!(identify(&headers, &sessions), CallerIdentity::Authenticated(user));
    }
}
