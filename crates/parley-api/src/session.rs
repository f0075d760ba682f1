//! Process-wide bearer token and current user id.
//!
//! Readers take a consistent snapshot without locking; login and logout
//! swap the whole state atomically.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user_id: Option<String>,
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_id", &self.user_id)
            .finish()
    }
}

pub struct Session {
    state: ArcSwap<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: ArcSwap::from_pointee(SessionState::default()),
        }
    }

    pub fn with_token(token: impl Into<String>, user_id: Option<String>) -> Self {
        let session = Self::new();
        session.set(token, user_id);
        session
    }

    pub fn set(&self, token: impl Into<String>, user_id: Option<String>) {
        self.state.store(Arc::new(SessionState {
            token: Some(token.into()),
            user_id,
        }));
    }

    /// Replace the user id, keeping the current token.
    pub fn set_user_id(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        self.state.rcu(|current| SessionState {
            token: current.token.clone(),
            user_id: Some(user_id.clone()),
        });
    }

    pub fn clear(&self) {
        self.state.store(Arc::new(SessionState::default()));
    }

    pub fn snapshot(&self) -> Arc<SessionState> {
        self.state.load_full()
    }

    pub fn token(&self) -> Option<String> {
        self.state.load().token.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.state.load().user_id.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.load().token.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Session").field(&*self.state.load()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear() {
        let session = Session::new();
        assert!(!session.is_authenticated());

        session.set("tok", Some("u1".into()));
        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.user_id().as_deref(), Some("u1"));

        session.set_user_id("u2");
        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.user_id().as_deref(), Some("u2"));

        session.clear();
        assert_eq!(*session.snapshot(), SessionState::default());
    }

    #[test]
    fn snapshot_survives_swap() {
        let session = Session::with_token("old", None);
        let before = session.snapshot();
        session.set("new", None);
        assert_eq!(before.token.as_deref(), Some("old"));
        assert_eq!(session.token().as_deref(), Some("new"));
    }

    #[test]
    fn debug_redacts_token() {
        let session = Session::with_token("secret-token", Some("u1".into()));
        let printed = format!("{session:?}");
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("u1"));
    }

    #[test]
    fn concurrent_readers_see_whole_states() {
        let session = Arc::new(Session::new());
        let writer = {
            let session = session.clone();
            std::thread::spawn(move || {
                for i in 0..1000 {
                    session.set(format!("t{i}"), Some(format!("u{i}")));
                }
            })
        };
        for _ in 0..1000 {
            let snap = session.snapshot();
            if let (Some(t), Some(u)) = (&snap.token, &snap.user_id) {
                assert_eq!(&t[1..], &u[1..]);
            }
        }
        writer.join().unwrap();
    }
}
