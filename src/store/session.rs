use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Holds the bearer token and current user for the client session.
///
/// Constructed with an optional persistence path; `None` keeps the session
/// in memory only and makes every persist action a no-op. The store is shared
/// behind an `Arc` with the API client, which reads the token on each request.
#[derive(Debug)]
pub struct SessionStore {
    state: RwLock<SessionState>,
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        let state = match &path {
            Some(p) => super::load_or_default(p),
            None => SessionState::default(),
        };
        Self {
            state: RwLock::new(state),
            path,
        }
    }

    /// In-memory session, used by unit tests and one-shot commands.
    pub fn in_memory() -> Self {
        Self::new(None)
    }

    pub fn login(&self, token: impl Into<String>, user: User) {
        {
            let mut state = self.state.write().expect("session store lock poisoned");
            state.token = Some(token.into());
            state.user = Some(user);
        }
        self.persist();
    }

    pub fn logout(&self) {
        {
            let mut state = self.state.write().expect("session store lock poisoned");
            state.token = None;
            state.user = None;
        }
        self.persist();
    }

    /// Replace the cached user without touching the token.
    pub fn set_user(&self, user: User) {
        {
            let mut state = self.state.write().expect("session store lock poisoned");
            state.user = Some(user);
        }
        self.persist();
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().expect("session store lock poisoned").token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().expect("session store lock poisoned").user.clone()
    }

    /// True iff both token and user are present.
    pub fn is_authenticated(&self) -> bool {
        let state = self.state.read().expect("session store lock poisoned");
        state.token.is_some() && state.user.is_some()
    }

    fn persist(&self) {
        if let Some(path) = &self.path {
            let state = self.state.read().expect("session store lock poisoned");
            super::persist(path, &*state);
        }
    }
}
