//! Per-user view toggle, kept server-side and keyed by a cookie

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use rand::Rng;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "review_board_session";

/// State remembered between page loads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Show developer coding scores instead of the PR list
    pub view_scores: bool,
}

/// Sessions kept before the oldest are evicted
pub const MAX_SESSIONS: usize = 10_000;

/// Session states by id, shared by all handlers of one server
///
/// Only ids handed out by [`SessionStore::start_session`] are stored; a
/// cookie naming any other id reads as the default state and is never
/// inserted.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Sessions>>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct Sessions {
    states: HashMap<String, SessionState>,
    // issue order, oldest first
    order: VecDeque<String>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Sessions::default())),
            capacity: capacity.max(1),
        }
    }

    /// Issue a fresh session id, evicting the oldest sessions when full
    pub fn start_session(&self) -> String {
        let id = format!("{:032x}", rand::rng().random::<u128>());
        let mut sessions = self.lock();

        while sessions.states.len() >= self.capacity {
            let Some(oldest) = sessions.order.pop_front() else {
                break;
            };
            sessions.states.remove(&oldest);
        }

        sessions.states.insert(id.clone(), SessionState::default());
        sessions.order.push_back(id.clone());
        id
    }

    /// Whether this server issued the id and still holds it
    pub fn contains(&self, id: &str) -> bool {
        self.lock().states.contains_key(id)
    }

    /// State for a session; unknown ids get the default state
    pub fn get(&self, id: &str) -> SessionState {
        self.lock().states.get(id).copied().unwrap_or_default()
    }

    /// Update a known session, returning false for ids not issued here
    pub fn set_view_scores(&self, id: &str, view_scores: bool) -> bool {
        match self.lock().states.get_mut(id) {
            Some(state) => {
                state.view_scores = view_scores;
                true
            }
            None => false,
        }
    }

    /// Forget a session; its id reads as the default state afterwards
    pub fn end_session(&self, id: &str) {
        let mut sessions = self.lock();
        if sessions.states.remove(id).is_some() {
            sessions.order.retain(|issued| issued != id);
        }
    }

    pub fn session_count(&self) -> usize {
        self.lock().states.len()
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Session id from the request cookies
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value for a session id
pub fn session_cookie(id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}
