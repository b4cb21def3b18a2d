//! Session tracking
//!
//! Sessions are identified by a cookie and hold a per-session attribute map.
//! A session idle for longer than the configured timeout is discarded the next
//! time it is looked up.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Duration, Local};
use serde_json::Value;

use crate::logger;

/// A single client session
#[derive(Debug)]
pub struct Session {
    id: String,
    created: DateTime<Local>,
    last_accessed: Mutex<DateTime<Local>>,
    attributes: Mutex<HashMap<String, Value>>,
}

impl Session {
    fn new(id: String, now: DateTime<Local>) -> Self {
        Self {
            id,
            created: now,
            last_accessed: Mutex::new(now),
            attributes: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn created(&self) -> DateTime<Local> {
        self.created
    }

    pub fn last_accessed(&self) -> DateTime<Local> {
        *self.last_accessed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Attribute names in sorted order
    pub fn attribute_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    fn touch(&self, now: DateTime<Local>) {
        *self.last_accessed.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    fn is_expired(&self, now: DateTime<Local>, timeout: Duration) -> bool {
        now - self.last_accessed() > timeout
    }
}

/// All live sessions
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    timeout: Duration,
}

impl SessionStore {
    pub fn new(timeout_secs: u64) -> Self {
        let timeout = i64::try_from(timeout_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self {
            sessions: RwLock::new(HashMap::new()),
            timeout,
        }
    }

    /// Existing, unexpired session for `id`
    pub fn find(&self, id: &str) -> Option<Arc<Session>> {
        self.find_at(id, Local::now())
    }

    /// Existing session for `id`, or a new one. The flag is true when the
    /// session was created by this call.
    pub fn get_or_create(&self, id: Option<&str>) -> (Arc<Session>, bool) {
        self.get_or_create_at(id, Local::now())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_at(&self, id: &str, now: DateTime<Local>) -> Option<Arc<Session>> {
        let session = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()?;

        if session.is_expired(now, self.timeout) {
            self.sessions
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(id);
            return None;
        }
        session.touch(now);
        Some(session)
    }

    fn get_or_create_at(&self, id: Option<&str>, now: DateTime<Local>) -> (Arc<Session>, bool) {
        if let Some(session) = id.and_then(|id| self.find_at(id, now)) {
            return (session, false);
        }

        let session = Arc::new(Session::new(uuid::Uuid::new_v4().to_string(), now));
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, s| !s.is_expired(now, self.timeout));
        sessions.insert(session.id.clone(), Arc::clone(&session));
        logger::log_new_session(&session.id);
        (session, true)
    }
}

/// Extract a cookie value from a `Cookie` header
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// `Set-Cookie` value for a newly created session
pub fn session_cookie(name: &str, id: &str) -> String {
    format!("{name}={id}; Path=/; HttpOnly")
}
