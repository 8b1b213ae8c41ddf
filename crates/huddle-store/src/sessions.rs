use std::collections::HashMap;

use chrono::Utc;
use tracing::info;

use huddle_types::models::User;

use crate::ids::IdGenerator;

/// Longest display name kept, in characters.
pub const MAX_NAME_CHARS: usize = 64;

/// In-memory users and the session tokens pointing at them.
///
/// Users are never removed; logging out only drops the token.
#[derive(Debug, Default)]
pub struct SessionStore {
    users: HashMap<String, User>,
    /// session token -> user id
    sessions: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user and a session for `name`. Returns the session token,
    /// or `None` when the name is blank.
    pub fn login(&mut self, name: &str, ids: &dyn IdGenerator) -> Option<String> {
        let name = normalize_name(name)?;

        let user = User {
            id: ids.generate(),
            name,
            created_at: Utc::now(),
        };
        let token = ids.generate();

        info!("User '{}' logged in as {}", user.name, user.id);
        self.sessions.insert(token.clone(), user.id.clone());
        self.users.insert(user.id.clone(), user);

        Some(token)
    }

    /// Drop the session for `token`. Returns whether one existed.
    pub fn logout(&mut self, token: &str) -> bool {
        match self.sessions.remove(token) {
            Some(user_id) => {
                info!("User {} logged out", user_id);
                true
            }
            None => false,
        }
    }

    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.sessions.get(token).map(String::as_str)
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn resolve_user(&self, token: &str) -> Option<&User> {
        self.resolve(token).and_then(|id| self.user(id))
    }

    #[cfg(test)]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    #[cfg(test)]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

fn normalize_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.chars().take(MAX_NAME_CHARS).collect())
}
