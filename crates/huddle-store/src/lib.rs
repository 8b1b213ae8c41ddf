pub mod error;
pub mod ids;
pub mod json_log;
pub mod migrations;
pub mod sessions;
pub mod sqlite_log;

use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::info;

use huddle_types::models::{Message, User};

pub use error::{Result, StoreError};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use json_log::JsonFileLog;
pub use sessions::SessionStore;
pub use sqlite_log::SqliteLog;

/// Ordered, append-only storage for room messages.
///
/// `list` always goes back to the backing storage; nothing is cached.
pub trait MessageLog: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    fn append(&mut self, message: Message) -> Result<()>;

    fn list(&self) -> Result<Vec<Message>>;
}

/// Users, sessions and the message log behind a single lock.
pub struct Store {
    state: RwLock<State>,
    ids: Arc<dyn IdGenerator>,
}

struct State {
    sessions: SessionStore,
    log: Box<dyn MessageLog>,
}

impl Store {
    pub fn new(log: Box<dyn MessageLog>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            state: RwLock::new(State {
                sessions: SessionStore::new(),
                log,
            }),
            ids,
        }
    }

    pub fn open_json(path: &Path) -> Result<Self> {
        Ok(Self::new(Box::new(JsonFileLog::open(path)?), Arc::new(RandomIds)))
    }

    pub fn open_sqlite(path: &Path) -> Result<Self> {
        Ok(Self::new(Box::new(SqliteLog::open(path)?), Arc::new(RandomIds)))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        self.state.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Read the whole log once at startup. Returns the message count.
    pub fn preload(&self) -> Result<usize> {
        let state = self.read()?;
        let count = state.log.list()?.len();
        info!("Loaded {} messages from {} log", count, state.log.backend());
        Ok(count)
    }

    /// Start a session for `name`. `None` means the name was blank.
    pub fn login(&self, name: &str) -> Result<Option<String>> {
        let mut state = self.write()?;
        Ok(state.sessions.login(name, self.ids.as_ref()))
    }

    pub fn logout(&self, token: &str) -> Result<bool> {
        Ok(self.write()?.sessions.logout(token))
    }

    pub fn resolve(&self, token: &str) -> Result<Option<String>> {
        Ok(self.read()?.sessions.resolve(token).map(str::to_string))
    }

    pub fn resolve_user(&self, token: &str) -> Result<Option<User>> {
        Ok(self.read()?.sessions.resolve_user(token).cloned())
    }

    /// Append a message from `author`. Empty content is ignored and yields
    /// `None` without touching the log. Whitespace is content.
    pub fn send(&self, author: &User, content: &str) -> Result<Option<Message>> {
        if content.is_empty() {
            return Ok(None);
        }

        let message = Message {
            id: self.ids.generate(),
            user_id: author.id.clone(),
            user_name: author.name.clone(),
            content: content.to_string(),
            created_at: Utc::now(),
        };

        // Held across the whole read-modify-write of the backing file.
        let mut state = self.write()?;
        state.log.append(message.clone())?;
        Ok(Some(message))
    }

    pub fn messages(&self) -> Result<Vec<Message>> {
        self.read()?.log.list()
    }
}
