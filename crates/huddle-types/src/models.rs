use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A display identity created on login. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One entry of the room log.
///
/// `user_name` is copied from the author at send time, so a message still
/// renders after a restart even though its `User` record is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
