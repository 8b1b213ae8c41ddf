use axum::{
    Router,
    routing::{get, post},
};

use crate::auth::{self, AppState};
use crate::{messages, pages};

/// All five endpoints. Transport layers (tracing, etc.) are added by the
/// binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::chat_page))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/send", post(messages::send_message))
        .route("/messages", get(messages::get_messages))
        .with_state(state)
}
