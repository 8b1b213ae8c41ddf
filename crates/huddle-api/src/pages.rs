use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::auth::{AppState, with_store};
use crate::error::{ApiError, ApiResult};
use crate::render;
use crate::session::{clear_session, session_token};

/// `GET /`: the login form without a valid session, the chat shell with one.
/// A stale cookie is cleared on the way.
pub async fn chat_page(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Response> {
    let Some(token) = session_token(&jar) else {
        return Ok(Html(render::login_page()).into_response());
    };

    let user = with_store(&state, move |store| {
        store.resolve_user(&token).map_err(ApiError::Session)
    })
    .await?;

    match user {
        Some(user) => Ok(Html(render::chat_page(&user.name)).into_response()),
        None => {
            // Typically a cookie that outlived a restart.
            warn!("Unknown session cookie, clearing it");
            Ok((clear_session(jar), Html(render::login_page())).into_response())
        }
    }
}
