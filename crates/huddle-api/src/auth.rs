use std::sync::Arc;

use axum::{Form, extract::State, response::{IntoResponse, Redirect}};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use huddle_store::Store;
use huddle_types::forms::LoginForm;

use crate::error::{ApiError, ApiResult};
use crate::session::{clear_session, session_cookie, session_token};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
}

/// Run `f` against the store on the blocking pool. Every store call may
/// wait on the lock while a log append rewrites the file.
pub async fn with_store<F, T>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&Store) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    let db = state.clone();
    tokio::task::spawn_blocking(move || f(&db.store))
        .await
        .inspect_err(|e| error!("spawn_blocking join error: {}", e))?
}

/// A blank name is silently bounced back to the login form.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> ApiResult<impl IntoResponse> {
    let token = with_store(&state, move |store| {
        store.login(&form.name).map_err(ApiError::Session)
    })
    .await?;

    let jar = match token {
        Some(token) => jar.add(session_cookie(token)),
        None => jar,
    };

    Ok((jar, Redirect::to("/")))
}

/// Always clears the cookie, whether or not the session was known.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<impl IntoResponse> {
    if let Some(token) = session_token(&jar) {
        with_store(&state, move |store| store.logout(&token).map_err(ApiError::Session)).await?;
    }

    Ok((clear_session(jar), Redirect::to("/")))
}
