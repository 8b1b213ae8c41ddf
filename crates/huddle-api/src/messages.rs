use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use huddle_types::forms::SendForm;

use crate::auth::{AppState, with_store};
use crate::error::{ApiError, ApiResult};
use crate::render;
use crate::session::{redirect_home, session_token};

/// `POST /send`: append the message (unless empty) and answer with the
/// full, freshly reloaded list.
pub async fn send_message(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<SendForm>,
) -> ApiResult<Response> {
    let Some(token) = session_token(&jar) else {
        return Ok(redirect_home(&headers));
    };

    let outcome = with_store(&state, move |store| {
        let Some(user) = store.resolve_user(&token).map_err(ApiError::Session)? else {
            return Ok(None);
        };
        store.send(&user, &form.message).map_err(ApiError::Save)?;
        let messages = store.messages().map_err(ApiError::Load)?;
        Ok(Some((user.id, messages)))
    })
    .await?;

    match outcome {
        Some((viewer_id, messages)) => {
            Ok(Html(render::message_fragment(&messages, &viewer_id)).into_response())
        }
        None => Ok(redirect_home(&headers)),
    }
}

/// `GET /messages`: the poll target. Reloads the whole log on every call.
pub async fn get_messages(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let Some(token) = session_token(&jar) else {
        return Ok(redirect_home(&headers));
    };

    let outcome = with_store(&state, move |store| {
        let Some(viewer_id) = store.resolve(&token).map_err(ApiError::Session)? else {
            return Ok(None);
        };
        let messages = store.messages().map_err(ApiError::Load)?;
        Ok(Some((viewer_id, messages)))
    })
    .await?;

    match outcome {
        Some((viewer_id, messages)) => {
            Ok(Html(render::message_fragment(&messages, &viewer_id)).into_response())
        }
        None => Ok(redirect_home(&headers)),
    }
}
