#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

use huddle_api::{AppStateInner, router};
use huddle_store::{JsonFileLog, MessageLog, SequentialIds, SqliteLog, Store};
use huddle_types::models::Message;

/// Router over a JSON log at `path`, with deterministic IDs.
pub fn build_test_app(path: &Path) -> Router {
    build_test_app_with_ids(path, "t")
}

/// Like [`build_test_app`], for a second process over the same file: a
/// different `id_prefix` keeps the new users distinct from the old ones.
pub fn build_test_app_with_ids(path: &Path, id_prefix: &str) -> Router {
    let log = JsonFileLog::open(path).expect("open json log");
    app_with_log(Box::new(log), id_prefix)
}

pub fn build_sqlite_app() -> Router {
    let log = SqliteLog::open_in_memory().expect("open sqlite log");
    app_with_log(Box::new(log), "t")
}

fn app_with_log(log: Box<dyn MessageLog>, id_prefix: &str) -> Router {
    let store = Store::new(log, Arc::new(SequentialIds::new(id_prefix)));
    router(Arc::new(AppStateInner { store }))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str, session: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = session {
        builder = builder.header(COOKIE, format!("session={token}"));
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    body: &str,
    session: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = session {
        builder = builder.header(COOKIE, format!("session={token}"));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Raw `Set-Cookie` header for the session cookie, if the response set one.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .map(str::to_string)
}

/// Session token from the `Set-Cookie` header of a login response.
pub fn session_from(response: &Response<Body>) -> Option<String> {
    let header = set_cookie(response)?;
    let pair = header.split(';').next()?;
    let token = pair.strip_prefix("session=")?;
    (!token.is_empty()).then(|| token.to_string())
}

/// Log in as `name` and return the session token.
pub async fn login(app: &Router, name: &str) -> String {
    let response = post_form(app, "/login", &format!("name={name}"), None).await;
    session_from(&response).expect("login sets a session cookie")
}

pub fn persisted(path: &Path) -> Vec<Message> {
    match std::fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes).expect("valid chat log"),
        Err(_) => Vec::new(),
    }
}
