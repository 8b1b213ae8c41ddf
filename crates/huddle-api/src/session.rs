use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

pub const SESSION_COOKIE: &str = "session";

/// Client-side expiry hint for a fresh session cookie. The server never
/// expires sessions on its own.
pub const SESSION_TTL: Duration = Duration::hours(24);

const HX_REQUEST: &str = "hx-request";
const HX_REDIRECT: &str = "hx-redirect";

/// The session token carried by the request, if any.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(SESSION_TTL)
        .expires(OffsetDateTime::now_utc() + SESSION_TTL)
        .build()
}

/// Jar change that tells the browser to drop the session cookie
/// (empty value, expiry in the past). Emitted even when the request
/// carried no cookie.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookie.make_removal();
    jar.add(cookie)
}

/// Send an unauthenticated caller back to `/`.
///
/// Plain requests get a 303. The XHR behind an htmx request would follow
/// a 3xx silently and swap the login page into the target, so htmx
/// requests get an empty 200 carrying `HX-Redirect` instead.
pub fn redirect_home(headers: &HeaderMap) -> Response {
    let from_htmx = headers
        .get(HX_REQUEST)
        .is_some_and(|v| v.as_bytes() == b"true");
    if !from_htmx {
        return Redirect::to("/").into_response();
    }

    (StatusCode::OK, [(HX_REDIRECT, HeaderValue::from_static("/"))]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn blank_cookie_is_no_session() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, ""));
        assert!(session_token(&jar).is_none());

        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "abc"));
        assert_eq!(session_token(&jar).as_deref(), Some("abc"));
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("abc".into());
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::hours(24)));
    }

    #[test]
    fn htmx_requests_get_hx_redirect() {
        let mut headers = HeaderMap::new();
        let plain = redirect_home(&headers);
        assert_eq!(plain.status(), StatusCode::SEE_OTHER);
        assert_eq!(plain.headers()[LOCATION], "/");
        assert!(plain.headers().get(HX_REDIRECT).is_none());

        // A 3xx would be followed by the XHR before htmx sees any header.
        headers.insert(HX_REQUEST, HeaderValue::from_static("true"));
        let htmx = redirect_home(&headers);
        assert_eq!(htmx.status(), StatusCode::OK);
        assert_eq!(htmx.headers()[HX_REDIRECT], "/");
        assert!(htmx.headers().get(LOCATION).is_none());
    }
}
