//! Cookie-based booking session middleware.

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

pub const SESSION_COOKIE: &str = "booking_session";

/// ID of the booking session serving the current request.
///
/// Inserted as a request extension by [`layer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

/// Attaches a booking session to every request.
///
/// # Cookie Format
///
/// ```text
/// Cookie: booking_session=<22 url-safe base64 chars>
/// ```
///
/// # Flow
///
/// 1. Extract the `booking_session` cookie from the request
/// 2. Reuse the session if it is still in the store
/// 3. Otherwise open a fresh session and answer with `Set-Cookie`
///
/// A missing, malformed or expired cookie is not an error: the visitor
/// simply starts a new booking from the first step.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let cookie = read_cookie(req.headers(), SESSION_COOKIE);

    let (id, created) = st.booking_service.resolve(cookie.as_deref()).await;
    req.extensions_mut().insert(SessionId(id.clone()));

    let mut response = next.run(req).await;

    if created {
        match HeaderValue::from_str(&session_cookie(&id)) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to build session cookie: {}", e),
        }
    }

    response
}

/// Finds one cookie in the `Cookie` header.
///
/// Handles multiple cookies by splitting on semicolons and ignoring every
/// other key.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

fn session_cookie(id: &str) -> String {
    format!("{}={}; HttpOnly; SameSite=Lax; Path=/", SESSION_COOKIE, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; booking_session=abc123; lang=en"),
        );

        assert_eq!(
            read_cookie(&headers, SESSION_COOKIE).as_deref(),
            Some("abc123")
        );
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_without_header() {
        assert_eq!(read_cookie(&HeaderMap::new(), SESSION_COOKIE), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc");

        assert!(cookie.starts_with("booking_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
    }
}
