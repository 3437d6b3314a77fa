use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use super::*;

fn jar_with(cookie_header: &str) -> CookieJar {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, cookie_header.parse().unwrap());
    CookieJar::from_headers(&headers)
}

// =============================================================================
// session_token
// =============================================================================

#[test]
fn session_token_reads_session_cookie() {
    let jar = jar_with("loremap-author=Ada; loremap-session=abc123");
    assert_eq!(session_token(&jar), Some("abc123"));
}

#[test]
fn session_token_missing_is_none() {
    assert_eq!(session_token(&jar_with("loremap-author=Ada")), None);
}

#[test]
fn session_token_empty_is_none() {
    assert_eq!(session_token(&jar_with("loremap-session=")), None);
}

// =============================================================================
// build_cookie
// =============================================================================

#[test]
fn session_cookie_is_http_only_and_scoped_to_root() {
    let cookie = build_cookie(SESSION_COOKIE, "tok".into(), true, false, Duration::days(30));
    assert_eq!(cookie.name(), "loremap-session");
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.max_age(), Some(Duration::days(30)));
}

#[test]
fn author_cookie_is_readable_by_scripts() {
    let cookie = build_cookie(AUTHOR_COOKIE, "Ada".into(), false, true, Duration::days(30));
    assert_eq!(cookie.http_only(), Some(false));
    assert_eq!(cookie.secure(), Some(true));
}

// =============================================================================
// wire shapes
// =============================================================================

#[test]
fn anonymous_status_omits_name() {
    let json = serde_json::to_value(AuthStatus::anonymous()).unwrap();
    assert_eq!(json, serde_json::json!({ "authenticated": false }));
}

#[test]
fn login_body_name_is_optional() {
    let body: LoginBody = serde_json::from_str(r#"{"password":"x"}"#).unwrap();
    assert!(body.name.is_none());
}
