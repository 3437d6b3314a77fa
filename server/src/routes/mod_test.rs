use axum::body::{Body, to_bytes};
use axum::http::{Request, header};
use tower::ServiceExt;

use super::*;
use crate::services::pins::PinRecord;
use crate::state::test_helpers::{TEST_PASSWORD, test_app_state};

async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn unplaced(id: &str) -> PinRecord {
    PinRecord {
        id: id.to_owned(),
        name: id.to_uppercase(),
        category: None,
        status: None,
        description: String::new(),
        tags: Vec::new(),
        x: None,
        y: None,
    }
}

// =============================================================================
// health
// =============================================================================

#[tokio::test]
async fn healthz_returns_ok() {
    let app = app(test_app_state());
    let resp = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_404_without_static_dir() {
    let app = app(test_app_state());
    let resp = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// pins
// =============================================================================

#[tokio::test]
async fn list_pins_served_from_cache() {
    let state = test_app_state();
    state.pin_cache.store(vec![unplaced("a"), unplaced("b")], 0);
    let resp = app(state)
        .oneshot(Request::builder().uri("/api/pins").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json[0]["id"], "a");
    assert_eq!(json[1]["id"], "b");
    assert!(json[0]["x"].is_null());
}

#[tokio::test]
async fn list_pins_refresh_failure_is_500_with_error_body() {
    let state = test_app_state();
    state.pin_cache.store(vec![unplaced("a")], 0);
    let resp = app(state)
        .oneshot(Request::builder().uri("/api/pins?refresh=true").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn place_without_session_is_401() {
    let resp = app(test_app_state())
        .oneshot(json_post("/api/place", r#"{"pin_id":"a","x":0.2,"y":0.8}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"], "unauthorized");
}

// =============================================================================
// auth
// =============================================================================

#[tokio::test]
async fn login_with_wrong_password_is_401() {
    let resp = app(test_app_state())
        .oneshot(json_post("/api/auth", r#"{"password":"nope","name":"Ada"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body_json(resp).await["error"], "wrong password");
}

#[tokio::test]
async fn login_with_malformed_body_is_400_json() {
    for body in [r#"{"name":"Ada"}"#, "not json"] {
        let resp = app(test_app_state()).oneshot(json_post("/api/auth", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body_json(resp).await["error"], "missing password");
    }
}

#[tokio::test]
async fn login_with_right_password_but_no_database_is_500() {
    let body = format!(r#"{{"password":"{TEST_PASSWORD}"}}"#);
    let resp = app(test_app_state()).oneshot(json_post("/api/auth", &body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn status_without_cookie_is_unauthenticated() {
    let resp = app(test_app_state())
        .oneshot(Request::builder().uri("/api/auth").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!({ "authenticated": false }));
}

#[tokio::test]
async fn logout_without_session_clears_both_cookies() {
    let resp = app(test_app_state())
        .oneshot(Request::builder().method("POST").uri("/api/auth/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let cleared: Vec<&str> = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(cleared.iter().any(|c| c.starts_with("loremap-session=") && c.contains("Max-Age=0")));
    assert!(cleared.iter().any(|c| c.starts_with("loremap-author=") && c.contains("Max-Age=0")));
}
