use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::config::AppConfig;
use crate::handlers::{self, user};
use crate::state::AppState;

/// Full application router with global middleware.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .merge(user_routes())
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(config));
    }

    let router = if config.api.enable_request_logging {
        router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    } else {
        router
    };

    router.with_state(state)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(user::user_register))
        .route("/user/get", get(user::user_get))
        .route("/user/getAll", get(user::user_get_all))
        // does NOT create the record when the user is unknown
        .route("/user/update", put(user::user_update))
        .route("/user/delete", delete(user::user_delete))
        .route("/user/deleteAll", delete(user::user_delete_all))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        if !crate::is_development!() {
            warn!("CORS enabled without SECURITY_CORS_ORIGINS; allowing any origin");
        }
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let mut config = AppConfig::from_env();
        config.api.enable_request_logging = false;
        config.api.max_request_size_bytes = 1024;
        app(AppState::in_memory(), &config)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        let req = Request::builder().method(method).uri(uri).body(body).unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn alfie() -> Value {
        json!({ "UserName": "Alfie", "Email": "alfie@some_office.org", "Password": "passwrd1" })
    }

    #[tokio::test]
    async fn home_serves_banner() {
        let app = test_app();
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], handlers::home::HOME_BANNER.as_bytes());
    }

    #[tokio::test]
    async fn health_reports_ok_for_memory_store() {
        let app = test_app();
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn register_returns_created_with_id() {
        let app = test_app();
        let (status, body) = call(&app, Method::POST, "/user/register", Some(alfie())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["Status"], "Success");
        assert_eq!(body["User"]["UserName"], "Alfie");
        assert!(body["User"]["ID"].as_i64().unwrap() >= 0);
    }

    #[tokio::test]
    async fn register_with_missing_field_is_server_error_envelope() {
        let app = test_app();
        let (status, body) = call(
            &app,
            Method::POST,
            "/user/register",
            Some(json!({ "UserName": "", "Email": "luser@moron.com", "Password": "passwrd1" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["Status"], "User create failure");
        assert_eq!(body["Reason"], "empty user name");

        let (_, all) = call(&app, Method::GET, "/user/getAll", None).await;
        assert_eq!(all["Count"], 0);
    }

    #[tokio::test]
    async fn malformed_body_returns_single_envelope() {
        let app = test_app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/user/register")
            .body(Body::from("{\"UserName\": "))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["Status"], "Invalid request");
        assert!(body["Reason"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let app = test_app();
        let big = json!({ "UserName": "x".repeat(4096), "Email": "e", "Password": "p" });
        let (status, body) = call(&app, Method::POST, "/user/register", Some(big)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["Status"], "Request too large");
    }

    #[tokio::test]
    async fn get_update_delete_flow() {
        let app = test_app();
        call(&app, Method::POST, "/user/register", Some(alfie())).await;

        let (status, body) = call(&app, Method::GET, "/user/get", Some(json!({ "UserName": "Alfie" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["User"]["Email"], "alfie@some_office.org");

        let changed = json!({ "UserName": "Alfie", "Email": "alfie@some_office.org", "Password": "newpass" });
        let (status, body) = call(&app, Method::PUT, "/user/update", Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["User"]["Password"], "newpass");

        let (status, body) = call(&app, Method::DELETE, "/user/delete", Some(json!({ "UserName": "Alfie" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["User"]["UserName"], "Alfie");

        let (status, body) = call(&app, Method::GET, "/user/get", Some(json!({ "UserName": "Alfie" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["Status"], "User not found");
    }

    #[tokio::test]
    async fn unknown_user_update_and_delete_are_not_found() {
        let app = test_app();
        let ghost = json!({ "UserName": "Ghost", "Email": "g@x.org", "Password": "p" });
        let (status, _) = call(&app, Method::PUT, "/user/update", Some(ghost)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, Method::DELETE, "/user/delete", Some(json!({ "UserName": "Ghost" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, all) = call(&app, Method::GET, "/user/getAll", None).await;
        assert_eq!(all["Count"], 0);
    }

    #[tokio::test]
    async fn delete_all_clears_users() {
        let app = test_app();
        call(&app, Method::POST, "/user/register", Some(alfie())).await;

        let (status, body) = call(&app, Method::DELETE, "/user/deleteAll", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "Status": "Success", "Reason": "" }));

        let (_, all) = call(&app, Method::GET, "/user/getAll", None).await;
        assert_eq!(all["Count"], 0);
        assert_eq!(all["Users"], json!([]));
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let app = test_app();
        let (status, _) = call(&app, Method::POST, "/user/delete", Some(json!({ "UserName": "Alfie" }))).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_route_gets_not_found_envelope() {
        let app = test_app();
        let (status, body) = call(&app, Method::GET, "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["Status"], "Not found");
    }
}
