//! Shared test helpers for HTTP-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use cookie::Cookie;
use serde_json::Value;
use tower::ServiceExt;

use library_api::{AppState, build_app};
use library_auth::PasswordHasher;
use library_core::config::{AuthConfig, CorsConfig};
use library_database::repositories::UserRepository;
use library_database::{MemoryRefreshTokenRepository, MemoryUserRepository};
use library_entity::user::{CreateUser, User, UserRole};

/// Test application backed by in-memory repositories.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// User storage, for seeding and direct inspection
    pub users: MemoryUserRepository,
    /// Refresh token storage
    pub tokens: MemoryRefreshTokenRepository,
    /// Auth configuration the app was built with
    pub config: AuthConfig,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        };
        let users = MemoryUserRepository::new();
        let tokens = MemoryRefreshTokenRepository::new();

        let state = AppState::new(&config, Arc::new(users.clone()), Arc::new(tokens.clone()))
            .expect("Failed to build app state");
        let router = build_app(state, &CorsConfig::default());

        Self {
            router,
            users,
            tokens,
            config,
        }
    }

    /// Create a user directly in storage
    pub async fn create_user(&self, username: &str, password: &str, role: UserRole) -> User {
        let password_hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");
        self.users
            .create(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@test.com"),
                password_hash,
                role,
            })
            .await
            .expect("Failed to create test user")
    }

    /// Log in through the form endpoint and return the refresh token value
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self.login_response(username, password).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response
            .refresh_cookie(&self.config.refresh_token_cookie)
            .expect("No refresh cookie in login response")
            .value()
            .to_string()
    }

    /// Submit the login form
    pub async fn login_response(&self, username: &str, password: &str) -> TestResponse {
        let form = format!("username={username}&password={}", encode_form(password));
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Exchange a refresh token for an access token
    pub async fn access_token(&self, refresh: &str) -> String {
        let response = self
            .request("POST", "/auth/token", None, Auth::Refresh(refresh))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["access_token"]
            .as_str()
            .expect("No access_token in response")
            .to_string()
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        auth: Auth<'_>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        req = match auth {
            Auth::None => req,
            Auth::Refresh(value) => req.header(
                header::COOKIE,
                format!("{}={}", self.config.refresh_token_cookie, value),
            ),
            Auth::Bearer(token) => req.header(header::AUTHORIZATION, format!("Bearer {token}")),
            Auth::RawAuthorization(value) => req.header(header::AUTHORIZATION, value),
        };

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// How a test request authenticates
pub enum Auth<'a> {
    /// No credentials
    None,
    /// Refresh token cookie
    Refresh(&'a str),
    /// `Authorization: Bearer <token>`
    Bearer(&'a str),
    /// Verbatim `Authorization` header value
    RawAuthorization(&'a str),
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` entry for the given cookie name
    pub fn refresh_cookie(&self, name: &str) -> Option<Cookie<'static>> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| Cookie::parse(v.to_string()).ok())
            .find(|c| c.name() == name)
    }

    /// The `message` field of an error body
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

fn encode_form(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '*' => c.to_string(),
            other => format!("%{:02X}", other as u32),
        })
        .collect()
}
