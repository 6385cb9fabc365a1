//! Integration tests for Pressroom.
//!
//! The tests drive the real admin router in-process with
//! `tower::ServiceExt::oneshot`; no server or network is involved.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pressroom-integration-tests
//! ```

use std::sync::Mutex;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use pressroom_admin::{
    config::AdminConfig,
    state::AppState,
    store::{Fixtures, Latency, MockStore},
};
use serde_json::Value;
use tower::ServiceExt;

const BODY_LIMIT: usize = 4 * 1024 * 1024;

/// The admin app on the built-in dataset, with a cookie jar of one.
pub struct TestApp {
    router: Router,
    state: AppState,
    cookie: Mutex<Option<String>>,
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// `Location` of a redirect.
    ///
    /// # Panics
    ///
    /// Panics if the response has no `Location` header.
    #[must_use]
    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_else(|| panic!("expected a redirect, got {}", self.status))
    }

    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.body))
    }

    /// Whether the rendered page contains `text`.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.body.contains(text)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// No latency and no failures.
    #[must_use]
    pub fn new() -> Self {
        Self::with_latency(Latency::none())
    }

    /// Every store call fails.
    #[must_use]
    pub fn failing() -> Self {
        Self::with_latency(Latency::new(std::time::Duration::ZERO, 1.0))
    }

    /// Built-in dataset with custom latency.
    ///
    /// # Panics
    ///
    /// Panics if the built-in fixtures do not parse.
    #[must_use]
    pub fn with_latency(latency: Latency) -> Self {
        let fixtures = Fixtures::builtin().unwrap_or_else(|e| panic!("seed fixtures: {e}"));
        let store = MockStore::from_fixtures(fixtures, latency);
        let state = AppState::new(AdminConfig::default(), store);
        Self {
            router: pressroom_admin::app(state.clone()),
            state,
            cookie: Mutex::new(None),
        }
    }

    /// Direct store access for assertions.
    #[must_use]
    pub fn store(&self) -> &MockStore {
        self.state.store()
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, Body::empty()).await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(
            Method::POST,
            uri,
            Some("application/x-www-form-urlencoded"),
            Body::from(body),
        )
        .await
    }

    pub async fn put_json(&self, uri: &str, json: &Value) -> TestResponse {
        self.send(
            Method::PUT,
            uri,
            Some("application/json"),
            Body::from(json.to_string()),
        )
        .await
    }

    /// GET the `Location` of a redirect.
    pub async fn follow(&self, response: &TestResponse) -> TestResponse {
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);
        self.get(response.location()).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(cookie) = self.cookie() {
            request = request.header(header::COOKIE, cookie);
        }
        let request = request
            .body(body)
            .unwrap_or_else(|e| panic!("bad request {uri}: {e}"));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|e| match e {});

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default().to_string();
            self.set_cookie(pair);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .unwrap_or_else(|e| panic!("read body of {uri}: {e}"));

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn cookie(&self) -> Option<String> {
        self.cookie.lock().ok().and_then(|c| c.clone())
    }

    fn set_cookie(&self, pair: String) {
        if let Ok(mut cookie) = self.cookie.lock() {
            *cookie = Some(pair);
        }
    }
}
