//! HTTP test driver

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::domain::entities::{Entity, IdentityPayload};
use crate::error::HarnessError;
use crate::harness::defaults::MOCK_TEMP_ID;
use crate::harness::identity::{TEMP_TOKEN, USER_TOKEN};
use crate::harness::model::FIND_ONE;
use crate::harness::{Behavior, Harness};
use crate::router::build_router;
use crate::test_utils::fixtures::{signup_payload, stored_user, FIXTURE_USER_ID};

/// A router wired to its own harness
pub struct TestApp {
    pub harness: Harness,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let harness = Harness::new();
        let router = build_router(harness.install());
        Self { harness, router }
    }

    /// Send one request and decode the JSON response body
    ///
    /// An empty body decodes to `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    pub async fn post_json(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, path, token, Some(body)).await
    }

    pub async fn post_empty(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::POST, path, token, None).await
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, path, token, None).await
    }

    /// Sign up, make the user findable for login, then log in
    ///
    /// The next token verification maps `valid-user-token` to the fixture
    /// user. Returns the token protected requests should carry together with
    /// the login response body.
    pub async fn create_user_and_login(&self, overrides: Value) -> (&'static str, Value) {
        let payload = signup_payload(overrides);
        self.post_json("/user/signUp", None, payload.clone()).await;

        self.harness.override_op(
            Entity::User,
            FIND_ONE,
            Behavior::resolves(stored_user(&payload)),
        );

        self.harness.identity().verify_once(|token| match token {
            USER_TOKEN => Ok(IdentityPayload::user(FIXTURE_USER_ID)),
            TEMP_TOKEN => Ok(IdentityPayload::user(MOCK_TEMP_ID)),
            other => Err(HarnessError::InvalidToken(other.to_string())),
        });

        let (_, login) = self
            .post_json(
                "/user/login",
                None,
                json!({ "userName": payload["userName"], "password": payload["password"] }),
            )
            .await;

        (USER_TOKEN, login)
    }
}
