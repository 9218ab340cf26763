//! Shared helpers for driving the router in-process against a fresh
//! in-memory database, without binding a socket.

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde::Serialize;
use serde_json::{json, Value};
use tower::ServiceExt;

use daily_diet_api::{app, database, state::AppState};

/// Build the application over its own isolated in-memory database.
pub async fn test_app() -> Result<Router> {
    let pool = database::connect("sqlite::memory:")
        .await
        .context("failed to open in-memory database")?;
    Ok(app(AppState::new(pool)))
}

/// Builder for requests against the test router.
pub struct TestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl TestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    #[allow(dead_code)]
    pub fn put(uri: &str) -> Self {
        Self::new(Method::PUT, uri)
    }

    #[allow(dead_code)]
    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    /// Attach a raw Cookie header, e.g. `userId=<uuid>`.
    pub fn cookie(mut self, cookie: &str) -> Self {
        self.headers
            .push((header::COOKIE.as_str().to_owned(), cookie.to_owned()));
        self
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = Some(serde_json::to_string(data).expect("failed to serialize JSON"));
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    pub async fn send(self, app: &Router) -> Result<TestResponse> {
        let mut builder = Request::builder().method(self.method).uri(&self.uri);
        for (key, value) in &self.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        let request = builder.body(match self.body {
            Some(body) => Body::from(body),
            None => Body::empty(),
        })?;

        let response = app.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await?.to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not valid JSON")?
        };

        Ok(TestResponse {
            status,
            headers,
            body,
        })
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Register an account and return its id plus the pseudo-session cookie
/// (the cookie value is just the user id).
#[allow(dead_code)]
pub async fn register_user(app: &Router, name: &str, email: &str) -> Result<(String, String)> {
    let response = TestRequest::post("/users")
        .json(&json!({ "name": name, "email": email, "password": "s3cret" }))
        .send(app)
        .await?;
    anyhow::ensure!(
        response.status == StatusCode::CREATED,
        "user registration failed: {} {}",
        response.status,
        response.body
    );

    let id = response.body["data"]["user"]["id"]
        .as_str()
        .context("registration response missing user id")?
        .to_owned();
    let cookie = format!("userId={id}");
    Ok((id, cookie))
}

/// Log a meal for the given session and return its id.
#[allow(dead_code)]
pub async fn create_meal(
    app: &Router,
    cookie: &str,
    name: &str,
    is_diet: bool,
    calories: f64,
) -> Result<String> {
    let response = TestRequest::post("/meals")
        .cookie(cookie)
        .json(&json!({
            "name": name,
            "description": "test meal",
            "is_diet": is_diet,
            "calories": calories,
            "meal_type": "Lunch",
        }))
        .send(app)
        .await?;
    anyhow::ensure!(
        response.status == StatusCode::CREATED,
        "meal creation failed: {} {}",
        response.status,
        response.body
    );

    Ok(response.body["data"]["meal"]["id"]
        .as_str()
        .context("meal response missing id")?
        .to_owned())
}
