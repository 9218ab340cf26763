use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::users::{NewUser, UserStore};
use crate::error::ApiError;
use crate::middleware::session::session_cookie;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// GET /users - List all accounts
pub async fn list(State(state): State<AppState>) -> ApiResult<Value> {
    let users = UserStore::new(state.pool.clone()).list().await?;
    Ok(ApiResponse::success(json!({ "users": users })))
}

/// POST /users - Register a new account
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<Value> {
    validate_non_empty(&[
        ("name", &payload.name),
        ("email", &payload.email),
        ("password", &payload.password),
    ])?;

    let store = UserStore::new(state.pool.clone());
    if store.find_by_email(&payload.email).await?.is_some() {
        return Err(ApiError::conflict("User already exists in database"));
    }

    let user = store
        .create(NewUser {
            name: payload.name,
            email: payload.email,
            password: hash_password(&payload.password),
        })
        .await?;

    tracing::info!("Registered user {}", user.id);
    Ok(ApiResponse::created(json!({ "user": user })))
}

/// POST /users/login - Verify credentials and hand out the session cookie
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let store = UserStore::new(state.pool.clone());

    let user = store
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if user.password != hash_password(&payload.password) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    tracing::info!("User {} logged in", user.id);
    let cookie = session_cookie(user.id);
    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::success(json!({ "user": user })),
    ))
}

/// PUT /users/:id - Update account name and/or email
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<()> {
    let updated = UserStore::new(state.pool.clone())
        .update(id, payload.name.as_deref(), payload.email.as_deref())
        .await?;

    if !updated {
        return Err(ApiError::not_found(format!("User {id} not found")));
    }
    Ok(ApiResponse::<()>::no_content())
}

/// DELETE /users/:id - Remove an account
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<()> {
    let deleted = UserStore::new(state.pool.clone()).delete(id).await?;

    if !deleted {
        return Err(ApiError::not_found(format!("User {id} not found")));
    }
    Ok(ApiResponse::<()>::no_content())
}

fn validate_non_empty(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();
    for (name, value) in fields {
        if value.trim().is_empty() {
            field_errors.insert((*name).to_string(), "This field is required".to_string());
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(
            "Missing required fields",
            Some(field_errors),
        ))
    }
}

fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}
