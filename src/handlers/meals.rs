use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::meals::{MealChanges, MealStore, NewMeal};
use crate::database::models::meal::MealType;
use crate::error::ApiError;
use crate::metrics::{compute_metrics, MealMetrics};
use crate::middleware::{ApiResponse, ApiResult, SessionUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    pub description: String,
    pub is_diet: bool,
    pub calories: f64,
    pub meal_type: MealType,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMealRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_diet: Option<bool>,
    pub calories: Option<f64>,
    pub meal_type: Option<MealType>,
}

/// GET /meals - List the session user's meals in insertion order
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Value> {
    let meals = MealStore::new(state.pool.clone())
        .list_for_user(session.user_id)
        .await?;
    Ok(ApiResponse::success(json!({ "meals": meals })))
}

/// GET /meals/metrics - Aggregate summary over the session user's meals
///
/// An empty meal list is a valid input and yields the all-zero summary.
pub async fn metrics(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<MealMetrics> {
    let meals = MealStore::new(state.pool.clone())
        .list_for_user(session.user_id)
        .await?;
    Ok(ApiResponse::success(compute_metrics(&meals)))
}

/// GET /meals/:id - Fetch one meal, scoped to the session user
pub async fn get(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    let meal = MealStore::new(state.pool.clone())
        .find_for_user(id, session.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Meal {id} not found")))?;

    Ok(ApiResponse::success(json!({ "meal": meal })))
}

/// POST /meals - Log a meal for the session user
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Json(payload): Json<CreateMealRequest>,
) -> ApiResult<Value> {
    validate_calories(payload.calories)?;

    let meal = MealStore::new(state.pool.clone())
        .create(NewMeal {
            name: payload.name,
            description: payload.description,
            is_diet: payload.is_diet,
            calories: payload.calories,
            meal_type: payload.meal_type,
            user_id: session.user_id,
        })
        .await?;

    tracing::info!("User {} logged meal {}", session.user_id, meal.id);
    Ok(ApiResponse::created(json!({ "meal": meal })))
}

/// PUT /meals/:id - Partially update a meal and stamp updated_at
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMealRequest>,
) -> ApiResult<()> {
    if let Some(calories) = payload.calories {
        validate_calories(calories)?;
    }

    let updated = MealStore::new(state.pool.clone())
        .update_for_user(
            id,
            session.user_id,
            MealChanges {
                name: payload.name,
                description: payload.description,
                is_diet: payload.is_diet,
                calories: payload.calories,
                meal_type: payload.meal_type,
            },
        )
        .await?;

    if !updated {
        return Err(ApiError::not_found(format!("Meal {id} not found")));
    }
    Ok(ApiResponse::<()>::no_content())
}

/// DELETE /meals/:id - Remove a meal
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    let deleted = MealStore::new(state.pool.clone())
        .delete_for_user(id, session.user_id)
        .await?;

    if !deleted {
        return Err(ApiError::not_found(format!("Meal {id} not found")));
    }
    Ok(ApiResponse::<()>::no_content())
}

fn validate_calories(calories: f64) -> Result<(), ApiError> {
    if !calories.is_finite() || calories < 0.0 {
        return Err(ApiError::bad_request("calories must be a non-negative number"));
    }
    Ok(())
}
