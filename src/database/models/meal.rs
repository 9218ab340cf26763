use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A meal record from the `diet` table.
///
/// `is_diet` is a proper boolean here regardless of how sqlite stores it;
/// normalization happens in the sqlx decode, never in handler code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_diet: bool,
    pub calories: f64,
    pub meal_type: MealType,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Meal slot, stored as TEXT using the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}
