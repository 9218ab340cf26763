use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::models::meal::{Meal, MealType};
use super::DatabaseError;

const MEAL_COLUMNS: &str =
    "id, name, description, is_diet, calories, meal_type, user_id, created_at, updated_at";

/// Fields accepted when logging a meal.
#[derive(Debug)]
pub struct NewMeal {
    pub name: String,
    pub description: String,
    pub is_diet: bool,
    pub calories: f64,
    pub meal_type: MealType,
    pub user_id: Uuid,
}

/// Partial update for an existing meal. `None` fields keep the stored value.
#[derive(Debug, Default)]
pub struct MealChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_diet: Option<bool>,
    pub calories: Option<f64>,
    pub meal_type: Option<MealType>,
}

/// CRUD access to the `diet` table, always scoped to one user.
pub struct MealStore {
    pool: SqlitePool,
}

impl MealStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's meals in insertion order. The streak computation depends
    /// on this ordering; rowid breaks created_at ties.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Meal>, DatabaseError> {
        let meals = sqlx::query_as::<_, Meal>(&format!(
            "SELECT {MEAL_COLUMNS} FROM diet WHERE user_id = $1 ORDER BY created_at, rowid",
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(meals)
    }

    pub async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Meal>, DatabaseError> {
        let meal = sqlx::query_as::<_, Meal>(&format!(
            "SELECT {MEAL_COLUMNS} FROM diet WHERE id = $1 AND user_id = $2",
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(meal)
    }

    pub async fn create(&self, new_meal: NewMeal) -> Result<Meal, DatabaseError> {
        let meal = Meal {
            id: Uuid::new_v4(),
            name: new_meal.name,
            description: new_meal.description,
            is_diet: new_meal.is_diet,
            calories: new_meal.calories,
            meal_type: new_meal.meal_type,
            user_id: new_meal.user_id,
            created_at: Utc::now(),
            updated_at: None,
        };

        sqlx::query(
            "INSERT INTO diet (id, name, description, is_diet, calories, meal_type, user_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(meal.id)
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.is_diet)
        .bind(meal.calories)
        .bind(meal.meal_type)
        .bind(meal.user_id)
        .bind(meal.created_at)
        .execute(&self.pool)
        .await?;

        Ok(meal)
    }

    /// Apply a partial update and stamp `updated_at`. Returns false when the
    /// meal does not exist for this user.
    pub async fn update_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: MealChanges,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE diet SET \
                name = COALESCE($1, name), \
                description = COALESCE($2, description), \
                is_diet = COALESCE($3, is_diet), \
                calories = COALESCE($4, calories), \
                meal_type = COALESCE($5, meal_type), \
                updated_at = $6 \
             WHERE id = $7 AND user_id = $8",
        )
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.is_diet)
        .bind(changes.calories)
        .bind(changes.meal_type)
        .bind(Utc::now())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM diet WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
