//! Aggregate statistics over a user's meal history.
//!
//! This is the only computational piece of the service: everything else is
//! route glue over the store. The input slice must already be in insertion
//! (chronological) order, since `best_sequence` is defined as the longest
//! contiguous run of diet-compliant meals in that order.

use serde::Serialize;

use crate::database::models::meal::Meal;

/// Summary returned by `GET /meals/metrics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MealMetrics {
    pub quantity: u64,
    pub meals_on_diet: u64,
    pub meals_not_on_diet: u64,
    pub best_sequence: u64,
    pub total_calories: f64,
    pub calories_on_diet: f64,
    pub calories_off_diet: f64,
}

/// Compute the meal summary in a single pass.
///
/// An empty input yields the all-zero summary rather than an error. The run
/// counters are plain locals threaded through the loop; the final `max` after
/// the loop covers a streak that extends to the end of the list.
pub fn compute_metrics(meals: &[Meal]) -> MealMetrics {
    let mut metrics = MealMetrics::default();
    let mut current_run: u64 = 0;
    let mut best_run: u64 = 0;

    for meal in meals {
        metrics.quantity += 1;
        metrics.total_calories += meal.calories;

        if meal.is_diet {
            metrics.meals_on_diet += 1;
            metrics.calories_on_diet += meal.calories;
            current_run += 1;
        } else {
            best_run = best_run.max(current_run);
            current_run = 0;
        }
    }

    metrics.best_sequence = best_run.max(current_run);
    metrics.meals_not_on_diet = metrics.quantity - metrics.meals_on_diet;
    metrics.calories_off_diet = metrics.total_calories - metrics.calories_on_diet;
    metrics
}
