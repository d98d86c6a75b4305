use base64ct::{Base64, Encoding};
use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use crate::badges::{
    catalogue::{self, FIRST_BITE},
    repo as badges_repo,
};
use crate::error::{AppError, AppResult};
use crate::meals::{
    dto::{CreateMealRequest, PhotoRequest},
    nutrition::estimate_nutrition,
    repo,
    repo_types::{MealRecord, Pace},
};
use crate::state::AppState;
use crate::storage::extension_for;

/// Items reported for every uploaded photo until real recognition exists.
pub const DETECTED_ITEMS: [&str; 3] = ["Detected Food Item", "Rice Bowl", "Dal"];

const SLOW_MEALS_FOR_BADGE: usize = 5;

pub async fn log_meal(
    state: &AppState,
    user_id: Uuid,
    req: CreateMealRequest,
) -> AppResult<(MealRecord, Vec<String>)> {
    let food_items: Vec<String> = req
        .food_items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if food_items.is_empty() {
        return Err(AppError::validation("Add at least one food item"));
    }
    if let Some(url) = req.image_url.as_deref() {
        if !owns_photo(user_id, url) {
            return Err(AppError::validation("Unknown photo reference"));
        }
    }

    let totals = estimate_nutrition(&food_items);
    state.simulate_latency().await;

    let meal = MealRecord {
        id: Uuid::new_v4(),
        user_id,
        food_items,
        calories: totals.calories,
        protein: totals.protein,
        carbs: totals.carbs,
        fat: totals.fat,
        eating_reason: req.eating_reason,
        pace: req.pace,
        mood_after: req.mood_after,
        timestamp: state.now(),
        image_url: req.image_url,
        method: req.method,
    };
    let before = repo::insert(state, meal.clone()).await?;
    info!(%user_id, meal_id = %meal.id, calories = meal.calories, "meal logged");

    let mut earned = Vec::new();
    if before == 0 {
        if let Some(b) = badges_repo::award(state, user_id, &FIRST_BITE).await? {
            earned.push(b.name);
        }
    }
    if meal.eating_reason.is_emotional() {
        if let Some(t) = catalogue::find("emotional_aware") {
            if let Some(b) = badges_repo::award(state, user_id, t).await? {
                earned.push(b.name);
            }
        }
    }
    if meal.pace == Pace::Slow {
        let slow = repo::list_by_user(state, user_id)
            .await?
            .iter()
            .filter(|m| m.pace == Pace::Slow)
            .count();
        if slow >= SLOW_MEALS_FOR_BADGE {
            if let Some(t) = catalogue::find("slow_eater") {
                if let Some(b) = badges_repo::award(state, user_id, t).await? {
                    earned.push(b.name);
                }
            }
        }
    }
    Ok((meal, earned))
}

/// Splits an optional `data:<mime>;base64,` prefix from the payload.
fn split_data_url(image: &str) -> (Option<&str>, &str) {
    match image.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        Some((meta, payload)) => (meta.strip_suffix(";base64"), payload),
        None => (None, image),
    }
}

pub async fn store_photo(
    state: &AppState,
    user_id: Uuid,
    req: PhotoRequest,
) -> AppResult<(String, Vec<String>)> {
    let (mime, payload) = split_data_url(req.image.trim());
    let content_type = req
        .content_type
        .as_deref()
        .or(mime)
        .unwrap_or("image/jpeg")
        .to_string();
    let body = Base64::decode_vec(payload.trim())
        .map_err(|_| AppError::validation("invalid base64 image"))?;
    if body.is_empty() {
        return Err(AppError::validation("image is empty"));
    }

    let key = format!("{user_id}/{}.{}", Uuid::new_v4(), extension_for(&content_type));
    let size = body.len();
    state
        .images
        .put_object(&key, Bytes::from(body), &content_type)
        .await?;
    debug!(%user_id, %key, size, "photo stored");

    state.simulate_latency().await;
    let image_url = format!("images/{key}");
    Ok((image_url, DETECTED_ITEMS.iter().map(|s| s.to_string()).collect()))
}

/// Maps an `images/...` reference back to its storage key.
pub fn image_key(image_url: &str) -> Option<&str> {
    image_url.strip_prefix("images/")
}

/// True when `image_url` points at a blob stored under `user_id`.
pub fn owns_photo(user_id: Uuid, image_url: &str) -> bool {
    let prefix = format!("{user_id}/");
    image_key(image_url)
        .and_then(|key| key.strip_prefix(prefix.as_str()))
        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
}
