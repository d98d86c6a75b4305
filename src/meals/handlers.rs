use axum::{
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    error::{AppError, AppResult},
    meals::{
        dto::{
            CreateMealRequest, CreatedMealResponse, EstimateRequest, EstimateResponse,
            FoodItemsResponse, Pagination, PhotoRequest, PhotoResponse, VoiceRequest,
        },
        nutrition::{estimate_nutrition, lookup},
        repo,
        repo_types::MealRecord,
        services::{image_key, log_meal, owns_photo, store_photo},
        voice::parse_transcript,
    },
    state::AppState,
    storage::content_type_for,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/:id/photo", get(get_photo))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal))
        .route("/meals/estimate", post(estimate))
        .route("/meals/voice", post(voice))
        .route("/meals/photo", post(photo))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(p): Query<Pagination>,
) -> AppResult<Json<Vec<MealRecord>>> {
    let meals = repo::list_by_user(&state, auth.id)
        .await?
        .into_iter()
        .skip(p.offset)
        .take(p.limit)
        .collect();
    Ok(Json(meals))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateMealRequest>,
) -> AppResult<(StatusCode, Json<CreatedMealResponse>)> {
    let (meal, badges_earned) = log_meal(&state, auth.id, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedMealResponse {
            meal,
            badges_earned,
        }),
    ))
}

#[instrument(skip(state, body))]
pub async fn estimate(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<EstimateRequest>,
) -> AppResult<Json<EstimateResponse>> {
    state.simulate_latency().await;
    let matched = body
        .food_items
        .iter()
        .map(|item| lookup(item).map(|(key, _)| key))
        .collect();
    Ok(Json(EstimateResponse {
        totals: estimate_nutrition(&body.food_items),
        matched,
    }))
}

#[instrument(skip(state, body))]
pub async fn voice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<VoiceRequest>,
) -> AppResult<Json<FoodItemsResponse>> {
    if body.transcript.trim().is_empty() {
        return Err(AppError::validation("Transcript is empty"));
    }
    state.simulate_latency().await;
    Ok(Json(FoodItemsResponse {
        food_items: parse_transcript(&body.transcript),
    }))
}

#[instrument(skip(state, body))]
pub async fn photo(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<PhotoRequest>,
) -> AppResult<Json<PhotoResponse>> {
    let (image_url, food_items) = store_photo(&state, auth.id, body).await?;
    Ok(Json(PhotoResponse {
        image_url,
        food_items,
    }))
}

/// Serves the photo attached to one of the caller's meals.
#[instrument(skip(state))]
pub async fn get_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let meal = repo::list_by_user(&state, auth.id)
        .await?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or(AppError::NotFound("Meal"))?;
    let key = meal
        .image_url
        .as_deref()
        .filter(|url| owns_photo(auth.id, url))
        .and_then(image_key)
        .ok_or(AppError::NotFound("Photo"))?
        .to_string();
    let body = state
        .images
        .get_object(&key)
        .await?
        .ok_or(AppError::NotFound("Photo"))?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&key))], body))
}
