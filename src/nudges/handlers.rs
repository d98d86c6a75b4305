use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    error::{AppError, AppResult},
    nudges::{
        dto::{NudgesResponse, RespondRequest, TriggerNudgeRequest},
        repo,
        repo_types::NudgeRecord,
        services::{trigger, unread_count},
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/nudges", get(list_nudges).post(trigger_nudge))
        .route("/nudges/:id/read", post(mark_read))
        .route("/nudges/:id/respond", post(respond))
}

#[instrument(skip(state))]
pub async fn list_nudges(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<NudgesResponse>> {
    let nudges = repo::list(&state, auth.id).await?;
    let unread = unread_count(&nudges);
    Ok(Json(NudgesResponse { nudges, unread }))
}

#[instrument(skip(state, body))]
pub async fn trigger_nudge(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<TriggerNudgeRequest>,
) -> AppResult<(StatusCode, Json<NudgeRecord>)> {
    let nudge = trigger(&state, auth.id, body.kind).await?;
    Ok((StatusCode::CREATED, Json(nudge)))
}

#[instrument(skip(state))]
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NudgeRecord>> {
    repo::mark_read(&state, auth.id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Nudge"))
}

#[instrument(skip(state, body))]
pub async fn respond(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RespondRequest>,
) -> AppResult<Json<NudgeRecord>> {
    repo::respond(&state, auth.id, id, body.response)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Nudge"))
}
