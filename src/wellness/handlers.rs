use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::services::AuthUser,
    error::AppResult,
    state::AppState,
    wellness::{
        dto::{JournalRequest, WaterResponse},
        repo,
        repo_types::MoodJournal,
        services::{drink_glass, write_journal},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/water", post(add_water))
        .route("/journal", get(list_journal).post(add_journal))
}

#[instrument(skip(state))]
pub async fn add_water(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<WaterResponse>> {
    Ok(Json(drink_glass(&state, auth.id).await?))
}

#[instrument(skip(state))]
pub async fn list_journal(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<MoodJournal>>> {
    Ok(Json(repo::journal(&state, auth.id).await?))
}

#[instrument(skip(state, body))]
pub async fn add_journal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<JournalRequest>,
) -> AppResult<(StatusCode, Json<MoodJournal>)> {
    let entry = write_journal(&state, auth.id, body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[cfg(test)]
mod tests {
    use crate::app::build_app;
    use crate::state::AppState;
    use crate::test_support::{call, signup};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn water_and_journal_round_through_http() {
        let app = build_app(AppState::fake());
        let token = signup(&app, "Zoya", "zoya@x.io").await;

        let (status, water) = call(&app, Method::POST, "/api/v1/water", Some(&token), json!(null)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(water["glasses"], 1);
        assert_eq!(water["goal"], 8);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/journal",
            Some(&token),
            json!({"text": "Felt calm after lunch", "sentiment_score": 0.5}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, entries) = call(&app, Method::GET, "/api/v1/journal", Some(&token), json!(null)).await;
        assert_eq!(entries[0]["text"], "Felt calm after lunch");
        assert_eq!(entries[0]["emoji"], "😐");
    }
}
