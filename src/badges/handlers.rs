use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{
    auth::services::AuthUser,
    badges::{
        catalogue::{BadgeTemplate, ALL_BADGES, TOTAL_BADGES},
        repo,
        repo_types::BadgeRecord,
    },
    error::AppResult,
    insights::aggregate::{badge_progress, BadgeProgress},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct CatalogueEntry {
    #[serde(flatten)]
    pub badge: BadgeTemplate,
    pub earned: bool,
}

#[derive(Debug, Serialize)]
pub struct BadgesResponse {
    pub earned: Vec<BadgeRecord>,
    pub catalogue: Vec<CatalogueEntry>,
    pub progress: BadgeProgress,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/badges", get(list_badges))
}

#[instrument(skip(state))]
pub async fn list_badges(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<BadgesResponse>> {
    let earned = repo::list(&state, auth.id).await?;
    let catalogue = ALL_BADGES
        .iter()
        .map(|b| CatalogueEntry {
            badge: *b,
            earned: earned.iter().any(|e| e.name == b.name),
        })
        .collect();
    let progress = badge_progress(earned.len(), TOTAL_BADGES);
    Ok(Json(BadgesResponse {
        earned,
        catalogue,
        progress,
    }))
}
