use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::services::AuthUser,
    badges::{catalogue::TOTAL_BADGES, repo as badges_repo},
    clock::local_hour,
    error::AppResult,
    insights::{
        aggregate::{
            average_calories, badge_progress, distribution, emotional_eating_pct, greeting,
            pattern_insight, score_band, today_calories, today_meals, weekly_calories_by_day,
            weekly_meals,
        },
        dto::{DashboardResponse, InsightsResponse, StreakView, WaterSummary, WeeklySummary},
    },
    meals::repo as meals_repo,
    nudges::repo as nudges_repo,
    state::AppState,
    wellness::{
        repo::{self as wellness_repo, Streaks},
        repo_types::{STREAK_TARGETS, WATER_GOAL},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/insights", get(insights))
        .route("/dashboard", get(dashboard))
}

fn streak_views(streaks: &Streaks) -> Vec<StreakView> {
    STREAK_TARGETS
        .iter()
        .map(|&(name, label, target)| StreakView {
            name: name.to_string(),
            label,
            days: streaks.get(name).copied().unwrap_or(0),
            target,
        })
        .collect()
}

#[instrument(skip(state))]
pub async fn insights(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<InsightsResponse>> {
    let user = auth.profile(&state).await?;
    let now = state.now();
    let meals = meals_repo::list_by_user(&state, auth.id).await?;
    let badges = badges_repo::list(&state, auth.id).await?;
    let streaks = wellness_repo::streaks(&state, auth.id).await?;

    let weekly = weekly_meals(&meals, now);
    let emotional = emotional_eating_pct(&weekly);
    let summary = WeeklySummary {
        meals: weekly.len(),
        average_calories: average_calories(&weekly),
        emotional_eating_pct: emotional,
        calories_by_day: weekly_calories_by_day(&weekly, now),
        by_reason: distribution(&weekly, |m| m.eating_reason),
        by_mood: distribution(&weekly, |m| m.mood_after),
        by_pace: distribution(&weekly, |m| m.pace),
    };

    Ok(Json(InsightsResponse {
        score: user.discipline_score,
        score_band: score_band(user.discipline_score),
        weekly: summary,
        pattern_insight: pattern_insight(emotional),
        badges: badge_progress(badges.len(), TOTAL_BADGES),
        streaks: streak_views(&streaks),
    }))
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DashboardResponse>> {
    let user = auth.profile(&state).await?;
    let now = state.now();
    let meals = meals_repo::list_by_user(&state, auth.id).await?;
    let nudges = nudges_repo::list(&state, auth.id).await?;
    let badges = badges_repo::list(&state, auth.id).await?;
    let streaks = wellness_repo::streaks(&state, auth.id).await?;
    let glasses = wellness_repo::water_today(&state, auth.id).await?;

    Ok(Json(DashboardResponse {
        greeting: greeting(local_hour(now)),
        first_name: user.first_name().to_string(),
        local_time: state.local_now(),
        score: user.discipline_score,
        score_band: score_band(user.discipline_score),
        archetype: user.archetype,
        today_calories: today_calories(&meals, now),
        today_meals: today_meals(&meals, now).into_iter().cloned().collect(),
        water: WaterSummary {
            glasses,
            goal: WATER_GOAL,
        },
        streaks: streak_views(&streaks),
        unread_nudges: nudges.iter().filter(|n| !n.read).count(),
        latest_nudge: nudges.into_iter().find(|n| !n.read),
        badges_earned: badges.len(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::app::build_app;
    use crate::state::AppState;
    use crate::test_support::{call, signup};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use time::macros::datetime;

    fn seeded() -> AppState {
        AppState::fake_at(datetime!(2024-03-10 06:30 UTC), true)
    }

    #[tokio::test]
    async fn dashboard_summarises_seeded_day() {
        let app = build_app(seeded());
        let token = signup(&app, "Priya Sharma", "priya@x.io").await;

        let (status, body) = call(&app, Method::GET, "/api/v1/dashboard", Some(&token), json!(null)).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["greeting"], "Good afternoon");
        assert_eq!(body["first_name"], "Priya");
        assert_eq!(body["score"], 50);
        assert_eq!(body["score_band"], "medium");
        // 12:00 IST: the oldest sample meal lands exactly on local midnight.
        assert_eq!(body["today_calories"], 420 + 180 + 320);
        assert_eq!(body["today_meals"].as_array().unwrap().len(), 3);
        assert_eq!(body["unread_nudges"], 2);
        assert_eq!(body["latest_nudge"]["type"], "craving");
        assert_eq!(body["water"], json!({"glasses": 0, "goal": 8}));
        assert_eq!(body["streaks"][0]["days"], 3);
    }

    #[tokio::test]
    async fn insights_cover_the_trailing_week() {
        let app = build_app(seeded());
        let token = signup(&app, "Priya", "priya@x.io").await;

        let (status, body) = call(&app, Method::GET, "/api/v1/insights", Some(&token), json!(null)).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let weekly = &body["weekly"];
        assert_eq!(weekly["meals"], 3);
        assert_eq!(weekly["average_calories"], 307);
        assert_eq!(weekly["emotional_eating_pct"], 0);
        assert_eq!(weekly["by_reason"][0], json!({"key": "Hunger", "count": 2, "percent": 67}));
        assert_eq!(weekly["calories_by_day"][0]["calories"], 920);
        assert_eq!(weekly["calories_by_day"][6]["calories"], 0);
        assert_eq!(body["badges"]["earned"], 2);
        assert_eq!(body["badges"]["percent"], 17);
        assert!(body["pattern_insight"].as_str().unwrap().starts_with("Excellent! 100%"));
    }
}
