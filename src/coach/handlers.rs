use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    auth::services::AuthUser,
    clock::local_hour,
    coach::{
        dto::{CoachMessage, CoachMessageRequest},
        responder,
    },
    error::{AppError, AppResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/coach/messages", post(send_message))
        .route("/coach/greeting", get(opening_message))
}

#[instrument(skip(state, body))]
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CoachMessageRequest>,
) -> AppResult<Json<CoachMessage>> {
    if body.text.trim().is_empty() {
        return Err(AppError::validation("Message is empty"));
    }
    let user = auth.profile(&state).await?;
    state.simulate_latency().await;

    let hour = local_hour(state.now());
    let reply = responder::respond(&body.text, user.first_name(), user.discipline_score, hour);
    debug!(user_id = %auth.id, hour, "coach replied");
    Ok(Json(CoachMessage::coach(reply, state.local_now())))
}

#[instrument(skip(state))]
pub async fn opening_message(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<CoachMessage>> {
    let user = auth.profile(&state).await?;
    Ok(Json(CoachMessage::coach(
        responder::greeting(user.first_name()),
        state.local_now(),
    )))
}

#[cfg(test)]
mod tests {
    use crate::app::build_app;
    use crate::state::AppState;
    use crate::test_support::{call, signup};
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use time::macros::datetime;

    #[tokio::test]
    async fn coach_uses_first_name_and_local_hour() {
        // 17:00 UTC is 22:30 IST.
        let app = build_app(AppState::fake_at(datetime!(2024-03-10 17:00 UTC), false));
        let token = signup(&app, "Rohan Mehta", "rohan@x.io").await;

        let (status, reply) = call(
            &app,
            Method::POST,
            "/api/v1/coach/messages",
            Some(&token),
            json!({"text": "any ideas for breakfast?"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["role"], "coach");
        assert!(reply["content"].as_str().unwrap().starts_with("Late night"));

        let (_, hello) = call(&app, Method::GET, "/api/v1/coach/greeting", Some(&token), json!(null)).await;
        assert!(hello["content"].as_str().unwrap().starts_with("Hey Rohan! 👋"));
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let app = build_app(AppState::fake());
        let token = signup(&app, "Rohan", "rohan@x.io").await;
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/coach/messages",
            Some(&token),
            json!({"text": "   "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
