use tracing::info;
use uuid::Uuid;

use crate::badges::{catalogue, repo as badges_repo};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::wellness::{
    dto::{JournalRequest, WaterResponse},
    repo,
    repo_types::{MoodJournal, WATER_GOAL},
};

pub async fn drink_glass(state: &AppState, user_id: Uuid) -> AppResult<WaterResponse> {
    let glasses = repo::add_glass(state, user_id).await?;
    let mut badges_earned = Vec::new();
    if glasses >= WATER_GOAL {
        if let Some(t) = catalogue::find("hydration") {
            if let Some(b) = badges_repo::award(state, user_id, t).await? {
                badges_earned.push(b.name);
            }
        }
    }
    info!(%user_id, glasses, "water logged");
    Ok(WaterResponse {
        glasses,
        goal: WATER_GOAL,
        goal_met: glasses >= WATER_GOAL,
        badges_earned,
    })
}

pub async fn write_journal(
    state: &AppState,
    user_id: Uuid,
    req: JournalRequest,
) -> AppResult<MoodJournal> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::validation("Write a few words about how you feel"));
    }
    if !(-1.0..=1.0).contains(&req.sentiment_score) {
        return Err(AppError::validation("Sentiment must be between -1 and 1"));
    }
    let entry = MoodJournal {
        id: Uuid::new_v4(),
        user_id,
        text: text.to_string(),
        sentiment_score: req.sentiment_score,
        emoji: req.emoji,
        timestamp: state.now(),
    };
    repo::add_journal(state, entry.clone()).await?;
    info!(%user_id, entry_id = %entry.id, "journal entry added");
    Ok(entry)
}
