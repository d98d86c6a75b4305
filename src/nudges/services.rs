use rand::seq::SliceRandom;
use tracing::info;
use uuid::Uuid;

use crate::nudges::{
    repo,
    repo_types::{NudgeRecord, NudgeType},
};
use crate::state::AppState;

pub const SAMPLE_NUDGES: [&str; 8] = [
    "⏰ It's been 4+ hours since your last meal. Are you hungry or just habitual? Check in with your body first.",
    "💧 Hydration check! Your brain is 73% water. Drink a glass before your next meal.",
    "🔮 Based on your patterns, you may experience cravings in the next hour. Prepare a healthy snack now!",
    "🔥 5-day streak alert! You've been logging consistently. Today's choices matter even more.",
    "💡 Eating at the same times daily regulates your hunger hormones. Your body loves routine!",
    "🧘 Before your next meal, take 3 deep breaths. Mindful eating starts before the first bite.",
    "🌙 Late night eating? Studies show meals 3+ hours before bed improve sleep quality.",
    "🥗 Your emotional eating score improved by 15% this week. You're building awareness!",
];

/// Delivers a nudge of `kind` carrying a random sample message.
pub async fn trigger(
    state: &AppState,
    user_id: Uuid,
    kind: NudgeType,
) -> anyhow::Result<NudgeRecord> {
    let message = SAMPLE_NUDGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SAMPLE_NUDGES[0]);
    let nudge = NudgeRecord {
        id: Uuid::new_v4(),
        kind,
        message: message.into(),
        delivered_at: state.now(),
        response: None,
        read: false,
    };
    repo::add(state, user_id, nudge.clone()).await?;
    info!(%user_id, nudge_id = %nudge.id, label = kind.label(), "nudge delivered");
    Ok(nudge)
}

pub fn unread_count(nudges: &[NudgeRecord]) -> usize {
    nudges.iter().filter(|n| !n.read).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn triggered_nudge_is_unread_and_first() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        trigger(&state, user, NudgeType::Time).await.unwrap();
        let nudge = trigger(&state, user, NudgeType::Hydration).await.unwrap();
        assert!(SAMPLE_NUDGES.contains(&nudge.message.as_str()));

        let all = repo::list(&state, user).await.unwrap();
        assert_eq!(all[0].id, nudge.id);
        assert_eq!(all[0].delivered_at, state.now());
        assert_eq!(unread_count(&all), 2);
    }
}
