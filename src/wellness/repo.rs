use std::collections::BTreeMap;

use uuid::Uuid;

use crate::clock::local_date;
use crate::kv;
use crate::state::AppState;
use crate::wellness::repo_types::{MoodJournal, WaterLog, STREAK_TARGETS, WATER_GOAL};

fn water_key(user_id: Uuid) -> String {
    format!("mindbite_water:{user_id}")
}

fn streaks_key(user_id: Uuid) -> String {
    format!("mindbite_streaks:{user_id}")
}

fn moods_key(user_id: Uuid) -> String {
    format!("mindbite_moods:{user_id}")
}

pub type Streaks = BTreeMap<String, u32>;

fn default_streaks(state: &AppState) -> Streaks {
    if !state.config.seed_demo_data {
        return Streaks::new();
    }
    STREAK_TARGETS
        .iter()
        .zip([3, 5, 2])
        .map(|((name, _, _), days)| (name.to_string(), days))
        .collect()
}

pub async fn water_today(state: &AppState, user_id: Uuid) -> anyhow::Result<u8> {
    let today = local_date(state.now());
    let log: Option<WaterLog> = kv::get_json(state.store.as_ref(), &water_key(user_id)).await?;
    Ok(log.map_or(0, |l| l.glasses_on(today)))
}

/// Adds one glass, never past the daily goal. Returns the new count.
pub async fn add_glass(state: &AppState, user_id: Uuid) -> anyhow::Result<u8> {
    let today = local_date(state.now());
    kv::update_json(
        state.store.as_ref(),
        &water_key(user_id),
        || WaterLog {
            date: today,
            glasses: 0,
        },
        |log: &mut WaterLog| {
            let glasses = (log.glasses_on(today) + 1).min(WATER_GOAL);
            *log = WaterLog {
                date: today,
                glasses,
            };
            glasses
        },
    )
    .await
}

pub async fn streaks(state: &AppState, user_id: Uuid) -> anyhow::Result<Streaks> {
    Ok(kv::get_json(state.store.as_ref(), &streaks_key(user_id))
        .await?
        .unwrap_or_else(|| default_streaks(state)))
}

/// Journal entries, newest first.
pub async fn journal(state: &AppState, user_id: Uuid) -> anyhow::Result<Vec<MoodJournal>> {
    Ok(kv::get_json(state.store.as_ref(), &moods_key(user_id))
        .await?
        .unwrap_or_default())
}

pub async fn add_journal(state: &AppState, entry: MoodJournal) -> anyhow::Result<()> {
    let user_id = entry.user_id;
    kv::update_json(
        state.store.as_ref(),
        &moods_key(user_id),
        Vec::new,
        move |entries: &mut Vec<MoodJournal>| entries.insert(0, entry),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use std::sync::Arc;
    use time::macros::datetime;

    #[tokio::test]
    async fn water_is_capped_at_goal() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        for expected in 1..=WATER_GOAL {
            assert_eq!(add_glass(&state, user).await.unwrap(), expected);
        }
        assert_eq!(add_glass(&state, user).await.unwrap(), WATER_GOAL);
        assert_eq!(water_today(&state, user).await.unwrap(), WATER_GOAL);
    }

    #[tokio::test]
    async fn water_resets_on_the_next_local_day() {
        let mut state = AppState::fake_at(datetime!(2024-03-10 18:00 UTC), false);
        let user = Uuid::new_v4();
        add_glass(&state, user).await.unwrap();
        add_glass(&state, user).await.unwrap();

        // 18:30 UTC is already 00:00 on the 11th in IST.
        state.clock = Arc::new(FixedClock(datetime!(2024-03-10 18:30 UTC)));
        assert_eq!(water_today(&state, user).await.unwrap(), 0);
        assert_eq!(add_glass(&state, user).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn streaks_default_only_when_seeding() {
        let seeded = AppState::fake_at(datetime!(2024-03-10 06:30 UTC), true);
        let s = streaks(&seeded, Uuid::new_v4()).await.unwrap();
        assert_eq!(s.get("mindful"), Some(&3));
        assert_eq!(s.get("logging"), Some(&5));
        assert_eq!(s.get("hydration"), Some(&2));
        assert!(streaks(&AppState::fake(), Uuid::new_v4()).await.unwrap().is_empty());
    }
}
