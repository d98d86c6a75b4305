use time::Duration;
use uuid::Uuid;

use crate::kv;
use crate::meals::repo_types::{EatingReason, InputMethod, MealRecord, Mood, Pace};
use crate::state::AppState;

fn key(user_id: Uuid) -> String {
    format!("mindbite_meals:{user_id}")
}

fn seed(state: &AppState, user_id: Uuid) -> Vec<MealRecord> {
    if !state.config.seed_demo_data {
        return Vec::new();
    }
    let now = state.now();
    let sample = |n: u128,
                  items: &[&str],
                  (calories, protein, carbs, fat): (u32, u32, u32, u32),
                  eating_reason: EatingReason,
                  pace: Pace,
                  mood_after: Mood,
                  hours_ago: i64| MealRecord {
        id: Uuid::from_u128(0x6d00 + n),
        user_id,
        food_items: items.iter().map(|s| s.to_string()).collect(),
        calories,
        protein,
        carbs,
        fat,
        eating_reason,
        pace,
        mood_after,
        timestamp: now - Duration::hours(hours_ago),
        image_url: None,
        method: InputMethod::Manual,
    };
    vec![
        sample(
            1,
            &["Dal Tadka", "Brown Rice", "Roti"],
            (420, 18, 65, 8),
            EatingReason::Hunger,
            Pace::Normal,
            Mood::Great,
            4,
        ),
        sample(
            2,
            &["Masala Chai", "Marie Biscuits"],
            (180, 3, 30, 5),
            EatingReason::Habit,
            Pace::Rushed,
            Mood::Okay,
            8,
        ),
        sample(
            3,
            &["Poha", "Banana", "Coconut Water"],
            (320, 7, 58, 6),
            EatingReason::Hunger,
            Pace::Slow,
            Mood::Great,
            12,
        ),
    ]
}

/// All meals for a user, newest first.
pub async fn list_by_user(state: &AppState, user_id: Uuid) -> anyhow::Result<Vec<MealRecord>> {
    Ok(kv::get_json(state.store.as_ref(), &key(user_id))
        .await?
        .unwrap_or_else(|| seed(state, user_id)))
}

/// Prepends `meal`; returns how many meals the user had before it.
pub async fn insert(state: &AppState, meal: MealRecord) -> anyhow::Result<usize> {
    let user_id = meal.user_id;
    kv::update_json(
        state.store.as_ref(),
        &key(user_id),
        || seed(state, user_id),
        move |meals: &mut Vec<MealRecord>| {
            let before = meals.len();
            meals.insert(0, meal);
            before
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn meal(user_id: Uuid, calories: u32) -> MealRecord {
        MealRecord {
            id: Uuid::new_v4(),
            user_id,
            food_items: vec!["Idli".into()],
            calories,
            protein: 2,
            carbs: 8,
            fat: 0,
            eating_reason: EatingReason::Hunger,
            pace: Pace::Slow,
            mood_after: Mood::Great,
            timestamp: datetime!(2024-03-10 06:00 UTC),
            image_url: None,
            method: InputMethod::Manual,
        }
    }

    #[tokio::test]
    async fn insert_keeps_newest_first() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        assert_eq!(insert(&state, meal(user, 100)).await.unwrap(), 0);
        assert_eq!(insert(&state, meal(user, 200)).await.unwrap(), 1);
        let cals: Vec<_> = list_by_user(&state, user)
            .await
            .unwrap()
            .iter()
            .map(|m| m.calories)
            .collect();
        assert_eq!(cals, vec![200, 100]);
    }

    #[tokio::test]
    async fn seeded_user_sees_sample_meals() {
        let state = AppState::fake_at(datetime!(2024-03-10 06:30 UTC), true);
        let user = Uuid::new_v4();
        let meals = list_by_user(&state, user).await.unwrap();
        assert_eq!(meals.len(), 3);
        assert!(meals.iter().all(|m| m.user_id == user));
        assert_eq!(meals[0].timestamp, datetime!(2024-03-10 02:30 UTC));
        assert_eq!(insert(&state, meal(user, 90)).await.unwrap(), 3);
    }
}
