use time::Duration;
use uuid::Uuid;

use crate::kv;
use crate::nudges::repo_types::{NudgeRecord, NudgeResponse, NudgeType};
use crate::state::AppState;

fn key(user_id: Uuid) -> String {
    format!("mindbite_nudges:{user_id}")
}

fn seed(state: &AppState) -> Vec<NudgeRecord> {
    if !state.config.seed_demo_data {
        return Vec::new();
    }
    let now = state.now();
    let sample = |n: u128, kind: NudgeType, message: &str, hours_ago: i64, read: bool| NudgeRecord {
        id: Uuid::from_u128(0x6e00 + n),
        kind,
        message: message.into(),
        delivered_at: now - Duration::hours(hours_ago),
        response: None,
        read,
    };
    vec![
        sample(
            1,
            NudgeType::Craving,
            "🔮 High craving risk detected for 3–4 PM today. Try drinking 500ml water first!",
            0,
            false,
        ),
        sample(
            2,
            NudgeType::Streak,
            "🔥 You've been mindful for 3 days! Don't break the streak — you're doing amazing.",
            1,
            false,
        ),
        sample(
            3,
            NudgeType::Hydration,
            "💧 Hydration check! You haven't logged water in 2 hours. Thirst often masks as hunger.",
            2,
            true,
        ),
    ]
}

/// Newest first.
pub async fn list(state: &AppState, user_id: Uuid) -> anyhow::Result<Vec<NudgeRecord>> {
    Ok(kv::get_json(state.store.as_ref(), &key(user_id))
        .await?
        .unwrap_or_else(|| seed(state)))
}

pub async fn add(state: &AppState, user_id: Uuid, nudge: NudgeRecord) -> anyhow::Result<()> {
    kv::update_json(
        state.store.as_ref(),
        &key(user_id),
        || seed(state),
        move |nudges: &mut Vec<NudgeRecord>| nudges.insert(0, nudge),
    )
    .await
}

/// Applies `f` to the nudge with `id`; `None` when no such nudge exists.
/// A miss leaves the store untouched.
async fn modify<F>(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    f: F,
) -> anyhow::Result<Option<NudgeRecord>>
where
    F: FnOnce(&mut NudgeRecord) + Send,
{
    let store = state.store.as_ref();
    let doc_key = key(user_id);
    let _guard = store.write_lock().await;
    let mut nudges: Vec<NudgeRecord> = kv::get_json(store, &doc_key)
        .await?
        .unwrap_or_else(|| seed(state));
    let Some(nudge) = nudges.iter_mut().find(|n| n.id == id) else {
        return Ok(None);
    };
    f(nudge);
    let updated = nudge.clone();
    kv::set_json(store, &doc_key, &nudges).await?;
    Ok(Some(updated))
}

pub async fn mark_read(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
) -> anyhow::Result<Option<NudgeRecord>> {
    modify(state, user_id, id, |n| n.read = true).await
}

/// Records the response; a responded nudge is always read.
pub async fn respond(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    response: NudgeResponse,
) -> anyhow::Result<Option<NudgeRecord>> {
    modify(state, user_id, id, move |n| {
        n.response = Some(response);
        n.read = true;
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn seeded() -> AppState {
        AppState::fake_at(datetime!(2024-03-10 06:30 UTC), true)
    }

    #[tokio::test]
    async fn seed_has_two_unread_mock_nudges() {
        let state = seeded();
        let nudges = list(&state, Uuid::new_v4()).await.unwrap();
        assert_eq!(nudges.len(), 3);
        assert_eq!(nudges.iter().filter(|n| !n.read).count(), 2);
        assert_eq!(nudges[0].kind, NudgeType::Craving);
    }

    #[tokio::test]
    async fn respond_marks_read_and_persists() {
        let state = seeded();
        let user = Uuid::new_v4();
        let id = Uuid::from_u128(0x6e01);
        let updated = respond(&state, user, id, NudgeResponse::Accepted)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.read);
        assert_eq!(updated.response, Some(NudgeResponse::Accepted));

        let again = mark_read(&state, user, id).await.unwrap().unwrap();
        assert!(again.read);
        assert_eq!(list(&state, user).await.unwrap()[0].response, Some(NudgeResponse::Accepted));
    }

    #[tokio::test]
    async fn unknown_nudge_is_none() {
        let state = AppState::fake();
        assert!(mark_read(&state, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn unknown_nudge_does_not_persist_the_seed() {
        let state = seeded();
        let user = Uuid::new_v4();
        assert!(respond(&state, user, Uuid::new_v4(), NudgeResponse::Dismissed)
            .await
            .unwrap()
            .is_none());
        assert!(state.store.get(&key(user)).await.unwrap().is_none());

        mark_read(&state, user, Uuid::from_u128(0x6e02)).await.unwrap().unwrap();
        assert!(state.store.get(&key(user)).await.unwrap().is_some());
    }
}
