use time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::badges::{
    catalogue::{BadgeTemplate, FIRST_BITE, MINDFUL_STARTER},
    repo_types::BadgeRecord,
};
use crate::kv;
use crate::state::AppState;

fn key(user_id: Uuid) -> String {
    format!("mindbite_badges:{user_id}")
}

fn seed(state: &AppState) -> Vec<BadgeRecord> {
    if !state.config.seed_demo_data {
        return Vec::new();
    }
    let now = state.now();
    vec![
        BadgeRecord {
            id: Uuid::from_u128(0xb1),
            ..FIRST_BITE.earn(now - Duration::days(1))
        },
        BadgeRecord {
            id: Uuid::from_u128(0xb2),
            ..MINDFUL_STARTER.earn(now - Duration::days(1))
        },
    ]
}

pub async fn list(state: &AppState, user_id: Uuid) -> anyhow::Result<Vec<BadgeRecord>> {
    Ok(kv::get_json(state.store.as_ref(), &key(user_id))
        .await?
        .unwrap_or_else(|| seed(state)))
}

/// Earns `template` unless a badge with the same name is already held.
pub async fn award(
    state: &AppState,
    user_id: Uuid,
    template: &BadgeTemplate,
) -> anyhow::Result<Option<BadgeRecord>> {
    let now = state.now();
    let awarded = kv::update_json(
        state.store.as_ref(),
        &key(user_id),
        || seed(state),
        |badges: &mut Vec<BadgeRecord>| {
            if badges.iter().any(|b| b.name == template.name) {
                return None;
            }
            let badge = template.earn(now);
            badges.push(badge.clone());
            Some(badge)
        },
    )
    .await?;
    if let Some(b) = &awarded {
        info!(%user_id, badge = %b.name, "badge earned");
    }
    Ok(awarded)
}
