use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Streak,
    Mindful,
    Discipline,
    Social,
}

/// An earned badge. Never mutated or removed once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BadgeRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub emoji: String,
    #[serde(with = "time::serde::rfc3339")]
    pub earned_at: OffsetDateTime,
    pub category: BadgeCategory,
}
