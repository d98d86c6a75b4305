use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::badges::repo_types::{BadgeCategory, BadgeRecord};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BadgeTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    pub category: BadgeCategory,
}

impl BadgeTemplate {
    pub fn earn(&self, at: OffsetDateTime) -> BadgeRecord {
        BadgeRecord {
            id: Uuid::new_v4(),
            name: self.name.into(),
            description: self.description.into(),
            emoji: self.emoji.into(),
            earned_at: at,
            category: self.category,
        }
    }
}

const fn badge(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    emoji: &'static str,
    category: BadgeCategory,
) -> BadgeTemplate {
    BadgeTemplate {
        id,
        name,
        description,
        emoji,
        category,
    }
}

pub const FIRST_BITE: BadgeTemplate = badge(
    "first_bite",
    "First Bite",
    "Logged your first meal",
    "🌱",
    BadgeCategory::Mindful,
);

/// Awarded on onboarding; sits outside the achievable catalogue.
pub const MINDFUL_STARTER: BadgeTemplate = badge(
    "mindful_starter",
    "Mindful Starter",
    "Completed onboarding & archetype quiz",
    "🧘",
    BadgeCategory::Discipline,
);

pub const ALL_BADGES: [BadgeTemplate; 12] = [
    FIRST_BITE,
    badge("mindful_3", "3-Day Mindful", "Mindful eating for 3 days", "🧘", BadgeCategory::Streak),
    badge("mindful_7", "7-Day Conscious", "One full week of mindful eating", "⭐", BadgeCategory::Streak),
    badge("hydration", "Hydration Hero", "8 glasses in a day", "💧", BadgeCategory::Mindful),
    badge("craving_crusher", "Craving Crusher", "Resisted 5 cravings", "🛡️", BadgeCategory::Discipline),
    badge("slow_eater", "Tortoise Mode", "Ate slowly 5 times", "🐢", BadgeCategory::Mindful),
    badge("score_70", "Discipline Champion", "Reached score of 70", "🏆", BadgeCategory::Discipline),
    badge("streak_10", "10-Day Warrior", "10-day logging streak", "🔥", BadgeCategory::Streak),
    badge("emotional_aware", "Emotional Aware", "Identified emotional eating", "💙", BadgeCategory::Mindful),
    badge("coach_chat", "Coach Connector", "Had 5 chats with Coach Byte", "🤝", BadgeCategory::Social),
    badge("variety", "Rainbow Eater", "Logged 5 different food types", "🌈", BadgeCategory::Mindful),
    badge("perfect_day", "Perfect Day", "All meals mindful in one day", "✨", BadgeCategory::Discipline),
];

pub const TOTAL_BADGES: usize = ALL_BADGES.len();

pub fn find(id: &str) -> Option<&'static BadgeTemplate> {
    ALL_BADGES.iter().find(|b| b.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_twelve_unique_ids() {
        let mut ids: Vec<_> = ALL_BADGES.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 12);
        assert_eq!(TOTAL_BADGES, 12);
    }

    #[test]
    fn starter_badge_is_not_in_catalogue() {
        assert!(find(MINDFUL_STARTER.id).is_none());
        assert_eq!(find("slow_eater").map(|b| b.name), Some("Tortoise Mode"));
    }
}
