use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EatingReason {
    Hunger,
    Boredom,
    Stress,
    Social,
    Habit,
    Emotional,
}

impl EatingReason {
    /// Reasons counted as emotional eating in the weekly insights.
    pub fn is_emotional(self) -> bool {
        matches!(
            self,
            EatingReason::Stress | EatingReason::Boredom | EatingReason::Emotional
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pace {
    Rushed,
    Normal,
    Slow,
}

/// How the user felt after the meal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mood {
    Great,
    Okay,
    Guilty,
    Overfull,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    Photo,
    Voice,
    #[default]
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_items: Vec<String>,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub eating_reason: EatingReason,
    pub pace: Pace,
    pub mood_after: Mood,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub image_url: Option<String>,
    pub method: InputMethod,
}
