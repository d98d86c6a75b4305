use serde::Serialize;
use time::OffsetDateTime;

use crate::auth::repo_types::Archetype;
use crate::insights::aggregate::{BadgeProgress, DayCalories, ScoreBand, Share};
use crate::meals::repo_types::{EatingReason, MealRecord, Mood, Pace};
use crate::nudges::repo_types::NudgeRecord;

#[derive(Debug, Serialize)]
pub struct StreakView {
    pub name: String,
    pub label: &'static str,
    pub days: u32,
    pub target: u32,
}

#[derive(Debug, Serialize)]
pub struct WeeklySummary {
    pub meals: usize,
    pub average_calories: u32,
    pub emotional_eating_pct: u32,
    pub calories_by_day: [DayCalories; 7],
    pub by_reason: Vec<Share<EatingReason>>,
    pub by_mood: Vec<Share<Mood>>,
    pub by_pace: Vec<Share<Pace>>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub score: u8,
    pub score_band: ScoreBand,
    pub weekly: WeeklySummary,
    pub pattern_insight: String,
    pub badges: BadgeProgress,
    pub streaks: Vec<StreakView>,
}

#[derive(Debug, Serialize)]
pub struct WaterSummary {
    pub glasses: u8,
    pub goal: u8,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub greeting: &'static str,
    pub first_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub local_time: OffsetDateTime,
    pub score: u8,
    pub score_band: ScoreBand,
    pub archetype: Option<Archetype>,
    pub today_calories: u32,
    pub today_meals: Vec<MealRecord>,
    pub water: WaterSummary,
    pub streaks: Vec<StreakView>,
    pub unread_nudges: usize,
    pub latest_nudge: Option<NudgeRecord>,
    pub badges_earned: usize,
}
