use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

pub const WATER_GOAL: u8 = 8;

/// Glasses drunk on one local day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaterLog {
    pub date: Date,
    pub glasses: u8,
}

impl WaterLog {
    /// Glasses on `today`; a log from an earlier day counts as zero.
    pub fn glasses_on(&self, today: Date) -> u8 {
        if self.date == today {
            self.glasses
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodJournal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub sentiment_score: f32,
    pub emoji: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Day goals shown next to each streak.
pub const STREAK_TARGETS: [(&str, &str, u32); 3] = [
    ("mindful", "Mindful Eating", 7),
    ("logging", "Meal Logging", 14),
    ("hydration", "Hydration", 7),
];
