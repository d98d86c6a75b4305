use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NudgeType {
    Time,
    Stress,
    Streak,
    Craving,
    Hydration,
    General,
}

impl NudgeType {
    pub fn label(self) -> &'static str {
        match self {
            NudgeType::Time => "Meal Time Nudge",
            NudgeType::Stress => "Stress Check-in",
            NudgeType::Streak => "Streak Motivation",
            NudgeType::Craving => "Craving Alert",
            NudgeType::Hydration => "Hydration Reminder",
            NudgeType::General => "Mindful Tip",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NudgeResponse {
    Accepted,
    Ignored,
    Dismissed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NudgeRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NudgeType,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub delivered_at: OffsetDateTime,
    pub response: Option<NudgeResponse>,
    pub read: bool,
}
