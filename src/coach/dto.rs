use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct CoachMessageRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CoachMessage {
    pub role: &'static str,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

impl CoachMessage {
    pub fn coach(content: String, time: OffsetDateTime) -> Self {
        Self {
            role: "coach",
            content,
            time,
        }
    }
}
