use serde::{Deserialize, Serialize};

fn default_emoji() -> String {
    "😐".into()
}

#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    pub text: String,
    #[serde(default)]
    pub sentiment_score: f32,
    #[serde(default = "default_emoji")]
    pub emoji: String,
}

#[derive(Debug, Serialize)]
pub struct WaterResponse {
    pub glasses: u8,
    pub goal: u8,
    pub goal_met: bool,
    pub badges_earned: Vec<String>,
}
