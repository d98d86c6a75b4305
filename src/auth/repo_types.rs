use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Self-reported eating pattern picked during onboarding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Emotional,
    Binge,
    Snacker,
    Skipper,
    Disciplined,
}

impl Archetype {
    pub fn label(self) -> &'static str {
        match self {
            Archetype::Emotional => "Emotional Eater",
            Archetype::Binge => "Binge Eater",
            Archetype::Snacker => "Mindless Snacker",
            Archetype::Skipper => "Meal Skipper",
            Archetype::Disciplined => "Disciplined Eater",
        }
    }

    pub fn tips(self) -> [&'static str; 3] {
        match self {
            Archetype::Emotional => [
                "Journal your feelings before eating",
                "Practice 5 deep breaths when stressed",
                "Keep healthy snacks accessible",
            ],
            Archetype::Binge => [
                "Never skip meals — it triggers binges",
                "Eat every 4 hours consistently",
                "Remove trigger foods from home",
            ],
            Archetype::Snacker => [
                "Pre-portion snacks in small containers",
                "Add friction to snack access",
                "Ask: \"Am I actually hungry?\"",
            ],
            Archetype::Skipper => [
                "Set meal alarms for 8AM, 1PM, 7PM",
                "Prep meals on Sunday for the week",
                "Keep fruit available for quick meals",
            ],
            Archetype::Disciplined => [
                "Focus on nutrient density over calories",
                "Experiment with intuitive eating",
                "Share your habits to inspire others",
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NudgeStyle {
    #[default]
    Gentle,
    Scientific,
    Tough,
    Humorous,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileDetails {
    pub age: u8,
    pub gender: String,
    pub goals: Vec<String>,
    pub dietary: Vec<String>,
    pub stress_level: u8,
    pub sleep_hours: u8,
    pub nudge_style: NudgeStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub archetype: Option<Archetype>,
    pub discipline_score: u8,
    pub onboarding_complete: bool,
    pub profile: Option<ProfileDetails>,
    #[serde(with = "time::serde::rfc3339")]
    pub join_date: OffsetDateTime,
}

impl UserProfile {
    pub const INITIAL_SCORE: u8 = 50;

    pub fn new(name: String, email: String, joined: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            archetype: None,
            discipline_score: Self::INITIAL_SCORE,
            onboarding_complete: false,
            profile: None,
            join_date: joined,
        }
    }

    /// First whitespace-separated token of the name, "Friend" when blank.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("Friend")
    }
}

/// Stored under `mindbite_account_{email}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub password_hash: String, // Argon2 hash
    pub user: UserProfile,
}
