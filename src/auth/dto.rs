use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::auth::repo_types::{Archetype, NudgeStyle, UserProfile};

/// Token type used to distinguish Access and Refresh JWTs.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[serde(alias = "Access")]
    Access,
    #[serde(alias = "Refresh")]
    Refresh,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,       // user ID
    pub email: String,   // account key
    pub exp: usize,      // expiration time
    pub iat: usize,      // issued at
    pub iss: String,     // issuer
    pub aud: String,     // audience
    pub kind: TokenKind, // access or refresh
}

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after signup, login or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

fn default_age() -> u8 {
    25
}
fn default_gender() -> String {
    "prefer_not".into()
}
fn default_stress() -> u8 {
    5
}
fn default_sleep() -> u8 {
    7
}

/// Onboarding questionnaire answers; defaults mirror the client form.
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingRequest {
    #[serde(default = "default_age")]
    pub age: u8,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default = "default_stress")]
    pub stress_level: u8,
    #[serde(default = "default_sleep")]
    pub sleep_hours: u8,
    pub archetype: Option<Archetype>,
    #[serde(default)]
    pub nudge_style: NudgeStyle,
}

#[derive(Debug, Serialize)]
pub struct ArchetypeInfo {
    pub id: Archetype,
    pub label: &'static str,
    pub tips: [&'static str; 3],
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
    pub archetype_info: Option<ArchetypeInfo>,
}

impl From<UserProfile> for MeResponse {
    fn from(user: UserProfile) -> Self {
        let archetype_info = user.archetype.map(|a| ArchetypeInfo {
            id: a,
            label: a.label(),
            tips: a.tips(),
        });
        Self {
            user,
            archetype_info,
        }
    }
}
