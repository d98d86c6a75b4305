use crate::auth::dto::OnboardingRequest;
use crate::auth::repo_types::{Archetype, ProfileDetails, UserProfile};
use crate::error::AppError;

pub const MIN_ONBOARDING_SCORE: i32 = 20;
pub const MAX_ONBOARDING_SCORE: i32 = 70;

/// Initial discipline score derived from the questionnaire, clamped to [20, 70].
pub fn discipline_score(answers: &OnboardingRequest) -> u8 {
    let disciplined = if answers.archetype == Some(Archetype::Disciplined) {
        20
    } else {
        0
    };
    let raw = 30
        + disciplined
        + answers.goals.len() as i32 * 5
        + (10 - i32::from(answers.stress_level)) * 2
        + (i32::from(answers.sleep_hours) - 5) * 2;
    raw.clamp(MIN_ONBOARDING_SCORE, MAX_ONBOARDING_SCORE) as u8
}

pub fn validate(answers: &OnboardingRequest) -> Result<Archetype, AppError> {
    if answers.goals.is_empty() {
        return Err(AppError::validation("Select at least one goal"));
    }
    if !(1..=10).contains(&answers.stress_level) {
        return Err(AppError::validation("Stress level must be between 1 and 10"));
    }
    answers
        .archetype
        .ok_or_else(|| AppError::validation("Choose your eating archetype"))
}

pub fn apply(user: &mut UserProfile, answers: OnboardingRequest, archetype: Archetype) {
    user.discipline_score = discipline_score(&answers);
    user.onboarding_complete = true;
    user.archetype = Some(archetype);
    user.profile = Some(ProfileDetails {
        age: answers.age,
        gender: answers.gender,
        goals: answers.goals,
        dietary: answers.dietary,
        stress_level: answers.stress_level,
        sleep_hours: answers.sleep_hours,
        nudge_style: answers.nudge_style,
    });
}
