use serde::{Deserialize, Serialize};

use crate::meals::{
    nutrition::NutritionTotals,
    repo_types::{EatingReason, InputMethod, MealRecord, Mood, Pace},
};

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub food_items: Vec<String>,
    pub eating_reason: EatingReason,
    pub pace: Pace,
    pub mood_after: Mood,
    #[serde(default)]
    pub method: InputMethod,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedMealResponse {
    pub meal: MealRecord,
    pub badges_earned: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub food_items: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    #[serde(flatten)]
    pub totals: NutritionTotals,
    pub matched: Vec<Option<&'static str>>, // table key per item, None for fallback
}

#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    pub transcript: String,
}

/// Accepts raw base64 or a `data:<mime>;base64,` URL.
#[derive(Debug, Deserialize)]
pub struct PhotoRequest {
    pub image: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FoodItemsResponse {
    pub food_items: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub image_url: String,
    pub food_items: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    20
}
