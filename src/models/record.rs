use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version tag stored with every saved recommendation.
pub const ALGORITHM_VERSION: &str = "1.0";

/// A saved daily plan plus the user's later feedback on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecommendationRecord {
    pub id: Uuid,
    pub user_id: String,

    pub daily_calories_target: u32,
    pub protein_target_g: u32,
    pub carbs_target_g: u32,
    pub fat_target_g: u32,

    /// Serialized `DailyPlan` as produced by the planner.
    pub meal_plan: serde_json::Value,

    pub total_calories: u32,
    pub total_protein_g: f64,
    pub total_carbs_g: f64,
    pub total_fat_g: f64,

    /// 1-5.
    #[serde(default)]
    pub user_rating: Option<u8>,
    #[serde(default)]
    pub user_followed: Option<bool>,
    #[serde(default)]
    pub user_feedback: Option<String>,
    #[serde(default)]
    pub symptoms_reported: Option<Vec<String>>,

    pub algorithm_version: String,
    pub criteria_weights: BTreeMap<String, f64>,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub followed_at: Option<DateTime<Utc>>,
}

/// Partial feedback update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackUpdate {
    pub rating: Option<u8>,
    pub followed: Option<bool>,
    pub feedback: Option<String>,
    pub symptoms: Option<Vec<String>>,
}

impl FeedbackUpdate {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none()
            && self.followed.is_none()
            && self.feedback.is_none()
            && self.symptoms.is_none()
    }
}
