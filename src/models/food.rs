use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A catalog food with nutrition per 100 g.
///
/// Reference data: the planner only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: u32,
    pub name: String,

    /// Typical serving. An upper bound candidate for allocation, not a hard cap.
    pub serving_size_g: u32,

    pub calories_per_100g: f64,
    pub protein_g_per_100g: f64,
    pub fat_g_per_100g: f64,
    pub carbs_g_per_100g: f64,

    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl FoodItem {
    #[inline]
    pub fn calories_per_gram(&self) -> f64 {
        self.calories_per_100g / 100.0
    }

    /// Calories per 100 g with zero guarded to 1 for use as a denominator.
    #[inline]
    pub fn calorie_denominator(&self) -> f64 {
        self.calories_per_100g.max(1.0)
    }

    /// Case-insensitive exact tag match.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.trim().eq_ignore_ascii_case(tag))
    }

    /// Case-insensitive substring match against the name or any tag.
    pub fn mentions(&self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return false;
        }
        self.name.to_lowercase().contains(&token)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&token))
    }

    /// Non-negative nutrition and a positive serving size.
    pub fn is_valid(&self) -> bool {
        self.serving_size_g > 0
            && self.calories_per_100g >= 0.0
            && self.protein_g_per_100g >= 0.0
            && self.fat_g_per_100g >= 0.0
            && self.carbs_g_per_100g >= 0.0
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}: {} kcal/100g, P:{} C:{} F:{}, serving {}g",
            self.name,
            self.calories_per_100g,
            self.protein_g_per_100g,
            self.carbs_g_per_100g,
            self.fat_g_per_100g,
            self.serving_size_g
        )
    }
}

/// A catalog food plus the values derived for one meal slot.
///
/// Built fresh for every slot; the wrapped food is never modified.
#[derive(Debug, Clone)]
pub struct ScoredFood<'a> {
    pub food: &'a FoodItem,
    pub calories_per_gram: f64,
    pub protein_density: f64,
    /// Carbohydrate-based estimate; the catalog carries no fiber column.
    pub estimated_fiber_density: f64,
    pub meal_suitability_score: f64,
    pub topsis_score: f64,
}
