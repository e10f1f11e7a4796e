use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// Daily nutrient targets derived from a profile. Fixed for a planning run.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, Deserialize)]
pub struct NutrientTargets {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

impl NutrientTargets {
    /// Calories implied by the macro grams (4/4/9 kcal per gram).
    pub fn macro_calories(&self) -> f64 {
        self.protein_g * 4.0 + self.carbs_g * 4.0 + self.fat_g * 9.0
    }
}

/// One selected food and its portion.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct MealItem {
    #[serde(rename = "name")]
    pub food_name: String,

    #[serde(rename = "grams")]
    pub grams_selected: u32,

    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Accumulated nutrition: whole calories, macros rounded to 0.1 g.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// The items chosen for one meal slot.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MealSelection {
    #[serde(skip)]
    pub slot: String,
    pub target_calories: u32,
    pub items: Vec<MealItem>,
    pub total_calories: u32,
    pub nutrition: NutritionTotals,
}

impl MealSelection {
    pub fn empty(slot: &str, target_calories: u32) -> Self {
        Self {
            slot: slot.to_string(),
            target_calories,
            items: Vec::new(),
            total_calories: 0,
            nutrition: NutritionTotals::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A full day: one selection per slot, targets, actuals and advice.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPlan {
    /// Slot selections in distribution order.
    pub meals: Vec<MealSelection>,
    pub daily_calories_target: u32,
    pub daily_protein_target: f64,
    pub daily_carbs_target: f64,
    pub daily_fat_target: f64,
    pub daily_totals: NutritionTotals,
    pub recommendations: Vec<String>,
}

impl DailyPlan {
    /// Selection for a slot by name.
    pub fn meal(&self, slot: &str) -> Option<&MealSelection> {
        self.meals.iter().find(|m| m.slot == slot)
    }

    pub fn item_count(&self) -> usize {
        self.meals.iter().map(|m| m.items.len()).sum()
    }

    pub fn to_json(&self) -> serde_json::Value {
        // A map of plain data never fails to convert.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Flat mapping: every slot name at the top level next to the daily summary keys.
impl Serialize for DailyPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.meals.len() + 6))?;
        for meal in &self.meals {
            map.serialize_entry(&meal.slot, meal)?;
        }
        map.serialize_entry("daily_calories_target", &self.daily_calories_target)?;
        map.serialize_entry("daily_protein_target", &self.daily_protein_target)?;
        map.serialize_entry("daily_carbs_target", &self.daily_carbs_target)?;
        map.serialize_entry("daily_fat_target", &self.daily_fat_target)?;
        map.serialize_entry("daily_totals", &self.daily_totals)?;
        map.serialize_entry("recommendations", &self.recommendations)?;
        map.end()
    }
}
