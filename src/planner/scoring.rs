use crate::models::{FoodItem, NutrientTargets, ScoredFood};
use crate::planner::constants::FIBER_SHARE_OF_CARBS;

/// Scoring profile for a meal slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Breakfast,
    /// Lunch and dinner.
    Main,
    /// Snacks and any other slot name.
    Snack,
}

impl SlotKind {
    pub fn for_slot(slot: &str) -> Self {
        match slot.trim().to_lowercase().as_str() {
            "breakfast" => SlotKind::Breakfast,
            "lunch" | "dinner" => SlotKind::Main,
            _ => SlotKind::Snack,
        }
    }

    /// Weights for (protein density, carb density, fiber density).
    fn weights(self) -> (f64, f64, f64) {
        match self {
            SlotKind::Breakfast => (0.3, 0.5, 0.2),
            SlotKind::Main => (0.5, 0.2, 0.3),
            SlotKind::Snack => (0.4, 0.0, 0.6),
        }
    }
}

/// Derive densities and the slot suitability score for one food.
pub fn score_food<'a>(food: &'a FoodItem, kind: SlotKind) -> ScoredFood<'a> {
    let denominator = food.calorie_denominator();
    let protein_density = food.protein_g_per_100g / denominator;
    let carb_density = food.carbs_g_per_100g / denominator;
    let estimated_fiber_density = food.carbs_g_per_100g * FIBER_SHARE_OF_CARBS / denominator;

    let (w_protein, w_carbs, w_fiber) = kind.weights();
    let meal_suitability_score =
        w_protein * protein_density + w_carbs * carb_density + w_fiber * estimated_fiber_density;

    ScoredFood {
        food,
        calories_per_gram: food.calories_per_gram(),
        protein_density,
        estimated_fiber_density,
        meal_suitability_score,
        topsis_score: 0.0,
    }
}

/// Score every food for a slot, keeping catalog order.
///
/// Targets are informational; the weights depend on the slot only.
pub fn score_foods_for_meal<'a>(
    catalog: &'a [FoodItem],
    slot: &str,
    _targets: &NutrientTargets,
) -> Vec<ScoredFood<'a>> {
    let kind = SlotKind::for_slot(slot);
    catalog.iter().map(|food| score_food(food, kind)).collect()
}
