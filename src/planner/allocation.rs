use tracing::debug;

use crate::config::PlanningMode;
use crate::models::{MealItem, NutritionTotals, ScoredFood};
use crate::planner::calculations::round_to;
use crate::planner::constants::{MAX_SHARE_OF_REMAINING, MIN_SERVING_G};

/// Items picked for one slot plus what is left of its budget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealAllocation {
    pub items: Vec<MealItem>,
    pub totals: NutritionTotals,
    /// Unrounded; may dip below zero by at most one item's contribution.
    pub remaining_calories: f64,
}

/// Unrounded running totals.
#[derive(Debug, Default)]
struct RawTotals {
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
}

impl RawTotals {
    fn rounded(&self) -> NutritionTotals {
        NutritionTotals {
            calories: self.calories.round().max(0.0) as u32,
            protein_g: round_to(self.protein_g, 1),
            carbs_g: round_to(self.carbs_g, 1),
            fat_g: round_to(self.fat_g, 1),
        }
    }
}

/// Greedily portion ranked candidates toward `target_calories`.
///
/// Walks candidates in order until `max_items` are chosen or the remaining
/// budget falls to the mode's stop threshold. Each portion is at least 20 g
/// and at most the smaller of the serving size and 40% of the remaining
/// budget. A portion is admitted only if it supplies more than the mode's
/// admission threshold; skipped portions do not touch the budget.
pub fn allocate_meal(
    candidates: &[ScoredFood],
    target_calories: f64,
    max_items: usize,
    mode: PlanningMode,
) -> MealAllocation {
    let admission_threshold = mode.admission_threshold();
    let stop_threshold = mode.stop_threshold();

    if candidates.is_empty() || target_calories <= 0.0 {
        return MealAllocation {
            remaining_calories: target_calories.max(0.0),
            ..Default::default()
        };
    }

    let mut items = Vec::new();
    let mut totals = RawTotals::default();
    let mut remaining = target_calories;

    for candidate in candidates {
        if items.len() >= max_items || remaining <= stop_threshold {
            break;
        }

        let food = candidate.food;
        let cal_per_gram = candidate.calories_per_gram;
        if cal_per_gram <= 0.0 {
            debug!(food = %food.name, "skipping zero-calorie food");
            continue;
        }

        let max_serving = (food.serving_size_g as f64).min(remaining / cal_per_gram);
        let serving = MIN_SERVING_G.max(max_serving.min(remaining * MAX_SHARE_OF_REMAINING / cal_per_gram));

        let calories = serving * cal_per_gram;
        if calories <= admission_threshold {
            debug!(food = %food.name, calories, admission_threshold, "portion below admission threshold");
            continue;
        }

        let protein = serving * food.protein_g_per_100g / 100.0;
        let carbs = serving * food.carbs_g_per_100g / 100.0;
        let fat = serving * food.fat_g_per_100g / 100.0;

        debug!(food = %food.name, grams = serving, calories, remaining, "admitted portion");

        items.push(MealItem {
            food_name: food.name.clone(),
            grams_selected: serving.round() as u32,
            calories: calories.round() as u32,
            protein_g: round_to(protein, 1),
            carbs_g: round_to(carbs, 1),
            fat_g: round_to(fat, 1),
        });

        remaining -= calories;
        totals.calories += calories;
        totals.protein_g += protein;
        totals.carbs_g += carbs;
        totals.fat_g += fat;
    }

    MealAllocation {
        items,
        totals: totals.rounded(),
        remaining_calories: remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodItem;
    use crate::planner::scoring::{score_food, SlotKind};

    fn food(name: &str, serving: u32, cal: f64, protein: f64, carbs: f64, fat: f64) -> FoodItem {
        FoodItem {
            id: 0,
            name: name.to_string(),
            serving_size_g: serving,
            calories_per_100g: cal,
            protein_g_per_100g: protein,
            fat_g_per_100g: fat,
            carbs_g_per_100g: carbs,
            tags: Default::default(),
        }
    }

    fn scored(foods: &[FoodItem]) -> Vec<ScoredFood<'_>> {
        foods.iter().map(|f| score_food(f, SlotKind::Main)).collect()
    }

    #[test]
    fn test_forty_percent_cap() {
        let foods = vec![food("Rice", 1000, 100.0, 2.0, 28.0, 0.3)];
        let result = allocate_meal(&scored(&foods), 500.0, 4, PlanningMode::Ranked);

        // 40% of 500 kcal at 1 kcal/g
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].grams_selected, 200);
        assert_eq!(result.items[0].calories, 200);
        assert!((result.remaining_calories - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_serving_size_caps_portion() {
        let foods = vec![food("Egg", 50, 155.0, 13.0, 1.1, 11.0)];
        let result = allocate_meal(&scored(&foods), 1000.0, 4, PlanningMode::Ranked);

        assert_eq!(result.items[0].grams_selected, 50);
        assert_eq!(result.items[0].calories, 78);
        assert_eq!(result.items[0].protein_g, 6.5);
    }

    #[test]
    fn test_minimum_portion_is_twenty_grams() {
        let foods = vec![food("Oil", 15, 884.0, 0.0, 0.0, 100.0)];
        let result = allocate_meal(&scored(&foods), 100.0, 4, PlanningMode::Ranked);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].grams_selected, 20);
        // One item may overshoot the budget
        assert!(result.remaining_calories < 0.0);
        assert!(result.remaining_calories > -(20.0 * 8.84));
    }

    #[test]
    fn test_max_items() {
        let foods: Vec<FoodItem> = (0..10)
            .map(|i| food(&format!("Food {i}"), 200, 100.0, 5.0, 10.0, 2.0))
            .collect();
        let result = allocate_meal(&scored(&foods), 5000.0, 4, PlanningMode::Ranked);
        assert_eq!(result.items.len(), 4);
    }

    #[test]
    fn test_below_threshold_does_not_consume_budget() {
        let foods = vec![
            food("Cucumber", 100, 15.0, 0.7, 3.6, 0.1),
            food("Bread", 100, 265.0, 9.0, 49.0, 3.2),
        ];
        let result = allocate_meal(&scored(&foods), 500.0, 4, PlanningMode::Ranked);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].food_name, "Bread");
        // 40% of 500 = 200 kcal from bread
        assert!((result.remaining_calories - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_quick_threshold_is_stricter() {
        let foods = vec![food("Apple", 40, 52.0, 0.3, 14.0, 0.2)];
        // 40 g apple = 20.8 kcal, admitted only above 20
        let ranked = allocate_meal(&scored(&foods), 500.0, 4, PlanningMode::Ranked);
        let quick = allocate_meal(&scored(&foods), 500.0, 4, PlanningMode::Quick);

        assert_eq!(ranked.items.len(), 1);
        assert!(quick.items.is_empty());
    }

    #[test]
    fn test_quick_stops_at_fifty_remaining() {
        let foods = vec![
            food("Granola Bar", 200, 260.0, 6.0, 60.0, 4.0),
            food("Pretzels", 200, 260.0, 7.0, 55.0, 3.0),
        ];

        // 20 g minimum at 2.6 kcal/g = 52 kcal, leaving 48
        let quick = allocate_meal(&scored(&foods), 100.0, 4, PlanningMode::Quick);
        assert_eq!(quick.items.len(), 1);
        assert_eq!(quick.items[0].food_name, "Granola Bar");
        assert!((quick.remaining_calories - 48.0).abs() < 1e-9);

        // Ranked keeps going below 50 and overshoots by one item
        let ranked = allocate_meal(&scored(&foods), 100.0, 4, PlanningMode::Ranked);
        assert_eq!(ranked.items.len(), 2);
        assert!((ranked.remaining_calories + 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_target_is_empty() {
        let foods = vec![food("Rice", 100, 130.0, 2.7, 28.0, 0.3)];
        let result = allocate_meal(&scored(&foods), 0.0, 4, PlanningMode::Ranked);

        assert!(result.items.is_empty());
        assert_eq!(result.totals, NutritionTotals::default());

        let negative = allocate_meal(&scored(&foods), -50.0, 4, PlanningMode::Ranked);
        assert!(negative.items.is_empty());
    }

    #[test]
    fn test_empty_candidates() {
        let result = allocate_meal(&[], 800.0, 4, PlanningMode::Ranked);
        assert!(result.items.is_empty());
        assert_eq!(result.totals.calories, 0);
    }

    #[test]
    fn test_zero_calorie_food_is_skipped() {
        let foods = vec![food("Water", 250, 0.0, 0.0, 0.0, 0.0)];
        let result = allocate_meal(&scored(&foods), 500.0, 4, PlanningMode::Ranked);
        assert!(result.items.is_empty());
        assert_eq!(result.remaining_calories, 500.0);
    }

    #[test]
    fn test_totals_accumulate() {
        let foods = vec![
            food("Chicken", 150, 165.0, 31.0, 0.0, 3.6),
            food("Rice", 200, 130.0, 2.7, 28.0, 0.3),
        ];
        let result = allocate_meal(&scored(&foods), 700.0, 4, PlanningMode::Ranked);

        let item_protein: f64 = result.items.iter().map(|i| i.protein_g).sum();
        assert!((result.totals.protein_g - item_protein).abs() < 0.15);
        assert!(result.items.iter().all(|i| i.grams_selected >= 20));
    }

    #[test]
    fn test_item_grams_and_calories_round_to_nearest() {
        // 31 g at 1.7 kcal/g is 52.7 kcal
        let bar = vec![food("Trail Mix Bar", 31, 170.0, 6.0, 20.0, 7.0)];
        let result = allocate_meal(&scored(&bar), 1000.0, 4, PlanningMode::Ranked);
        assert_eq!(result.items[0].grams_selected, 31);
        assert_eq!(result.items[0].calories, 53);
        assert_eq!(result.totals.calories, 53);

        // 40% of 215 kcal at 4 kcal/g is 21.5 g
        let butter = vec![food("Peanut Butter", 100, 400.0, 25.0, 20.0, 50.0)];
        let result = allocate_meal(&scored(&butter), 215.0, 4, PlanningMode::Ranked);
        assert_eq!(result.items[0].grams_selected, 22);
        assert_eq!(result.items[0].calories, 86);
    }
}
