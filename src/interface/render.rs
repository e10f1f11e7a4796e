use crate::models::{DailyPlan, MealRecommendationRecord, NutrientTargets};

/// Display nutrient targets.
pub fn display_targets(targets: &NutrientTargets) {
    println!();
    println!("=== Daily Targets ===");
    println!();
    println!("Calories: {:>7.0} kcal", targets.calories);
    println!("Protein:  {:>7.1} g", targets.protein_g);
    println!("Carbs:    {:>7.1} g", targets.carbs_g);
    println!("Fat:      {:>7.1} g", targets.fat_g);
    println!("Fiber:    {:>7.1} g", targets.fiber_g);
    println!();
}

/// Display a daily plan slot by slot.
pub fn display_daily_plan(plan: &DailyPlan) {
    if plan.item_count() == 0 {
        println!("No meal plan generated (no suitable foods or zero calorie budget).");
    }

    let max_name_len = plan
        .meals
        .iter()
        .flat_map(|m| m.items.iter())
        .map(|i| i.food_name.len())
        .max()
        .unwrap_or(10);

    println!();
    println!("=== Meal Plan ===");

    for meal in &plan.meals {
        println!();
        println!(
            "--- {} ({} / {} kcal) ---",
            meal.slot, meal.total_calories, meal.target_calories
        );

        if meal.items.is_empty() {
            println!("  (nothing selected)");
            continue;
        }

        for (i, item) in meal.items.iter().enumerate() {
            println!(
                "{:>3}. {:<width$} {:>4} g  {:>4} kcal | P {:>5.1} C {:>5.1} F {:>5.1}",
                i + 1,
                item.food_name,
                item.grams_selected,
                item.calories,
                item.protein_g,
                item.carbs_g,
                item.fat_g,
                width = max_name_len
            );
        }
    }

    let totals = &plan.daily_totals;
    println!();
    println!("--- Summary ---");
    println!("Calories: {} / {} kcal", totals.calories, plan.daily_calories_target);
    println!("Protein:  {:.1} / {:.1} g", totals.protein_g, plan.daily_protein_target);
    println!("Carbs:    {:.1} / {:.1} g", totals.carbs_g, plan.daily_carbs_target);
    println!("Fat:      {:.1} / {:.1} g", totals.fat_g, plan.daily_fat_target);

    if !plan.recommendations.is_empty() {
        println!();
        println!("--- Recommendations ---");
        for note in &plan.recommendations {
            println!("  * {}", note);
        }
    }
    println!();
}

/// Display saved recommendations, newest first.
pub fn display_history(records: &[MealRecommendationRecord]) {
    if records.is_empty() {
        println!("No saved recommendations.");
        return;
    }

    println!();
    println!("=== Recommendation History ({} records) ===", records.len());
    println!();

    for record in records {
        let rating = record
            .user_rating
            .map(|r| format!("{}/5", r))
            .unwrap_or_else(|| "-".to_string());
        let followed = match record.user_followed {
            Some(true) => "followed",
            Some(false) => "not followed",
            None => "no feedback",
        };

        println!(
            "  {}  {}  {} / {} kcal  rating {}  {}",
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.id,
            record.total_calories,
            record.daily_calories_target,
            rating,
            followed
        );
    }
    println!();
}
