use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::models::{ActivityLevel, Gender, Goal, MacroProfile, NutrientTargets, UserProfile};
use crate::planner::constants::*;

/// Round to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Basal metabolic rate (Mifflin-St Jeor).
pub fn calculate_bmr(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Total daily energy expenditure.
pub fn calculate_tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

/// Macro grams and fiber for a calorie budget split by `macro_profile`.
pub fn calculate_nutrient_requirements(calories: f64, macro_profile: MacroProfile) -> NutrientTargets {
    let ratio = macro_profile.ratio();
    NutrientTargets {
        calories,
        protein_g: calories * ratio.protein / KCAL_PER_G_PROTEIN,
        carbs_g: calories * ratio.carbs / KCAL_PER_G_CARBS,
        fat_g: calories * ratio.fat / KCAL_PER_G_FAT,
        fiber_g: FIBER_G_PER_1000_KCAL * (calories / 1000.0),
    }
}

/// Scale targets by the goal factor.
///
/// Loss goals keep protein at the unadjusted value.
pub fn adjust_for_goal(reqs: NutrientTargets, goal: Goal) -> NutrientTargets {
    let factor = goal.factor();
    let protein_g = if goal.is_loss() {
        (reqs.protein_g * factor).max(reqs.protein_g)
    } else {
        reqs.protein_g * factor
    };

    NutrientTargets {
        calories: reqs.calories * factor,
        protein_g,
        carbs_g: reqs.carbs_g * factor,
        fat_g: reqs.fat_g * factor,
        fiber_g: reqs.fiber_g * factor,
    }
}

/// Daily targets for a profile, with age resolved against the local date.
pub fn compute_targets(profile: &UserProfile) -> NutrientTargets {
    compute_targets_on(profile, Local::now().date_naive())
}

/// Daily targets for a profile, with age resolved against `today`.
pub fn compute_targets_on(profile: &UserProfile, today: NaiveDate) -> NutrientTargets {
    let age = profile.resolved_age(today);
    let bmr = calculate_bmr(profile.gender(), profile.weight_kg(), profile.height_cm(), age);
    let tdee = calculate_tdee(bmr, profile.activity_level());
    let reqs = calculate_nutrient_requirements(tdee, profile.macro_profile());
    let targets = adjust_for_goal(reqs, profile.goal());

    debug!(
        age,
        bmr,
        tdee,
        calories = targets.calories,
        protein_g = targets.protein_g,
        "computed nutrient targets"
    );

    targets
}
