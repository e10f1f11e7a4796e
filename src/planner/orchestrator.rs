use tracing::{debug, info};

use crate::config::{PlannerConfig, PlanningMode};
use crate::models::{
    DailyPlan, FoodItem, Goal, MealSelection, NamedVariant, NutrientTargets, NutritionTotals,
    UserProfile,
};
use crate::planner::allocation::allocate_meal;
use crate::planner::calculations::{compute_targets, round_to};
use crate::planner::constants::{
    CALORIE_SHORTFALL_RATIO, DIABETES_CARB_LIMIT_G, MealDistribution, PROTEIN_SHORTFALL_RATIO,
};
use crate::planner::filter::filter_catalog;
use crate::planner::ranking::{rank_by_nutrient_density, rank_topsis};
use crate::planner::scoring::score_foods_for_meal;

/// Plan one slot: score, rank, then allocate.
///
/// Scoring works on a fresh per-slot vector; the catalog is only borrowed.
pub fn plan_meal(
    catalog: &[FoodItem],
    slot: &str,
    target_calories: u32,
    targets: &NutrientTargets,
    config: &PlannerConfig,
) -> MealSelection {
    let scored = score_foods_for_meal(catalog, slot, targets);
    let ranked = match config.mode {
        PlanningMode::Ranked => rank_topsis(scored, &config.criteria_weights),
        PlanningMode::Quick => rank_by_nutrient_density(scored),
    };

    let allocation = allocate_meal(&ranked, target_calories as f64, config.max_items, config.mode);

    debug!(
        slot,
        target_calories,
        items = allocation.items.len(),
        calories = allocation.totals.calories,
        "planned meal"
    );

    MealSelection {
        slot: slot.to_string(),
        target_calories,
        total_calories: allocation.totals.calories,
        nutrition: allocation.totals,
        items: allocation.items,
    }
}

/// Plan every slot of a named distribution and total the day.
///
/// Unknown distribution names use `standard`. Recommendations cover the
/// calorie, protein and hydration rules; see [`plan_for_profile`] for the
/// profile-aware set.
pub fn plan_day(
    targets: &NutrientTargets,
    catalog: &[FoodItem],
    distribution: &str,
    config: &PlannerConfig,
) -> DailyPlan {
    build_day(targets, catalog, distribution, config, None)
}

/// Targets, filtering and planning for one profile in a single call.
///
/// Uses the profile's meal distribution and attaches the full set of
/// recommendations, including condition and goal notes.
pub fn plan_for_profile(
    profile: &UserProfile,
    catalog: &[FoodItem],
    config: &PlannerConfig,
) -> (NutrientTargets, DailyPlan) {
    let targets = compute_targets(profile);
    let filtered = filter_catalog(catalog, profile);
    let distribution = profile.meal_distribution.as_deref().unwrap_or("standard");

    let plan = build_day(&targets, &filtered, distribution, config, Some(profile));
    (targets, plan)
}

fn build_day(
    targets: &NutrientTargets,
    catalog: &[FoodItem],
    distribution: &str,
    config: &PlannerConfig,
    profile: Option<&UserProfile>,
) -> DailyPlan {
    let distribution = MealDistribution::resolve(Some(distribution));

    let meals: Vec<MealSelection> = distribution
        .slots()
        .iter()
        .map(|(slot, fraction)| {
            let target = (targets.calories * fraction).round().max(0.0) as u32;
            plan_meal(catalog, slot, target, targets, config)
        })
        .collect();

    let daily_totals = sum_totals(&meals);

    let mut plan = DailyPlan {
        meals,
        daily_calories_target: targets.calories.round().max(0.0) as u32,
        daily_protein_target: round_to(targets.protein_g, 1),
        daily_carbs_target: round_to(targets.carbs_g, 1),
        daily_fat_target: round_to(targets.fat_g, 1),
        daily_totals,
        recommendations: Vec::new(),
    };
    plan.recommendations = build_recommendations(&plan, profile);

    info!(
        distribution = distribution.name(),
        mode = config.mode.name(),
        target = plan.daily_calories_target,
        actual = plan.daily_totals.calories,
        items = plan.item_count(),
        "daily plan generated"
    );

    plan
}

fn sum_totals(meals: &[MealSelection]) -> NutritionTotals {
    let totals = meals.iter().fold(NutritionTotals::default(), |acc, meal| NutritionTotals {
        calories: acc.calories + meal.nutrition.calories,
        protein_g: acc.protein_g + meal.nutrition.protein_g,
        carbs_g: acc.carbs_g + meal.nutrition.carbs_g,
        fat_g: acc.fat_g + meal.nutrition.fat_g,
    });

    NutritionTotals {
        protein_g: round_to(totals.protein_g, 1),
        carbs_g: round_to(totals.carbs_g, 1),
        fat_g: round_to(totals.fat_g, 1),
        ..totals
    }
}

/// Advisory notes for a plan.
///
/// Without a profile only the calorie, protein and hydration rules apply.
pub fn build_recommendations(plan: &DailyPlan, profile: Option<&UserProfile>) -> Vec<String> {
    let mut notes = Vec::new();

    let calorie_target = plan.daily_calories_target as f64;
    let calorie_total = plan.daily_totals.calories as f64;
    if calorie_total < calorie_target * CALORIE_SHORTFALL_RATIO {
        notes.push(format!(
            "Your meal plan is {} calories below your target. Consider adding more food to reach your {} calorie goal.",
            plan.daily_calories_target.saturating_sub(plan.daily_totals.calories),
            plan.daily_calories_target
        ));
    }

    if plan.daily_totals.protein_g < plan.daily_protein_target * PROTEIN_SHORTFALL_RATIO {
        notes.push(format!(
            "Your protein intake is below target. Aim for {}g of protein daily to support your goals.",
            plan.daily_protein_target
        ));
    }

    if let Some(profile) = profile {
        if profile.has_condition("diabetes") && plan.daily_totals.carbs_g > DIABETES_CARB_LIMIT_G {
            notes.push(
                "Consider reducing your carbohydrate intake and focusing on low-glycemic options to better manage blood sugar levels."
                    .to_string(),
            );
        }
        if profile.has_condition("hypertension") {
            notes.push(
                "Remember to limit sodium intake. Consider using herbs and spices instead of salt to flavor your meals."
                    .to_string(),
            );
        }
    }

    notes.push("Stay hydrated by drinking at least 8 glasses of water daily.".to_string());

    if profile.is_some_and(|p| p.goal() == Goal::WeightLoss) {
        notes.push(
            "Include regular physical activity along with your meal plan for optimal results."
                .to_string(),
        );
    }

    notes
}
