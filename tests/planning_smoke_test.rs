use std::collections::BTreeSet;

use meal_planner_rs::config::{CriteriaWeights, PlannerConfig, PlanningMode};
use meal_planner_rs::models::{FoodItem, UserProfile};
use meal_planner_rs::planner::{
    allocate_meal, compute_targets, filter_catalog, plan_day, plan_for_profile, rank_topsis,
    score_food, score_foods_for_meal, SlotKind,
};

fn food(id: u32, name: &str, serving: u32, macros: [f64; 4], tags: &[&str]) -> FoodItem {
    let [cal, protein, carbs, fat] = macros;
    FoodItem {
        id,
        name: name.to_string(),
        serving_size_g: serving,
        calories_per_100g: cal,
        protein_g_per_100g: protein,
        fat_g_per_100g: fat,
        carbs_g_per_100g: carbs,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn sample_catalog() -> Vec<FoodItem> {
    vec![
        food(1, "Oatmeal", 80, [389.0, 16.9, 66.3, 6.9], &["breakfast", "grain"]),
        food(2, "Greek Yogurt", 170, [59.0, 10.0, 3.6, 0.4], &["dairy", "breakfast"]),
        food(3, "Chicken Breast", 150, [165.0, 31.0, 0.0, 3.6], &["meat"]),
        food(4, "Salmon", 150, [208.0, 20.0, 0.0, 13.0], &["fish"]),
        food(5, "Brown Rice", 200, [111.0, 2.6, 23.0, 0.9], &["grain"]),
        food(6, "Peanut Butter", 32, [588.0, 25.0, 20.0, 50.0], &["legume"]),
        food(7, "Almond Milk", 240, [17.0, 0.6, 0.3, 1.5], &["dairy-free"]),
        food(8, "Tofu", 150, [76.0, 8.0, 1.9, 4.8], &["soy"]),
        food(9, "White Bread", 60, [265.0, 9.0, 49.0, 3.2], &["high_gi", "grain"]),
        food(10, "Banana", 120, [89.0, 1.1, 22.8, 0.3], &["fruit"]),
    ]
}

fn reference_profile() -> UserProfile {
    UserProfile {
        gender: Some("male".to_string()),
        weight_kg: Some(70.0),
        height_cm: Some(175.0),
        age: Some(25),
        activity_level: Some("sedentary".to_string()),
        goal: Some("maintenance".to_string()),
        macro_profile: Some("balanced".to_string()),
        ..UserProfile::default()
    }
}

fn names(foods: &[FoodItem]) -> Vec<&str> {
    foods.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_end_to_end_plan() {
    let catalog = sample_catalog();
    let (targets, plan) = plan_for_profile(&reference_profile(), &catalog, &PlannerConfig::default());

    assert_eq!(targets.calories, 2008.5);
    assert_eq!(plan.daily_calories_target, 2009);
    assert_eq!(plan.daily_protein_target, 150.6);

    let slots: Vec<&str> = plan.meals.iter().map(|m| m.slot.as_str()).collect();
    assert_eq!(slots, vec!["breakfast", "lunch", "dinner", "snack"]);

    for meal in &plan.meals {
        assert!(!meal.items.is_empty(), "{} has no items", meal.slot);
        assert!(meal.items.len() <= 4);
        for item in &meal.items {
            assert!(item.grams_selected >= 20);
        }
    }

    let summed: u32 = plan.meals.iter().map(|m| m.nutrition.calories).sum();
    assert_eq!(plan.daily_totals.calories, summed);

    assert!(
        plan.recommendations
            .iter()
            .any(|r| r.starts_with("Stay hydrated"))
    );
}

#[test]
fn test_plan_json_contract() {
    let catalog = sample_catalog();
    let (_, plan) = plan_for_profile(&reference_profile(), &catalog, &PlannerConfig::default());
    let json = plan.to_json();

    for key in [
        "breakfast",
        "lunch",
        "dinner",
        "snack",
        "daily_calories_target",
        "daily_protein_target",
        "daily_carbs_target",
        "daily_fat_target",
        "daily_totals",
        "recommendations",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }

    let item = &json["breakfast"]["items"][0];
    assert!(item["name"].is_string());
    assert!(item["grams"].is_u64());
    assert!(json["lunch"]["target_calories"].is_u64());
    assert!(json["daily_totals"]["protein_g"].is_f64());
}

#[test]
fn test_planning_is_deterministic() {
    let catalog = sample_catalog();
    let config = PlannerConfig::default();

    let (_, first) = plan_for_profile(&reference_profile(), &catalog, &config);
    let (_, second) = plan_for_profile(&reference_profile(), &catalog, &config);
    assert_eq!(first, second);
}

#[test]
fn test_allergy_and_diet_filters() {
    let catalog = sample_catalog();

    let mut profile = reference_profile();
    profile.allergies = BTreeSet::from(["peanut".to_string()]);
    let filtered = filter_catalog(&catalog, &profile);
    assert!(!names(&filtered).contains(&"Peanut Butter"));
    assert!(names(&filtered).contains(&"Almond Milk"));
    assert_eq!(filtered.len(), catalog.len() - 1);

    let vegan = UserProfile {
        diet_type: Some("vegan".to_string()),
        ..UserProfile::default()
    };
    let filtered = filter_catalog(&catalog, &vegan);
    let kept = names(&filtered);
    for gone in ["Greek Yogurt", "Chicken Breast", "Salmon"] {
        assert!(!kept.contains(&gone), "{} should be excluded", gone);
    }
    assert!(kept.contains(&"Almond Milk"));
    assert!(kept.contains(&"Tofu"));

    let diabetic = UserProfile {
        conditions: BTreeSet::from(["diabetes".to_string()]),
        ..UserProfile::default()
    };
    assert!(!names(&filter_catalog(&catalog, &diabetic)).contains(&"White Bread"));
}

#[test]
fn test_filter_is_idempotent_and_ordered() {
    let catalog = sample_catalog();
    let profile = UserProfile {
        allergies: BTreeSet::from(["milk".to_string()]),
        conditions: BTreeSet::from(["hypertension".to_string(), "diabetes".to_string()]),
        diet_type: Some("vegetarian".to_string()),
        ..UserProfile::default()
    };

    let once = filter_catalog(&catalog, &profile);
    let twice = filter_catalog(&once, &profile);
    assert_eq!(once, twice);

    let ids: Vec<u32> = once.iter().map(|f| f.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn test_profile_filters_feed_the_plan() {
    let catalog = sample_catalog();
    let mut profile = reference_profile();
    profile.diet_type = Some("vegan".to_string());
    profile.conditions = BTreeSet::from(["hypertension".to_string()]);

    let (_, plan) = plan_for_profile(&profile, &catalog, &PlannerConfig::default());
    for meal in &plan.meals {
        for item in &meal.items {
            assert!(!["Greek Yogurt", "Chicken Breast", "Salmon"].contains(&item.food_name.as_str()));
        }
    }
    assert!(
        plan.recommendations
            .iter()
            .any(|r| r.starts_with("Remember to limit sodium"))
    );
}

#[test]
fn test_distributions() {
    let catalog = sample_catalog();
    let targets = compute_targets(&reference_profile());
    let config = PlannerConfig::default();

    let fasting = plan_day(&targets, &catalog, "intermittent_fasting", &config);
    let breakfast = fasting.meal("breakfast").unwrap();
    assert_eq!(breakfast.target_calories, 0);
    assert!(breakfast.items.is_empty());

    let six = plan_day(&targets, &catalog, "six_small_meals", &config);
    assert_eq!(six.meals.len(), 6);

    let unknown = plan_day(&targets, &catalog, "brunch_only", &config);
    assert_eq!(unknown.meals.len(), 4);
}

#[test]
fn test_quick_mode_plan() {
    let catalog = sample_catalog();
    let config = PlannerConfig {
        mode: PlanningMode::Quick,
        ..PlannerConfig::default()
    };
    let (_, plan) = plan_for_profile(&reference_profile(), &catalog, &config);

    assert!(plan.item_count() > 0);
    for meal in &plan.meals {
        for item in &meal.items {
            assert!(item.calories >= 50);
        }
    }
}

#[test]
fn test_ranking_is_deterministic() {
    let catalog = sample_catalog();
    let targets = compute_targets(&reference_profile());
    let weights = CriteriaWeights::default();

    let order = || -> Vec<String> {
        rank_topsis(score_foods_for_meal(&catalog, "lunch", &targets), &weights)
            .into_iter()
            .map(|s| s.food.name.clone())
            .collect()
    };
    assert_eq!(order(), order());

    let ranked = rank_topsis(score_foods_for_meal(&catalog, "lunch", &targets), &weights);
    for pair in ranked.windows(2) {
        assert!(pair[0].topsis_score >= pair[1].topsis_score);
    }
    assert!(ranked.iter().all(|s| (0.0..=1.0).contains(&s.topsis_score)));
}

#[test]
fn test_zero_target_allocates_nothing() {
    let catalog = sample_catalog();
    let targets = compute_targets(&reference_profile());
    let scored = score_foods_for_meal(&catalog, "lunch", &targets);

    let allocation = allocate_meal(&scored, 0.0, 4, PlanningMode::Ranked);
    assert!(allocation.items.is_empty());
    assert_eq!(allocation.totals.calories, 0);
    assert_eq!(allocation.totals.protein_g, 0.0);
}

#[test]
fn test_zero_calorie_food_is_finite() {
    let water = vec![food(1, "Water", 250, [0.0, 0.0, 0.0, 0.0], &[])];

    let scored = score_food(&water[0], SlotKind::Snack);
    assert!(scored.protein_density.is_finite());
    assert!(scored.estimated_fiber_density.is_finite());
    assert!(scored.meal_suitability_score.is_finite());

    let ranked = rank_topsis(vec![scored], &CriteriaWeights::default());
    assert!(ranked[0].topsis_score.is_finite());

    let allocation = allocate_meal(&ranked, 500.0, 4, PlanningMode::Ranked);
    assert!(allocation.items.is_empty());
}

#[test]
fn test_empty_catalog_plan() {
    let (_, plan) = plan_for_profile(&reference_profile(), &[], &PlannerConfig::default());

    assert_eq!(plan.item_count(), 0);
    assert_eq!(plan.daily_totals.calories, 0);
    assert!(
        plan.recommendations
            .iter()
            .any(|r| r.starts_with("Your meal plan is 2009 calories below"))
    );
}
