use assert_float_eq::*;
use chrono::NaiveDate;

use meal_planner_rs::models::{Goal, MacroProfile, NamedVariant, UserProfile};
use meal_planner_rs::planner::{
    adjust_for_goal, calculate_nutrient_requirements, compute_targets, compute_targets_on,
};

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

#[test]
fn test_reference_profile_targets() {
    let targets = compute_targets(&reference_profile());

    // BMR 1673.75, sedentary x1.2
    assert_float_absolute_eq!(targets.calories, 2008.5, 1e-9);
    assert_float_absolute_eq!(targets.protein_g, 2008.5 * 0.3 / 4.0, 1e-9);
    assert_float_absolute_eq!(targets.carbs_g, 2008.5 * 0.4 / 4.0, 1e-9);
    assert_float_absolute_eq!(targets.fat_g, 2008.5 * 0.3 / 9.0, 1e-9);
    assert_float_absolute_eq!(targets.fiber_g, 14.0 * 2.0085, 1e-9);
}

#[test]
fn test_balanced_macros_sum_to_calories() {
    for profile in ["balanced", "high_protein", "low_carb", "keto"] {
        let reqs = calculate_nutrient_requirements(2400.0, MacroProfile::resolve(Some(profile)));
        assert_float_absolute_eq!(reqs.macro_calories(), 2400.0, 1e-6);
    }
}

#[test]
fn test_goal_factors() {
    let reqs = calculate_nutrient_requirements(2000.0, MacroProfile::Balanced);

    let extreme_loss = adjust_for_goal(reqs, Goal::ExtremeLoss);
    assert_float_absolute_eq!(extreme_loss.calories, 1400.0, 1e-9);
    assert_float_absolute_eq!(extreme_loss.protein_g, reqs.protein_g, 1e-9);

    let extreme_gain = adjust_for_goal(reqs, Goal::ExtremeGain);
    assert_float_absolute_eq!(extreme_gain.calories, 2400.0, 1e-9);
    assert_float_absolute_eq!(extreme_gain.protein_g, reqs.protein_g * 1.2, 1e-9);

    let maintenance = adjust_for_goal(reqs, Goal::Maintenance);
    assert_eq!(maintenance, reqs);
}

#[test]
fn test_unknown_activity_is_sedentary_missing_is_moderate() {
    let mut profile = reference_profile();

    profile.activity_level = Some("couch_potato".to_string());
    let unknown = compute_targets(&profile);
    assert_float_absolute_eq!(unknown.calories, 1673.75 * 1.2, 1e-9);

    profile.activity_level = None;
    let missing = compute_targets(&profile);
    assert_float_absolute_eq!(missing.calories, 1673.75 * 1.55, 1e-9);
}

#[test]
fn test_age_from_date_of_birth() {
    let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
    let mut profile = reference_profile();
    profile.age = None;

    profile.date_of_birth = Some("1996-05-31".to_string());
    let thirty = compute_targets_on(&profile, today);
    assert_float_absolute_eq!(thirty.calories, (1673.75 - 25.0) * 1.2, 1e-9);

    // Clamped to 18
    profile.date_of_birth = Some("2020-01-01".to_string());
    let child = compute_targets_on(&profile, today);
    assert_float_absolute_eq!(child.calories, (1673.75 + 35.0) * 1.2, 1e-9);

    // Unparseable date falls back to 30
    profile.date_of_birth = Some("31/05/1996".to_string());
    let fallback = compute_targets_on(&profile, today);
    assert_float_absolute_eq!(fallback.calories, thirty.calories, 1e-9);
}

#[test]
fn test_female_formula() {
    let mut profile = reference_profile();
    profile.gender = Some("female".to_string());
    let targets = compute_targets(&profile);
    assert_float_absolute_eq!(targets.calories, 1507.75 * 1.2, 1e-9);
}
