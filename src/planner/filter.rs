use tracing::debug;

use crate::models::{FoodItem, UserProfile};

/// Tags excluded for a health condition.
const CONDITION_RULES: &[(&str, &[&str])] = &[
    ("diabetes", &["high_gi"]),
    ("hypertension", &["high_sodium"]),
];

/// Foods the profile can eat, in catalog order.
///
/// Runs allergy, condition and diet-type exclusion in turn. The input is
/// never modified; an empty result is not an error.
pub fn filter_catalog(catalog: &[FoodItem], profile: &UserProfile) -> Vec<FoodItem> {
    let allergies: Vec<String> = profile
        .allergies
        .iter()
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect();

    let excluded_tags: Vec<&str> = CONDITION_RULES
        .iter()
        .filter(|(condition, _)| profile.has_condition(condition))
        .flat_map(|(_, tags)| tags.iter().copied())
        .collect();

    let diet = profile.diet_type();

    let filtered: Vec<FoodItem> = catalog
        .iter()
        .filter(|food| !triggers_allergy(food, &allergies))
        .filter(|food| !excluded_tags.iter().any(|tag| food.has_tag(tag)))
        .filter(|food| !diet.excluded_tags().iter().any(|tag| food.has_tag(tag)))
        .cloned()
        .collect();

    debug!(
        before = catalog.len(),
        after = filtered.len(),
        allergies = allergies.len(),
        "filtered food catalog"
    );

    filtered
}

/// True if any allergen appears in the food's name or tags.
fn triggers_allergy(food: &FoodItem, allergies: &[String]) -> bool {
    allergies.iter().any(|allergen| food.mentions(allergen))
}
