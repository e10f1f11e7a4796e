use std::collections::BTreeSet;

use dialoguer::{Confirm, Input, Select};

use crate::error::{PlannerError, Result};
use crate::models::{ActivityLevel, DietType, Goal, MacroProfile, NamedVariant, UserProfile};
use crate::planner::constants::{DEFAULT_AGE, DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG, MealDistribution};

/// Prompt for a positive number with a default.
fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    match input.trim().parse::<f64>() {
        Ok(value) if value > 0.0 => Ok(value),
        _ => Err(PlannerError::InvalidInput(format!(
            "expected a positive number, got '{}'",
            input
        ))),
    }
}

/// Choose one named option; returns its name.
fn prompt_choice<T: NamedVariant>(prompt: &str) -> Result<Option<String>> {
    let names = T::names();
    let default_idx = names
        .iter()
        .position(|n| *n == T::default().name())
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&names)
        .default(default_idx)
        .interact()?;

    Ok(names.get(selection).map(|n| n.to_string()))
}

/// Prompt for a comma-separated list (empty allowed).
fn prompt_list(prompt: &str) -> Result<BTreeSet<String>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    Ok(input
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect())
}

/// Prompt for gender; anything but male uses the female formula.
pub fn prompt_gender() -> Result<String> {
    let options = ["male", "female"];
    let selection = Select::new()
        .with_prompt("Gender (for the BMR formula)")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(options[selection.min(1)].to_string())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect a full profile interactively.
pub fn collect_user_profile() -> Result<UserProfile> {
    let gender = prompt_gender()?;
    let age = prompt_number("Age (years)", DEFAULT_AGE as f64)?;
    let weight_kg = prompt_number("Weight (kg)", DEFAULT_WEIGHT_KG)?;
    let height_cm = prompt_number("Height (cm)", DEFAULT_HEIGHT_CM)?;

    let activity_level = prompt_choice::<ActivityLevel>("Activity level")?;
    let goal = prompt_choice::<Goal>("Goal")?;
    let macro_profile = prompt_choice::<MacroProfile>("Macro profile")?;
    let diet_type = prompt_choice::<DietType>("Diet type")?;
    let meal_distribution = prompt_choice::<MealDistribution>("Meal distribution")?;

    let allergies = prompt_list("Allergies (comma-separated, Enter for none)")?;
    let conditions = prompt_list("Health conditions (comma-separated, Enter for none)")?;

    Ok(UserProfile {
        gender: Some(gender),
        weight_kg: Some(weight_kg),
        height_cm: Some(height_cm),
        age: Some(age.round() as u32),
        date_of_birth: None,
        activity_level,
        allergies,
        conditions,
        diet_type,
        goal,
        macro_profile,
        meal_distribution,
    })
}
