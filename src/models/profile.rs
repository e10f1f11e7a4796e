use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::names::NamedVariant;
use crate::planner::constants::{
    DEFAULT_AGE, DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG, DOB_FORMAT, MAX_DERIVED_AGE,
    MIN_DERIVED_AGE,
};

/// Physiological profile and preferences for one planning request.
///
/// Every field is optional; missing values fall back to documented defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub gender: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<u32>,
    /// `YYYY-MM-DD`, only consulted when `age` is absent.
    pub date_of_birth: Option<String>,
    pub activity_level: Option<String>,
    pub allergies: BTreeSet<String>,
    pub conditions: BTreeSet<String>,
    pub diet_type: Option<String>,
    pub goal: Option<String>,
    pub macro_profile: Option<String>,
    pub meal_distribution: Option<String>,
}

impl UserProfile {
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg.unwrap_or(DEFAULT_WEIGHT_KG)
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm.unwrap_or(DEFAULT_HEIGHT_CM)
    }

    /// Age in years as of `today`.
    ///
    /// Explicit age wins, then the date of birth (clamped to 18..=80),
    /// then the default of 30.
    pub fn resolved_age(&self, today: NaiveDate) -> u32 {
        if let Some(age) = self.age {
            return age;
        }

        self.date_of_birth
            .as_deref()
            .and_then(|dob| NaiveDate::parse_from_str(dob.trim(), DOB_FORMAT).ok())
            .map(|dob| age_on(dob, today).clamp(MIN_DERIVED_AGE, MAX_DERIVED_AGE) as u32)
            .unwrap_or(DEFAULT_AGE)
    }

    pub fn gender(&self) -> Gender {
        Gender::resolve(self.gender.as_deref())
    }

    pub fn activity_level(&self) -> ActivityLevel {
        ActivityLevel::resolve(self.activity_level.as_deref())
    }

    pub fn macro_profile(&self) -> MacroProfile {
        MacroProfile::resolve(self.macro_profile.as_deref())
    }

    pub fn goal(&self) -> Goal {
        Goal::resolve(self.goal.as_deref())
    }

    pub fn diet_type(&self) -> DietType {
        DietType::resolve(self.diet_type.as_deref())
    }

    /// Case-insensitive condition check.
    pub fn has_condition(&self, condition: &str) -> bool {
        self.conditions
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(condition))
    }
}

/// Whole years between `dob` and `today`, zero for future dates.
fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age.max(0)
}

/// Selects the Mifflin-St Jeor constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// `m`/`male` map to male; any other value uses the female formula.
    pub fn resolve(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_lowercase()) {
            None => Gender::Male,
            Some(n) if n.is_empty() || n == "m" || n == "male" => Gender::Male,
            Some(_) => Gender::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl NamedVariant for ActivityLevel {
    const KIND: &'static str = "activity level";
    const ALL: &'static [Self] = &[
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Unrecognized levels get the lowest multiplier.
    fn unknown_fallback() -> Self {
        ActivityLevel::Sedentary
    }

    fn name(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Share of total calories from each macronutrient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRatio {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacroProfile {
    #[default]
    Balanced,
    HighProtein,
    LowCarb,
    Keto,
}

impl NamedVariant for MacroProfile {
    const KIND: &'static str = "macro profile";
    const ALL: &'static [Self] = &[
        MacroProfile::Balanced,
        MacroProfile::HighProtein,
        MacroProfile::LowCarb,
        MacroProfile::Keto,
    ];

    fn name(self) -> &'static str {
        match self {
            MacroProfile::Balanced => "balanced",
            MacroProfile::HighProtein => "high_protein",
            MacroProfile::LowCarb => "low_carb",
            MacroProfile::Keto => "keto",
        }
    }
}

impl MacroProfile {
    pub fn ratio(self) -> MacroRatio {
        let (protein, carbs, fat) = match self {
            MacroProfile::Balanced => (0.30, 0.40, 0.30),
            MacroProfile::HighProtein => (0.40, 0.30, 0.30),
            MacroProfile::LowCarb => (0.35, 0.25, 0.40),
            MacroProfile::Keto => (0.30, 0.10, 0.60),
        };
        MacroRatio { protein, carbs, fat }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Goal {
    WeightLoss,
    #[default]
    Maintenance,
    MuscleGain,
    ExtremeLoss,
    ExtremeGain,
}

impl NamedVariant for Goal {
    const KIND: &'static str = "goal";
    const ALL: &'static [Self] = &[
        Goal::WeightLoss,
        Goal::Maintenance,
        Goal::MuscleGain,
        Goal::ExtremeLoss,
        Goal::ExtremeGain,
    ];

    fn name(self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::Maintenance => "maintenance",
            Goal::MuscleGain => "muscle_gain",
            Goal::ExtremeLoss => "extreme_loss",
            Goal::ExtremeGain => "extreme_gain",
        }
    }
}

impl Goal {
    /// Calorie scaling factor.
    pub fn factor(self) -> f64 {
        match self {
            Goal::WeightLoss => 0.8,
            Goal::Maintenance => 1.0,
            Goal::MuscleGain => 1.1,
            Goal::ExtremeLoss => 0.7,
            Goal::ExtremeGain => 1.2,
        }
    }

    /// Loss goals keep protein at the unadjusted target.
    pub fn is_loss(self) -> bool {
        matches!(self, Goal::WeightLoss | Goal::ExtremeLoss)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DietType {
    #[default]
    Omnivore,
    Vegetarian,
    Vegan,
}

impl NamedVariant for DietType {
    const KIND: &'static str = "diet type";
    const ALL: &'static [Self] = &[DietType::Omnivore, DietType::Vegetarian, DietType::Vegan];

    fn name(self) -> &'static str {
        match self {
            DietType::Omnivore => "omnivore",
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
        }
    }
}

impl DietType {
    /// Tags that exclude a food from this diet.
    pub fn excluded_tags(self) -> &'static [&'static str] {
        match self {
            DietType::Omnivore => &[],
            DietType::Vegetarian => &["meat", "fish"],
            DietType::Vegan => &["meat", "fish", "dairy", "egg"],
        }
    }
}
