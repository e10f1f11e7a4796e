use crate::models::NamedVariant;

// ─────────────────────────────────────────────────────────────────────────────
// Profile defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_AGE: u32 = 30;
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;

/// Date-of-birth format accepted for age resolution.
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Bounds applied to ages derived from a date of birth.
pub const MIN_DERIVED_AGE: i32 = 18;
pub const MAX_DERIVED_AGE: i32 = 80;

// ─────────────────────────────────────────────────────────────────────────────
// Energy
// ─────────────────────────────────────────────────────────────────────────────

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Fiber grams per 1000 kcal.
pub const FIBER_G_PER_1000_KCAL: f64 = 14.0;

/// Share of carbohydrate grams counted as fiber when estimating fiber density.
pub const FIBER_SHARE_OF_CARBS: f64 = 0.1;

// ─────────────────────────────────────────────────────────────────────────────
// Allocation
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest portion ever served.
pub const MIN_SERVING_G: f64 = 20.0;

/// Largest share of the remaining slot budget a single item may take.
pub const MAX_SHARE_OF_REMAINING: f64 = 0.4;

/// Allocation stops once the remaining budget is at or below these.
pub const RANKED_STOP_CALORIES: f64 = 20.0;
pub const QUICK_STOP_CALORIES: f64 = 50.0;

/// Items admitted only above these calorie contributions.
pub const RANKED_ADMISSION_CALORIES: f64 = 20.0;
pub const QUICK_ADMISSION_CALORIES: f64 = 50.0;

/// Maximum items per meal slot.
pub const DEFAULT_MAX_ITEMS: usize = 4;

/// TOPSIS weights: protein density, fiber density, meal suitability.
pub const DEFAULT_CRITERIA_WEIGHTS: [f64; 3] = [0.4, 0.3, 0.3];

// ─────────────────────────────────────────────────────────────────────────────
// Advisory thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Calories below this fraction of the target trigger a shortfall note.
pub const CALORIE_SHORTFALL_RATIO: f64 = 0.9;

/// Protein below this fraction of the target triggers a protein note.
pub const PROTEIN_SHORTFALL_RATIO: f64 = 0.8;

/// Daily carbohydrate grams above which diabetic users get carb advice.
pub const DIABETES_CARB_LIMIT_G: f64 = 150.0;

// ─────────────────────────────────────────────────────────────────────────────
// Meal distributions
// ─────────────────────────────────────────────────────────────────────────────

/// Named split of daily calories across meal slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MealDistribution {
    #[default]
    Standard,
    IntermittentFasting,
    SixSmallMeals,
}

const STANDARD_SLOTS: &[(&str, f64)] = &[
    ("breakfast", 0.25),
    ("lunch", 0.35),
    ("dinner", 0.30),
    ("snack", 0.10),
];

const INTERMITTENT_FASTING_SLOTS: &[(&str, f64)] = &[
    ("breakfast", 0.0),
    ("lunch", 0.45),
    ("dinner", 0.45),
    ("snack", 0.10),
];

const SIX_SMALL_MEALS_SLOTS: &[(&str, f64)] = &[
    ("breakfast", 0.15),
    ("morning_snack", 0.10),
    ("lunch", 0.25),
    ("afternoon_snack", 0.10),
    ("dinner", 0.25),
    ("evening_snack", 0.15),
];

impl NamedVariant for MealDistribution {
    const KIND: &'static str = "meal distribution";
    const ALL: &'static [Self] = &[
        MealDistribution::Standard,
        MealDistribution::IntermittentFasting,
        MealDistribution::SixSmallMeals,
    ];

    fn name(self) -> &'static str {
        match self {
            MealDistribution::Standard => "standard",
            MealDistribution::IntermittentFasting => "intermittent_fasting",
            MealDistribution::SixSmallMeals => "six_small_meals",
        }
    }
}

impl MealDistribution {
    /// `(slot, fraction of daily calories)` in eating order. Fractions sum to 1.
    pub fn slots(self) -> &'static [(&'static str, f64)] {
        match self {
            MealDistribution::Standard => STANDARD_SLOTS,
            MealDistribution::IntermittentFasting => INTERMITTENT_FASTING_SLOTS,
            MealDistribution::SixSmallMeals => SIX_SMALL_MEALS_SLOTS,
        }
    }
}
