pub mod food;
pub mod names;
pub mod plan;
pub mod profile;
pub mod record;

pub use food::{FoodItem, ScoredFood};
pub use names::NamedVariant;
pub use plan::{DailyPlan, MealItem, MealSelection, NutrientTargets, NutritionTotals};
pub use profile::{ActivityLevel, DietType, Gender, Goal, MacroProfile, MacroRatio, UserProfile};
pub use record::{FeedbackUpdate, MealRecommendationRecord, ALGORITHM_VERSION};
