pub mod allocation;
pub mod calculations;
pub mod constants;
pub mod filter;
pub mod orchestrator;
pub mod ranking;
pub mod scoring;

pub use allocation::{allocate_meal, MealAllocation};
pub use calculations::{
    adjust_for_goal, calculate_bmr, calculate_nutrient_requirements, calculate_tdee,
    compute_targets, compute_targets_on, round_to,
};
pub use constants::*;
pub use filter::filter_catalog;
pub use orchestrator::{build_recommendations, plan_day, plan_for_profile, plan_meal};
pub use ranking::{rank_by_nutrient_density, rank_topsis, topsis_scores};
pub use scoring::{score_food, score_foods_for_meal, SlotKind};
