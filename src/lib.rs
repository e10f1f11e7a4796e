pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod storage;
pub mod tuner;

pub use config::{CriteriaWeights, PlannerConfig, PlanningMode};
pub use error::{PlannerError, Result};
pub use models::{DailyPlan, FoodItem, MealSelection, NutrientTargets, UserProfile};
pub use planner::{compute_targets, filter_catalog, plan_day, plan_for_profile};
