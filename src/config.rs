use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::NamedVariant;
use crate::planner::constants::{
    DEFAULT_CRITERIA_WEIGHTS, DEFAULT_MAX_ITEMS, QUICK_ADMISSION_CALORIES, QUICK_STOP_CALORIES,
    RANKED_ADMISSION_CALORIES, RANKED_STOP_CALORIES,
};

/// TOPSIS weights for the three ranking criteria.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaWeights {
    pub protein_density: f64,
    pub fiber_density: f64,
    pub meal_suitability: f64,
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        let [protein_density, fiber_density, meal_suitability] = DEFAULT_CRITERIA_WEIGHTS;
        Self {
            protein_density,
            fiber_density,
            meal_suitability,
        }
    }
}

impl CriteriaWeights {
    pub fn as_array(&self) -> [f64; 3] {
        [self.protein_density, self.fiber_density, self.meal_suitability]
    }

    /// Scaled to sum to 1. All-zero weights fall back to the defaults.
    pub fn normalized(&self) -> Self {
        let total: f64 = self.as_array().iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Self::default();
        }
        Self {
            protein_density: self.protein_density / total,
            fiber_density: self.fiber_density / total,
            meal_suitability: self.meal_suitability / total,
        }
    }

    /// Names used when the weights are stored with a recommendation.
    pub fn as_named_map(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("protein_density".to_string(), self.protein_density),
            ("nutrient_balance".to_string(), self.fiber_density),
            ("meal_appropriateness".to_string(), self.meal_suitability),
        ])
    }
}

/// How candidates are ordered before allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningMode {
    /// Slot scoring, TOPSIS ranking, 20 kcal admission and stop.
    #[default]
    Ranked,
    /// Protein plus fiber density ordering, 50 kcal admission and stop.
    Quick,
}

impl NamedVariant for PlanningMode {
    const KIND: &'static str = "planning mode";
    const ALL: &'static [Self] = &[PlanningMode::Ranked, PlanningMode::Quick];

    fn name(self) -> &'static str {
        match self {
            PlanningMode::Ranked => "ranked",
            PlanningMode::Quick => "quick",
        }
    }
}

impl PlanningMode {
    /// Minimum calorie contribution for an item to be admitted.
    pub fn admission_threshold(self) -> f64 {
        match self {
            PlanningMode::Ranked => RANKED_ADMISSION_CALORIES,
            PlanningMode::Quick => QUICK_ADMISSION_CALORIES,
        }
    }

    /// Allocation ends once the remaining budget is at or below this.
    pub fn stop_threshold(self) -> f64 {
        match self {
            PlanningMode::Ranked => RANKED_STOP_CALORIES,
            PlanningMode::Quick => QUICK_STOP_CALORIES,
        }
    }
}

/// Tunable planner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub criteria_weights: CriteriaWeights,
    pub max_items: usize,
    pub mode: PlanningMode,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            criteria_weights: CriteriaWeights::default(),
            max_items: DEFAULT_MAX_ITEMS,
            mode: PlanningMode::default(),
        }
    }
}

/// Load a planner config from JSON. Missing fields keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig> {
    let content = fs::read_to_string(path)?;
    let config: PlannerConfig = serde_json::from_str(&content)?;
    Ok(config)
}
