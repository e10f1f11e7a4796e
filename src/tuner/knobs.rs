use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{CriteriaWeights, PlannerConfig, PlanningMode};
use crate::planner::constants::DEFAULT_MAX_ITEMS;

/// Ranking weights under calibration. Always normalized before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TunerKnobs {
    pub protein_density: f64,
    pub fiber_density: f64,
    pub meal_suitability: f64,
}

impl Default for TunerKnobs {
    fn default() -> Self {
        Self::from_weights(CriteriaWeights::default())
    }
}

impl TunerKnobs {
    /// Number of tunable knobs.
    pub const NUM_KNOBS: usize = 3;

    pub fn from_weights(weights: CriteriaWeights) -> Self {
        Self {
            protein_density: weights.protein_density,
            fiber_density: weights.fiber_density,
            meal_suitability: weights.meal_suitability,
        }
    }

    /// Weights scaled to sum to 1.
    pub fn weights(&self) -> CriteriaWeights {
        CriteriaWeights {
            protein_density: self.protein_density,
            fiber_density: self.fiber_density,
            meal_suitability: self.meal_suitability,
        }
        .normalized()
    }

    /// Ranked-mode planner config using these weights.
    pub fn to_config(&self, max_items: usize) -> PlannerConfig {
        PlannerConfig {
            criteria_weights: self.weights(),
            max_items,
            mode: PlanningMode::Ranked,
        }
    }

    /// Random knobs within the given ranges.
    pub fn random(rng: &mut impl Rng, ranges: &KnobRanges) -> Self {
        Self {
            protein_density: rng.gen_range(ranges.protein_density.0..=ranges.protein_density.1),
            fiber_density: rng.gen_range(ranges.fiber_density.0..=ranges.fiber_density.1),
            meal_suitability: rng
                .gen_range(ranges.meal_suitability.0..=ranges.meal_suitability.1),
        }
    }

    /// Compact form for display, normalized.
    pub fn display(&self) -> String {
        let w = self.weights();
        format!(
            "protein={:.3} fiber={:.3} suitability={:.3}",
            w.protein_density, w.fiber_density, w.meal_suitability
        )
    }

    /// Copy with one knob multiplied by `factor`, clamped to its range.
    ///
    /// `knob_idx`: 0 = protein_density, 1 = fiber_density, 2 = meal_suitability.
    /// Other indices return an unchanged copy.
    pub fn perturb(&self, knob_idx: usize, factor: f64, ranges: &KnobRanges) -> Self {
        let mut new = *self;
        match knob_idx {
            0 => {
                new.protein_density = (self.protein_density * factor)
                    .clamp(ranges.protein_density.0, ranges.protein_density.1);
            }
            1 => {
                new.fiber_density = (self.fiber_density * factor)
                    .clamp(ranges.fiber_density.0, ranges.fiber_density.1);
            }
            2 => {
                new.meal_suitability = (self.meal_suitability * factor)
                    .clamp(ranges.meal_suitability.0, ranges.meal_suitability.1);
            }
            _ => {}
        }
        new
    }
}

/// Min/max for each raw (pre-normalization) weight.
#[derive(Debug, Clone)]
pub struct KnobRanges {
    pub protein_density: (f64, f64),
    pub fiber_density: (f64, f64),
    pub meal_suitability: (f64, f64),
    /// Items per meal used while evaluating.
    pub max_items: usize,
}

impl Default for KnobRanges {
    fn default() -> Self {
        Self {
            protein_density: (0.05, 1.0),
            fiber_density: (0.05, 1.0),
            meal_suitability: (0.05, 1.0),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}
