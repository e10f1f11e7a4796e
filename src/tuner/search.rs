use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::models::FoodItem;
use crate::tuner::evaluation::{
    evaluate_knobs, hill_climb, pareto_frontier, profile_grid, select_balanced, EvaluationResult,
    HillClimbConfig, ProfileCase,
};
use crate::tuner::knobs::{KnobRanges, TunerKnobs};

/// Configuration for the tuner.
pub struct TunerConfig {
    pub iterations: usize,
    pub seed: u64,
    pub ranges: KnobRanges,
    pub cases: Vec<ProfileCase>,
    /// Hill climbing configuration. `None` disables refinement.
    pub hill_climb: Option<HillClimbConfig>,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            iterations: 200,
            seed: 123,
            ranges: KnobRanges::default(),
            cases: profile_grid(),
            hill_climb: Some(HillClimbConfig::default()),
        }
    }
}

/// Results from a tuning run.
pub struct TunerResults {
    /// Every evaluated setting, best first.
    pub results: Vec<EvaluationResult>,
    /// The default weights.
    pub baseline: EvaluationResult,
    pub pareto_indices: Vec<usize>,
    /// Recommended pick from the frontier.
    pub balanced_idx: Option<usize>,
}

impl TunerResults {
    /// Balanced pick, or the top result when there is none.
    pub fn best(&self) -> &EvaluationResult {
        self.balanced_idx
            .and_then(|i| self.results.get(i))
            .or_else(|| self.results.first())
            .unwrap_or(&self.baseline)
    }
}

/// Random search over the weight ranges, then hill climbing from the
/// Pareto frontier. Deterministic for a given seed.
pub fn run_tuner(config: &TunerConfig, foods: &[FoodItem]) -> TunerResults {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let max_items = config.ranges.max_items;

    let baseline = evaluate_knobs(&TunerKnobs::default(), foods, &config.cases, max_items);
    info!(
        error = baseline.mean_calorie_error,
        coverage = baseline.mean_protein_coverage,
        knobs = %baseline.knobs.display(),
        "baseline"
    );

    let mut results = Vec::with_capacity(config.iterations + 1);
    results.push(baseline.clone());

    for i in 0..config.iterations {
        let knobs = TunerKnobs::random(&mut rng, &config.ranges);
        let result = evaluate_knobs(&knobs, foods, &config.cases, max_items);

        let is_best = results.iter().all(|r| result.cmp_score(r).is_gt());
        if is_best {
            info!(
                iteration = i + 1,
                error = result.mean_calorie_error,
                coverage = result.mean_protein_coverage,
                knobs = %result.knobs.display(),
                "new best"
            );
        }

        results.push(result);
    }

    results.sort_by(|a, b| b.cmp_score(a));
    let mut pareto_indices = pareto_frontier(&results);
    info!(size = pareto_indices.len(), "pareto frontier");

    if let Some(hc_config) = &config.hill_climb {
        let mut refined = Vec::new();
        for &idx in &pareto_indices {
            let original = &results[idx];
            let climbed = hill_climb(original, foods, &config.cases, &config.ranges, hc_config);
            if original.is_dominated_by(&climbed) {
                refined.push(climbed);
            }
        }

        info!(improved = refined.len(), "hill climbing done");
        if !refined.is_empty() {
            results.extend(refined);
            results.sort_by(|a, b| b.cmp_score(a));
            pareto_indices = pareto_frontier(&results);
        }
    }

    let balanced_idx = select_balanced(&results, &pareto_indices);

    TunerResults {
        results,
        baseline,
        pareto_indices,
        balanced_idx,
    }
}
