use std::cmp::Ordering;

use crate::models::{FoodItem, UserProfile};
use crate::planner::plan_for_profile;
use crate::tuner::knobs::{KnobRanges, TunerKnobs};

/// One synthetic profile of the evaluation grid.
#[derive(Debug, Clone)]
pub struct ProfileCase {
    pub label: String,
    pub profile: UserProfile,
}

/// Grid of profiles covering gender, body weight, activity and goal.
pub fn profile_grid() -> Vec<ProfileCase> {
    let mut cases = Vec::new();

    for gender in ["male", "female"] {
        for weight_kg in [55.0, 75.0, 95.0] {
            for activity in ["sedentary", "moderate", "active"] {
                for goal in ["maintenance", "weight_loss"] {
                    let height_cm = if gender == "male" { 178.0 } else { 165.0 };
                    cases.push(ProfileCase {
                        label: format!("{}-{:.0}kg-{}-{}", gender, weight_kg, activity, goal),
                        profile: UserProfile {
                            gender: Some(gender.to_string()),
                            weight_kg: Some(weight_kg),
                            height_cm: Some(height_cm),
                            age: Some(35),
                            activity_level: Some(activity.to_string()),
                            goal: Some(goal.to_string()),
                            ..UserProfile::default()
                        },
                    });
                }
            }
        }
    }

    cases
}

/// Plan quality for one profile.
#[derive(Debug, Clone)]
pub struct ProfileResult {
    pub label: String,
    pub target_calories: u32,
    pub actual_calories: u32,
    pub protein_target_g: f64,
    pub protein_actual_g: f64,
    pub items: usize,
}

impl ProfileResult {
    pub fn calorie_error(&self) -> f64 {
        (self.actual_calories as f64 - self.target_calories as f64).abs()
    }

    /// Protein actual over target, capped at 1.
    pub fn protein_coverage(&self) -> f64 {
        if self.protein_target_g <= 0.0 {
            return 1.0;
        }
        (self.protein_actual_g / self.protein_target_g).min(1.0)
    }
}

/// Aggregated result of one knob setting across the grid.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub knobs: TunerKnobs,
    /// Mean absolute calorie error in kcal (lower is better).
    pub mean_calorie_error: f64,
    /// Mean capped protein coverage (higher is better).
    pub mean_protein_coverage: f64,
    pub mean_items: f64,
    pub per_profile: Vec<ProfileResult>,
}

impl EvaluationResult {
    /// `Greater` when `self` is better: lower calorie error first, then
    /// higher protein coverage.
    pub fn cmp_score(&self, other: &Self) -> Ordering {
        other
            .mean_calorie_error
            .total_cmp(&self.mean_calorie_error)
            .then_with(|| self.mean_protein_coverage.total_cmp(&other.mean_protein_coverage))
    }

    /// True when `other` is at least as good on both metrics and better on one.
    pub fn is_dominated_by(&self, other: &Self) -> bool {
        let no_worse = other.mean_calorie_error <= self.mean_calorie_error
            && other.mean_protein_coverage >= self.mean_protein_coverage;
        let better = other.mean_calorie_error < self.mean_calorie_error
            || other.mean_protein_coverage > self.mean_protein_coverage;
        no_worse && better
    }
}

/// Plan one profile with the given knobs.
pub fn evaluate_profile(
    foods: &[FoodItem],
    case: &ProfileCase,
    knobs: &TunerKnobs,
    max_items: usize,
) -> ProfileResult {
    let config = knobs.to_config(max_items);
    let (_, plan) = plan_for_profile(&case.profile, foods, &config);

    ProfileResult {
        label: case.label.clone(),
        target_calories: plan.daily_calories_target,
        actual_calories: plan.daily_totals.calories,
        protein_target_g: plan.daily_protein_target,
        protein_actual_g: plan.daily_totals.protein_g,
        items: plan.item_count(),
    }
}

/// Evaluate knobs over every case.
pub fn evaluate_knobs(
    knobs: &TunerKnobs,
    foods: &[FoodItem],
    cases: &[ProfileCase],
    max_items: usize,
) -> EvaluationResult {
    let per_profile: Vec<ProfileResult> = cases
        .iter()
        .map(|case| evaluate_profile(foods, case, knobs, max_items))
        .collect();

    let n = per_profile.len().max(1) as f64;
    let mean_calorie_error = per_profile.iter().map(|r| r.calorie_error()).sum::<f64>() / n;
    let mean_protein_coverage = per_profile.iter().map(|r| r.protein_coverage()).sum::<f64>() / n;
    let mean_items = per_profile.iter().map(|r| r.items as f64).sum::<f64>() / n;

    EvaluationResult {
        knobs: *knobs,
        mean_calorie_error,
        mean_protein_coverage,
        mean_items,
        per_profile,
    }
}

/// Indices of non-dominated results.
pub fn pareto_frontier(results: &[EvaluationResult]) -> Vec<usize> {
    (0..results.len())
        .filter(|&i| {
            !results
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && results[i].is_dominated_by(other))
        })
        .collect()
}

/// Frontier member with the smallest worst-case sacrifice.
///
/// Each metric is scaled to [0, 1] over the frontier (0 = best seen);
/// the pick minimizes the larger of the two.
pub fn select_balanced(results: &[EvaluationResult], frontier: &[usize]) -> Option<usize> {
    if frontier.is_empty() {
        return None;
    }

    let (err_min, err_max) = min_max(frontier.iter().map(|&i| results[i].mean_calorie_error));
    let (cov_min, cov_max) = min_max(frontier.iter().map(|&i| results[i].mean_protein_coverage));

    let sacrifice = |i: usize| {
        let r = &results[i];
        let err = scaled(r.mean_calorie_error, err_min, err_max);
        let cov = 1.0 - scaled(r.mean_protein_coverage, cov_min, cov_max);
        err.max(cov)
    };

    frontier
        .iter()
        .copied()
        .min_by(|&a, &b| sacrifice(a).total_cmp(&sacrifice(b)))
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn scaled(value: f64, lo: f64, hi: f64) -> f64 {
    if hi - lo <= f64::EPSILON {
        0.0
    } else {
        (value - lo) / (hi - lo)
    }
}

/// Hill-climbing settings.
#[derive(Debug, Clone)]
pub struct HillClimbConfig {
    /// Multipliers tried on each knob per round.
    pub factors: Vec<f64>,
    pub max_rounds: usize,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            factors: vec![0.8, 0.9, 1.1, 1.25],
            max_rounds: 10,
        }
    }
}

/// Coordinate-wise refinement: keep the first perturbation that scores
/// better, stop after a round without improvement.
pub fn hill_climb(
    start: &EvaluationResult,
    foods: &[FoodItem],
    cases: &[ProfileCase],
    ranges: &KnobRanges,
    config: &HillClimbConfig,
) -> EvaluationResult {
    let mut best = start.clone();

    for _ in 0..config.max_rounds {
        let mut improved = false;

        for knob_idx in 0..TunerKnobs::NUM_KNOBS {
            for &factor in &config.factors {
                let knobs = best.knobs.perturb(knob_idx, factor, ranges);
                if knobs == best.knobs {
                    continue;
                }
                let candidate = evaluate_knobs(&knobs, foods, cases, ranges.max_items);
                if candidate.cmp_score(&best) == Ordering::Greater {
                    best = candidate;
                    improved = true;
                }
            }
        }

        if !improved {
            break;
        }
    }

    best
}
