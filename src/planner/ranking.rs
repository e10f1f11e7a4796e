use crate::config::CriteriaWeights;
use crate::models::ScoredFood;

/// Number of TOPSIS criteria.
const CRITERIA: usize = 3;

fn criteria(food: &ScoredFood) -> [f64; CRITERIA] {
    [
        food.protein_density,
        food.estimated_fiber_density,
        food.meal_suitability_score,
    ]
}

fn distance(a: &[f64; CRITERIA], b: &[f64; CRITERIA]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Closeness to the ideal solution, one score per candidate.
///
/// Columns are vector-normalized (a zero column stays zero), weighted, then
/// each row is scored `s_worst / (s_best + s_worst)`; a row at distance zero
/// from both ideals scores 0.
pub fn topsis_scores(matrix: &[[f64; CRITERIA]], weights: [f64; CRITERIA]) -> Vec<f64> {
    if matrix.is_empty() {
        return Vec::new();
    }

    let mut norms = [0.0; CRITERIA];
    for row in matrix {
        for (norm, value) in norms.iter_mut().zip(row) {
            *norm += value * value;
        }
    }
    for norm in norms.iter_mut() {
        *norm = norm.sqrt();
    }

    let weighted: Vec<[f64; CRITERIA]> = matrix
        .iter()
        .map(|row| {
            let mut out = [0.0; CRITERIA];
            for j in 0..CRITERIA {
                let normalized = if norms[j] > 0.0 { row[j] / norms[j] } else { 0.0 };
                out[j] = normalized * weights[j];
            }
            out
        })
        .collect();

    let mut ideal_best = [f64::NEG_INFINITY; CRITERIA];
    let mut ideal_worst = [f64::INFINITY; CRITERIA];
    for row in &weighted {
        for j in 0..CRITERIA {
            ideal_best[j] = ideal_best[j].max(row[j]);
            ideal_worst[j] = ideal_worst[j].min(row[j]);
        }
    }

    weighted
        .iter()
        .map(|row| {
            let s_best = distance(row, &ideal_best);
            let s_worst = distance(row, &ideal_worst);
            let total = s_best + s_worst;
            if total > 0.0 { s_worst / total } else { 0.0 }
        })
        .collect()
}

/// Assign TOPSIS scores and sort best first.
///
/// The sort is stable, so equal scores keep their incoming order.
pub fn rank_topsis<'a>(
    mut candidates: Vec<ScoredFood<'a>>,
    weights: &CriteriaWeights,
) -> Vec<ScoredFood<'a>> {
    let matrix: Vec<[f64; CRITERIA]> = candidates.iter().map(criteria).collect();
    let scores = topsis_scores(&matrix, weights.as_array());

    for (candidate, score) in candidates.iter_mut().zip(scores) {
        candidate.topsis_score = score;
    }

    candidates.sort_by(|a, b| b.topsis_score.total_cmp(&a.topsis_score));
    candidates
}

/// Sort by protein density plus estimated fiber density, best first (stable).
pub fn rank_by_nutrient_density<'a>(mut candidates: Vec<ScoredFood<'a>>) -> Vec<ScoredFood<'a>> {
    candidates.sort_by(|a, b| nutrient_density(b).total_cmp(&nutrient_density(a)));
    candidates
}

fn nutrient_density(food: &ScoredFood) -> f64 {
    food.protein_density + food.estimated_fiber_density
}
