use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::planner::calculations::round_to;
use crate::tuner::evaluation::EvaluationResult;

/// Write every result as one CSV row, best first.
pub fn write_csv(results: &[EvaluationResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "protein_density",
        "fiber_density",
        "meal_suitability",
        "mean_calorie_error",
        "mean_protein_coverage",
        "mean_items",
    ])?;

    for (i, result) in results.iter().enumerate() {
        let w = result.knobs.weights();
        wtr.write_record([
            (i + 1).to_string(),
            format!("{:.3}", w.protein_density),
            format!("{:.3}", w.fiber_density),
            format!("{:.3}", w.meal_suitability),
            format!("{:.1}", result.mean_calorie_error),
            format!("{:.3}", result.mean_protein_coverage),
            format!("{:.2}", result.mean_items),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the chosen weights as JSON.
///
/// The `criteria_weights` and `max_items` keys load directly as a planner
/// config; `metrics` and `per_profile` are ignored there.
pub fn write_best_json(best: &EvaluationResult, max_items: usize, path: &Path) -> Result<()> {
    let w = best.knobs.weights();
    let json = serde_json::json!({
        "criteria_weights": {
            "protein_density": round_to(w.protein_density, 3),
            "fiber_density": round_to(w.fiber_density, 3),
            "meal_suitability": round_to(w.meal_suitability, 3),
        },
        "max_items": max_items,
        "mode": "ranked",
        "metrics": {
            "mean_calorie_error": round_to(best.mean_calorie_error, 1),
            "mean_protein_coverage": round_to(best.mean_protein_coverage, 3),
            "mean_items": round_to(best.mean_items, 2),
        },
        "per_profile": best.per_profile.iter().map(|r| {
            serde_json::json!({
                "profile": r.label,
                "target_calories": r.target_calories,
                "actual_calories": r.actual_calories,
                "protein_coverage": round_to(r.protein_coverage(), 3),
                "items": r.items,
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print the top-k results.
pub fn print_topk(results: &[EvaluationResult], k: usize) {
    println!("\n=== Top {} Results ===\n", k.min(results.len()));

    for (i, result) in results.iter().take(k).enumerate() {
        println!(
            "#{}: error={:.1} kcal coverage={:.3} items={:.1}",
            i + 1,
            result.mean_calorie_error,
            result.mean_protein_coverage,
            result.mean_items
        );
        println!("    {}", result.knobs.display());
    }
}

/// Print the Pareto frontier, marking the balanced pick.
pub fn print_pareto_frontier(
    results: &[EvaluationResult],
    pareto_indices: &[usize],
    balanced_idx: Option<usize>,
) {
    println!(
        "\n=== Pareto Frontier ({} non-dominated) ===\n",
        pareto_indices.len()
    );

    for &idx in pareto_indices {
        let result = &results[idx];
        let label = if balanced_idx == Some(idx) {
            "  <- balanced"
        } else {
            ""
        };
        println!(
            "error={:.1} kcal coverage={:.3}  {}{}",
            result.mean_calorie_error,
            result.mean_protein_coverage,
            result.knobs.display(),
            label
        );
    }
}
