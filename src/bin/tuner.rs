use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use meal_planner_rs::error::Result;
use meal_planner_rs::storage::{CsvFoodCatalog, FoodCatalog};
use meal_planner_rs::tuner::{
    print_pareto_frontier, print_topk, profile_grid, run_tuner, write_best_json, write_csv,
    HillClimbConfig, KnobRanges, TunerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "tuner")]
#[command(about = "Calibrates the ranking weights of the meal planner")]
struct Args {
    /// Number of random search iterations
    #[arg(long, default_value = "200")]
    iters: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Food catalog CSV
    #[arg(long, default_value = "foods.csv")]
    catalog: PathBuf,

    /// Items per meal while evaluating
    #[arg(long, default_value = "4")]
    max_items: usize,

    /// Output CSV file for all results
    #[arg(long, default_value = "tuner_results.csv")]
    csv: PathBuf,

    /// Output JSON file for the chosen weights (loadable as a planner config)
    #[arg(long, default_value = "tuner_best.json")]
    json: PathBuf,

    /// Number of top results to display
    #[arg(long, default_value = "10")]
    topk: usize,

    /// Disable hill climbing refinement
    #[arg(long)]
    no_hill_climb: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let foods = CsvFoodCatalog::new(args.catalog.clone()).get_all_foods()?;
    println!("Loaded {} foods from {:?}", foods.len(), args.catalog);

    let config = TunerConfig {
        iterations: args.iters,
        seed: args.seed,
        ranges: KnobRanges {
            max_items: args.max_items,
            ..KnobRanges::default()
        },
        cases: profile_grid(),
        hill_climb: (!args.no_hill_climb).then(HillClimbConfig::default),
    };
    println!("Evaluating against {} synthetic profiles", config.cases.len());

    let tuner_results = run_tuner(&config, &foods);

    print_pareto_frontier(
        &tuner_results.results,
        &tuner_results.pareto_indices,
        tuner_results.balanced_idx,
    );
    print_topk(&tuner_results.results, args.topk);

    let best = tuner_results.best();
    let baseline = &tuner_results.baseline;

    println!();
    println!("=== Comparison: Chosen vs Baseline ===");
    println!(
        "Baseline: error={:.1} kcal coverage={:.3}",
        baseline.mean_calorie_error, baseline.mean_protein_coverage
    );
    println!(
        "Chosen:   error={:.1} kcal coverage={:.3}",
        best.mean_calorie_error, best.mean_protein_coverage
    );
    println!(
        "Change:   error {:+.1} kcal  coverage {:+.3}",
        best.mean_calorie_error - baseline.mean_calorie_error,
        best.mean_protein_coverage - baseline.mean_protein_coverage
    );
    println!();

    write_csv(&tuner_results.results, &args.csv)?;
    println!("Wrote all results to {:?}", args.csv);

    write_best_json(best, args.max_items, &args.json)?;
    println!("Wrote chosen weights to {:?}", args.json);

    Ok(())
}
