use clap::Parser;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use meal_planner_rs::cli::{Cli, Command, ProfileSource};
use meal_planner_rs::config::{load_config, PlannerConfig, PlanningMode};
use meal_planner_rs::error::{PlannerError, Result};
use meal_planner_rs::interface::{
    collect_user_profile, display_daily_plan, display_history, display_targets, prompt_yes_no,
};
use meal_planner_rs::models::{FeedbackUpdate, NamedVariant, UserProfile};
use meal_planner_rs::planner::{compute_targets, plan_for_profile};
use meal_planner_rs::storage::{
    CsvFoodCatalog, FoodCatalog, JsonProfileProvider, JsonRecommendationStore, ProfileProvider,
    RecommendationStore,
};

/// User id recorded for interactively entered profiles.
const INTERACTIVE_USER: &str = "interactive";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            catalog,
            source,
            config,
            distribution,
            mode,
            max_items,
            json,
            save,
            store,
        } => {
            let mut planner_config = match config {
                Some(path) => load_config(path)?,
                None => PlannerConfig::default(),
            };
            if let Some(mode) = mode {
                planner_config.mode = PlanningMode::resolve(Some(&mode));
            }
            if let Some(max_items) = max_items {
                planner_config.max_items = max_items;
            }

            let (user_id, mut profile) = load_profile(&source)?;
            if distribution.is_some() {
                profile.meal_distribution = distribution;
            }

            cmd_plan(&catalog, &user_id, &profile, &planner_config, json, save, &store)
        }
        Command::Targets { source } => {
            let (_, profile) = load_profile(&source)?;
            display_targets(&compute_targets(&profile));
            Ok(())
        }
        Command::Feedback {
            store,
            id,
            rating,
            followed,
            feedback,
            symptoms,
        } => {
            let update = FeedbackUpdate {
                rating,
                followed,
                feedback,
                symptoms: (!symptoms.is_empty()).then_some(symptoms),
            };
            cmd_feedback(&store, &id, update)
        }
        Command::History { store, user, limit } => {
            let records = JsonRecommendationStore::new(store).history(&user, limit)?;
            display_history(&records);
            Ok(())
        }
    }
}

/// Resolve the profile from the profiles file or from prompts.
fn load_profile(source: &ProfileSource) -> Result<(String, UserProfile)> {
    if source.interactive {
        return Ok((INTERACTIVE_USER.to_string(), collect_user_profile()?));
    }

    let user_id = source
        .user
        .clone()
        .ok_or_else(|| PlannerError::InvalidInput("--user or --interactive is required".into()))?;
    let profiles = JsonProfileProvider::load(&source.profiles)?;
    let profile = profiles.get_profile(&user_id)?;
    Ok((user_id, profile))
}

/// Generate, show and optionally save a daily plan.
fn cmd_plan(
    catalog_path: &str,
    user_id: &str,
    profile: &UserProfile,
    config: &PlannerConfig,
    json: bool,
    save: bool,
    store_path: &str,
) -> Result<()> {
    let foods = CsvFoodCatalog::new(catalog_path).get_all_foods()?;
    if !json {
        println!("Loaded {} foods", foods.len());
    }

    let (targets, plan) = plan_for_profile(profile, &foods, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_targets(&targets);
        display_daily_plan(&plan);
    }

    // Interactive sessions are asked; otherwise --save decides.
    let save = if save {
        true
    } else if !json && user_id == INTERACTIVE_USER && plan.item_count() > 0 {
        prompt_yes_no("Save this recommendation?", false)?
    } else {
        false
    };

    if save {
        let mut store = JsonRecommendationStore::new(store_path);
        let id = store.save_recommendation(user_id, &plan, &targets, &config.criteria_weights)?;
        if json {
            eprintln!("Saved recommendation {}", id);
        } else {
            println!("Saved recommendation {}", id);
        }
    }

    Ok(())
}

/// Apply feedback to a saved recommendation.
fn cmd_feedback(store_path: &str, id: &str, update: FeedbackUpdate) -> Result<()> {
    if update.is_empty() {
        println!("Nothing to record. Pass --rating, --followed, --feedback or --symptom.");
        return Ok(());
    }

    let id = Uuid::parse_str(id)
        .map_err(|e| PlannerError::InvalidInput(format!("invalid recommendation id '{}': {}", id, e)))?;

    let mut store = JsonRecommendationStore::new(store_path);
    store.update_feedback(id, update)?;
    println!("Feedback recorded for {}", id);

    Ok(())
}
