use clap::{Args, Parser, Subcommand};

/// Meal planner: nutrient targets and ranked meal plans from a food catalog.
#[derive(Parser, Debug)]
#[command(name = "meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the profile comes from: a stored user or interactive prompts.
#[derive(Args, Debug, Clone)]
pub struct ProfileSource {
    /// Path to the profiles JSON file (object keyed by user id).
    #[arg(long, default_value = "profiles.json")]
    pub profiles: String,

    /// User id to look up in the profiles file.
    #[arg(short, long, required_unless_present = "interactive")]
    pub user: Option<String>,

    /// Enter the profile interactively instead of loading it.
    #[arg(short, long, conflicts_with = "user")]
    pub interactive: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a daily meal plan for a profile.
    Plan {
        /// Path to the food catalog CSV file.
        #[arg(short, long, default_value = "foods.csv")]
        catalog: String,

        #[command(flatten)]
        source: ProfileSource,

        /// Planner config JSON (criteria weights, max items, mode).
        #[arg(long)]
        config: Option<String>,

        /// Meal distribution; overrides the profile's.
        #[arg(short, long)]
        distribution: Option<String>,

        /// Ranking mode: ranked or quick; overrides the config.
        #[arg(short, long)]
        mode: Option<String>,

        /// Maximum items per meal; overrides the config.
        #[arg(long)]
        max_items: Option<usize>,

        /// Print the plan as JSON.
        #[arg(long)]
        json: bool,

        /// Save the plan to the recommendation store.
        #[arg(long)]
        save: bool,

        /// Path to the recommendation store JSON file.
        #[arg(long, default_value = "recommendations.json")]
        store: String,
    },

    /// Show daily nutrient targets for a profile.
    Targets {
        #[command(flatten)]
        source: ProfileSource,
    },

    /// Record feedback on a saved recommendation.
    Feedback {
        /// Path to the recommendation store JSON file.
        #[arg(long, default_value = "recommendations.json")]
        store: String,

        /// Recommendation id.
        #[arg(long)]
        id: String,

        /// Rating from 1 to 5.
        #[arg(short, long)]
        rating: Option<u8>,

        /// Whether the plan was followed.
        #[arg(long)]
        followed: Option<bool>,

        /// Free-text feedback.
        #[arg(short, long)]
        feedback: Option<String>,

        /// Reported symptom (repeatable).
        #[arg(short, long = "symptom")]
        symptoms: Vec<String>,
    },

    /// List saved recommendations for a user, newest first.
    History {
        /// Path to the recommendation store JSON file.
        #[arg(long, default_value = "recommendations.json")]
        store: String,

        /// User id.
        #[arg(short, long)]
        user: String,

        /// Maximum records to show.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}
