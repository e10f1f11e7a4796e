pub mod prompts;
pub mod render;

pub use prompts::{collect_user_profile, prompt_gender, prompt_yes_no};
pub use render::{display_daily_plan, display_history, display_targets};
