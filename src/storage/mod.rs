mod catalog;
mod profiles;
mod recommendations;

pub use catalog::{load_foods_csv, save_foods_csv, CsvFoodCatalog, FoodCatalog};
pub use profiles::{JsonProfileProvider, ProfileProvider};
pub use recommendations::{
    apply_feedback, build_record, InMemoryRecommendationStore, JsonRecommendationStore,
    RecommendationStore,
};
