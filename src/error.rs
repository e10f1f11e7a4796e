use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Food catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Recommendation not found: {0}")]
    RecommendationNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
