use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::CriteriaWeights;
use crate::error::{PlannerError, Result};
use crate::models::{
    DailyPlan, FeedbackUpdate, MealRecommendationRecord, NutrientTargets, ALGORITHM_VERSION,
};

/// Where generated plans and their feedback are kept.
///
/// Failures are reported as `PersistenceFailure` and never retried here.
pub trait RecommendationStore {
    fn save_recommendation(
        &mut self,
        user_id: &str,
        plan: &DailyPlan,
        targets: &NutrientTargets,
        weights: &CriteriaWeights,
    ) -> Result<Uuid>;

    fn update_feedback(&mut self, id: Uuid, update: FeedbackUpdate) -> Result<()>;

    /// Newest first, at most `limit` records.
    fn history(&self, user_id: &str, limit: usize) -> Result<Vec<MealRecommendationRecord>>;
}

/// Snapshot a plan into a new record.
pub fn build_record(
    user_id: &str,
    plan: &DailyPlan,
    targets: &NutrientTargets,
    weights: &CriteriaWeights,
    now: DateTime<Utc>,
) -> MealRecommendationRecord {
    let whole = |v: f64| v.round().max(0.0) as u32;

    MealRecommendationRecord {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        daily_calories_target: whole(targets.calories),
        protein_target_g: whole(targets.protein_g),
        carbs_target_g: whole(targets.carbs_g),
        fat_target_g: whole(targets.fat_g),
        meal_plan: plan.to_json(),
        total_calories: plan.daily_totals.calories,
        total_protein_g: plan.daily_totals.protein_g,
        total_carbs_g: plan.daily_totals.carbs_g,
        total_fat_g: plan.daily_totals.fat_g,
        user_rating: None,
        user_followed: None,
        user_feedback: None,
        symptoms_reported: None,
        algorithm_version: ALGORITHM_VERSION.to_string(),
        criteria_weights: weights.as_named_map(),
        created_at: now,
        followed_at: None,
    }
}

/// Merge feedback into a record. Ratings must be 1-5.
pub fn apply_feedback(
    record: &mut MealRecommendationRecord,
    update: FeedbackUpdate,
    now: DateTime<Utc>,
) -> Result<()> {
    if let Some(rating) = update.rating {
        if !(1..=5).contains(&rating) {
            return Err(PlannerError::InvalidInput(format!(
                "rating must be between 1 and 5, got {}",
                rating
            )));
        }
        record.user_rating = Some(rating);
    }

    if let Some(followed) = update.followed {
        record.user_followed = Some(followed);
        record.followed_at = followed.then_some(now);
    }

    if let Some(feedback) = update.feedback {
        record.user_feedback = Some(feedback);
    }

    if let Some(symptoms) = update.symptoms {
        record.symptoms_reported = Some(symptoms);
    }

    Ok(())
}

fn recent_for_user(
    records: &[MealRecommendationRecord],
    user_id: &str,
    limit: usize,
) -> Vec<MealRecommendationRecord> {
    let mut matching: Vec<MealRecommendationRecord> = records
        .iter()
        .filter(|r| r.user_id == user_id)
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matching.truncate(limit);
    matching
}

fn find_mut(
    records: &mut [MealRecommendationRecord],
    id: Uuid,
) -> Result<&mut MealRecommendationRecord> {
    records
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| PlannerError::RecommendationNotFound(id.to_string()))
}

/// Store kept in memory for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryRecommendationStore {
    records: Vec<MealRecommendationRecord>,
}

impl RecommendationStore for InMemoryRecommendationStore {
    fn save_recommendation(
        &mut self,
        user_id: &str,
        plan: &DailyPlan,
        targets: &NutrientTargets,
        weights: &CriteriaWeights,
    ) -> Result<Uuid> {
        let record = build_record(user_id, plan, targets, weights, Utc::now());
        let id = record.id;
        self.records.push(record);
        Ok(id)
    }

    fn update_feedback(&mut self, id: Uuid, update: FeedbackUpdate) -> Result<()> {
        let record = find_mut(&mut self.records, id)?;
        apply_feedback(record, update, Utc::now())
    }

    fn history(&self, user_id: &str, limit: usize) -> Result<Vec<MealRecommendationRecord>> {
        Ok(recent_for_user(&self.records, user_id, limit))
    }
}

/// Store backed by a single pretty-printed JSON file.
///
/// The file is re-read and rewritten on every operation; a missing file is
/// an empty store. Writes go to a sibling `.tmp` file that is then renamed
/// over the store, so a failed write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonRecommendationStore {
    path: PathBuf,
}

impl JsonRecommendationStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<MealRecommendationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.failure(e))?;
        serde_json::from_str(&content).map_err(|e| self.failure(e))
    }

    fn save(&self, records: &[MealRecommendationRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records).map_err(|e| self.failure(e))?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| self.failure(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.failure(e))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn failure(&self, err: impl std::fmt::Display) -> PlannerError {
        PlannerError::PersistenceFailure(format!("{}: {}", self.path.display(), err))
    }
}

impl RecommendationStore for JsonRecommendationStore {
    fn save_recommendation(
        &mut self,
        user_id: &str,
        plan: &DailyPlan,
        targets: &NutrientTargets,
        weights: &CriteriaWeights,
    ) -> Result<Uuid> {
        let mut records = self.load()?;
        let record = build_record(user_id, plan, targets, weights, Utc::now());
        let id = record.id;
        records.push(record);
        self.save(&records)?;

        info!(%id, user_id, path = %self.path.display(), "saved meal recommendation");
        Ok(id)
    }

    fn update_feedback(&mut self, id: Uuid, update: FeedbackUpdate) -> Result<()> {
        let mut records = self.load()?;
        let record = find_mut(&mut records, id)?;
        apply_feedback(record, update, Utc::now())?;
        self.save(&records)?;

        info!(%id, "recorded recommendation feedback");
        Ok(())
    }

    fn history(&self, user_id: &str, limit: usize) -> Result<Vec<MealRecommendationRecord>> {
        Ok(recent_for_user(&self.load()?, user_id, limit))
    }
}
