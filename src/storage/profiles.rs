use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{PlannerError, Result};
use crate::models::UserProfile;

/// Resolves a user id to the profile used for planning.
pub trait ProfileProvider {
    fn get_profile(&self, user_id: &str) -> Result<UserProfile>;
}

impl ProfileProvider for HashMap<String, UserProfile> {
    fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.get(user_id)
            .cloned()
            .ok_or_else(|| PlannerError::ProfileNotFound(user_id.to_string()))
    }
}

/// Profiles from a JSON object keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct JsonProfileProvider {
    profiles: HashMap<String, UserProfile>,
}

impl JsonProfileProvider {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let profiles: HashMap<String, UserProfile> = serde_json::from_str(&content)?;
        Ok(Self { profiles })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileProvider for JsonProfileProvider {
    fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.profiles.get_profile(user_id)
    }
}
