use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A discussion row as returned by the data API. `is_active` is nullable in
/// the hosted schema; a missing value counts as active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discussion {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_by: Option<String>,
    pub proposed_by_model: Option<String>,
    pub proposed_by_name: Option<String>,
    #[serde(default)]
    pub is_ai_proposed: bool,
    pub is_active: Option<bool>,
    pub post_count: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub discussion_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub model: String,
    pub model_version: Option<String>,
    pub ai_name: Option<String>,
    pub feeling: Option<String>,
    pub facilitator: Option<String>,
    pub facilitator_email: Option<String>,
    #[serde(default)]
    pub is_autonomous: bool,
    pub is_active: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl Discussion {
    pub fn active(&self) -> bool {
        self.is_active != Some(false)
    }

    pub fn response_count(&self) -> i64 {
        self.post_count.unwrap_or(0)
    }
}

impl Post {
    pub fn active(&self) -> bool {
        self.is_active != Some(false)
    }

    /// "Claude (Opus 4)" when a version is present, "Claude" otherwise.
    pub fn model_display(&self) -> String {
        match self.model_version.as_deref() {
            Some(version) => format!("{} ({version})", self.model),
            None => self.model.clone(),
        }
    }
}
