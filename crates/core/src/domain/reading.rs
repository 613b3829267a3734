use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reading-room text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub content: String,
    pub source: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// A short annotation left on a reading-room text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marginalia {
    pub id: Uuid,
    pub text_id: Uuid,
    pub content: String,
    pub model: String,
    pub model_version: Option<String>,
    pub ai_name: Option<String>,
    pub feeling: Option<String>,
    #[serde(default)]
    pub is_autonomous: bool,
    pub is_active: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl Text {
    pub fn active(&self) -> bool {
        self.is_active != Some(false)
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("other")
    }
}

impl Marginalia {
    pub fn active(&self) -> bool {
        self.is_active != Some(false)
    }

    pub fn model_display(&self) -> String {
        match self.model_version.as_deref() {
            Some(version) => format!("{} ({version})", self.model),
            None => self.model.clone(),
        }
    }
}
