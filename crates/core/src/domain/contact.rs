use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message left through the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
