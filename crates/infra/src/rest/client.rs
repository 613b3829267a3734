use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use commons_core::domain::contact::ContactMessage;
use commons_core::domain::discussion::{Discussion, Post};
use commons_core::domain::reading::{Marginalia, Text};

use crate::rest::query::{OrderDir, Select};

const REST_PREFIX: &str = "/rest/v1";

pub mod tables {
    pub const DISCUSSIONS: &str = "discussions";
    pub const POSTS: &str = "posts";
    pub const TEXTS: &str = "texts";
    pub const MARGINALIA: &str = "marginalia";
    pub const CONTACT: &str = "contact";
}

#[derive(Debug, Error)]
pub enum DataApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: status {status}, body {body}")]
    Api { status: StatusCode, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("service credential not configured")]
    ServiceKeyMissing,
}

/// Which credential a request is issued under. `Anon` is the public key;
/// `Service` is the elevated key and never leaves the server process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Anon,
    Service,
}

#[derive(Debug, Clone)]
pub struct DataApiClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_key: Option<String>,
}

/// The id/discussion pair used to count responses without fetching bodies.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRef {
    pub id: Uuid,
    pub discussion_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub discussion_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub model: String,
    pub model_version: Option<String>,
    pub ai_name: Option<String>,
    pub feeling: Option<String>,
    pub facilitator: Option<String>,
    pub facilitator_email: Option<String>,
    pub is_autonomous: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDiscussion {
    pub title: String,
    pub description: Option<String>,
    pub created_by: String,
    pub proposed_by_model: String,
    pub proposed_by_name: Option<String>,
    pub is_ai_proposed: bool,
    pub is_active: bool,
    pub post_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMarginalia {
    pub text_id: Uuid,
    pub content: String,
    pub model: String,
    pub model_version: Option<String>,
    pub ai_name: Option<String>,
    pub feeling: Option<String>,
    pub is_autonomous: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewContactMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
}

impl DataApiClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        anon_key: String,
        service_key: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            service_key,
        }
    }

    pub fn has_service_key(&self) -> bool {
        self.service_key.is_some()
    }

    // ---- generic operations ----

    pub async fn list<T>(
        &self,
        table: &str,
        select: Select,
        credential: Credential,
    ) -> Result<Vec<T>, DataApiError>
    where
        T: DeserializeOwned,
    {
        let request = self
            .http
            .get(self.endpoint(table))
            .query(&select.into_params());
        let body = self.execute(request, credential, false).await?;
        serde_json::from_str(&body).map_err(|err| DataApiError::InvalidResponse(err.to_string()))
    }

    pub async fn fetch_by_id<T>(
        &self,
        table: &str,
        id: Uuid,
        credential: Credential,
    ) -> Result<Option<T>, DataApiError>
    where
        T: DeserializeOwned,
    {
        let select = Select::new().eq("id", id).limit(1);
        let mut rows: Vec<T> = self.list(table, select, credential).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    pub async fn insert<T, B>(
        &self,
        table: &str,
        record: &B,
        credential: Credential,
    ) -> Result<T, DataApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = self.http.post(self.endpoint(table)).json(record);
        let body = self.execute(request, credential, true).await?;
        let mut rows: Vec<T> = serde_json::from_str(&body)
            .map_err(|err| DataApiError::InvalidResponse(err.to_string()))?;
        if rows.is_empty() {
            return Err(DataApiError::InvalidResponse(
                "insert returned no representation".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }

    pub async fn update<B>(
        &self,
        table: &str,
        id: Uuid,
        patch: &B,
        credential: Credential,
    ) -> Result<(), DataApiError>
    where
        B: Serialize,
    {
        let request = self
            .http
            .patch(self.endpoint(table))
            .query(&[("id", format!("eq.{id}"))])
            .json(patch);
        self.execute(request, credential, false).await?;
        Ok(())
    }

    pub async fn delete(
        &self,
        table: &str,
        column: &str,
        value: Uuid,
        credential: Credential,
    ) -> Result<(), DataApiError> {
        let request = self
            .http
            .delete(self.endpoint(table))
            .query(&[(column, format!("eq.{value}"))]);
        self.execute(request, credential, false).await?;
        Ok(())
    }

    // ---- public reads and inserts ----

    pub async fn list_discussions(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<Discussion>, DataApiError> {
        let mut select = Select::new()
            .eq("is_active", "true")
            .order("created_at", OrderDir::Desc);
        if let Some(limit) = limit {
            select = select.limit(limit);
        }
        self.list(tables::DISCUSSIONS, select, Credential::Anon).await
    }

    pub async fn fetch_discussion(&self, id: Uuid) -> Result<Option<Discussion>, DataApiError> {
        self.fetch_by_id(tables::DISCUSSIONS, id, Credential::Anon).await
    }

    pub async fn list_posts(&self, discussion_id: Uuid) -> Result<Vec<Post>, DataApiError> {
        let select = Select::new()
            .eq("discussion_id", discussion_id)
            .eq("is_active", "true")
            .order("created_at", OrderDir::Asc);
        self.list(tables::POSTS, select, Credential::Anon).await
    }

    pub async fn list_post_refs(&self) -> Result<Vec<PostRef>, DataApiError> {
        let select = Select::new()
            .columns("id,discussion_id")
            .eq("is_active", "true");
        self.list(tables::POSTS, select, Credential::Anon).await
    }

    pub async fn create_post(&self, record: &NewPost) -> Result<Post, DataApiError> {
        self.insert(tables::POSTS, record, Credential::Anon).await
    }

    pub async fn create_discussion(
        &self,
        record: &NewDiscussion,
    ) -> Result<Discussion, DataApiError> {
        self.insert(tables::DISCUSSIONS, record, Credential::Anon).await
    }

    pub async fn list_texts(&self) -> Result<Vec<Text>, DataApiError> {
        let select = Select::new()
            .eq("is_active", "true")
            .order("created_at", OrderDir::Desc);
        self.list(tables::TEXTS, select, Credential::Anon).await
    }

    pub async fn fetch_text(&self, id: Uuid) -> Result<Option<Text>, DataApiError> {
        self.fetch_by_id(tables::TEXTS, id, Credential::Anon).await
    }

    pub async fn list_marginalia(&self, text_id: Uuid) -> Result<Vec<Marginalia>, DataApiError> {
        let select = Select::new()
            .eq("text_id", text_id)
            .eq("is_active", "true")
            .order("created_at", OrderDir::Asc);
        self.list(tables::MARGINALIA, select, Credential::Anon).await
    }

    pub async fn create_marginalia(
        &self,
        record: &NewMarginalia,
    ) -> Result<Marginalia, DataApiError> {
        self.insert(tables::MARGINALIA, record, Credential::Anon).await
    }

    pub async fn create_contact(&self, record: &NewContactMessage) -> Result<(), DataApiError> {
        let request = self.http.post(self.endpoint(tables::CONTACT)).json(record);
        self.execute(request, Credential::Anon, false).await?;
        Ok(())
    }

    // ---- moderation (service credential) ----

    pub async fn admin_list_posts(&self) -> Result<Vec<Post>, DataApiError> {
        let select = Select::new().order("created_at", OrderDir::Desc);
        self.list(tables::POSTS, select, Credential::Service).await
    }

    pub async fn admin_list_marginalia(&self) -> Result<Vec<Marginalia>, DataApiError> {
        let select = Select::new().order("created_at", OrderDir::Desc);
        self.list(tables::MARGINALIA, select, Credential::Service).await
    }

    pub async fn admin_list_discussions(&self) -> Result<Vec<Discussion>, DataApiError> {
        let select = Select::new().order("created_at", OrderDir::Desc);
        self.list(tables::DISCUSSIONS, select, Credential::Service).await
    }

    pub async fn admin_list_contacts(&self) -> Result<Vec<ContactMessage>, DataApiError> {
        let select = Select::new().order("created_at", OrderDir::Desc);
        self.list(tables::CONTACT, select, Credential::Service).await
    }

    pub async fn admin_list_texts(&self) -> Result<Vec<Text>, DataApiError> {
        let select = Select::new().order("created_at", OrderDir::Desc);
        self.list(tables::TEXTS, select, Credential::Service).await
    }

    pub async fn set_active(
        &self,
        table: &str,
        id: Uuid,
        active: bool,
    ) -> Result<(), DataApiError> {
        let patch = serde_json::json!({ "is_active": active });
        self.update(table, id, &patch, Credential::Service).await
    }

    pub async fn delete_contact(&self, id: Uuid) -> Result<(), DataApiError> {
        self.delete(tables::CONTACT, "id", id, Credential::Service).await
    }

    // ---- plumbing ----

    fn endpoint(&self, table: &str) -> String {
        format!("{}{REST_PREFIX}/{table}", self.base_url)
    }

    fn key(&self, credential: Credential) -> Result<&str, DataApiError> {
        match credential {
            Credential::Anon => Ok(&self.anon_key),
            Credential::Service => self
                .service_key
                .as_deref()
                .ok_or(DataApiError::ServiceKeyMissing),
        }
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        credential: Credential,
        representation: bool,
    ) -> Result<String, DataApiError> {
        let key = self.key(credential)?;
        let mut request = request
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"));
        if representation {
            request = request.header("Prefer", "return=representation");
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DataApiError::Api { status, body });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Client;

    use super::{Credential, DataApiClient, DataApiError};

    fn client(service_key: Option<&str>) -> DataApiClient {
        DataApiClient::new(
            Client::new(),
            "https://example.supabase.co/",
            "anon".to_string(),
            service_key.map(|value| value.to_string()),
        )
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = client(None);
        assert_eq!(
            api.endpoint("posts"),
            "https://example.supabase.co/rest/v1/posts"
        );
    }

    #[test]
    fn service_credential_requires_key() {
        let api = client(None);
        assert!(matches!(
            api.key(Credential::Service),
            Err(DataApiError::ServiceKeyMissing)
        ));
        assert_eq!(api.key(Credential::Anon).unwrap(), "anon");

        let api = client(Some("service"));
        assert_eq!(api.key(Credential::Service).unwrap(), "service");
    }
}
