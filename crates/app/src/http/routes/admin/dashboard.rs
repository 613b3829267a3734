use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::http::middleware::admin_auth;
use crate::state::AppState;
use crate::views::admin::{self as views, ActiveFilter, DashboardFilters, DashboardView};
use crate::views::layout;
use commons_infra::rest::DataApiError;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub posts: Option<String>,
    pub marginalia: Option<String>,
    pub discussions: Option<String>,
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("admin auth not configured")]
    MissingConfig,
    #[error("data api error: {0}")]
    DataApi(#[from] DataApiError),
}

/// The session gate: without a valid session this renders the login form,
/// with one it loads the four moderation lists concurrently and renders the
/// dashboard.
pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DashboardQuery>,
) -> Result<Response, DashboardError> {
    if !state.config.admin_configured() {
        return Err(DashboardError::MissingConfig);
    }
    if !admin_auth::session_valid(&state, &headers) {
        let body = Html(layout::page("Admin", &views::login_page(None)));
        return Ok(body.into_response());
    }

    let (posts, marginalia, discussions, contacts, texts) = tokio::try_join!(
        state.data_api.admin_list_posts(),
        state.data_api.admin_list_marginalia(),
        state.data_api.admin_list_discussions(),
        state.data_api.admin_list_contacts(),
        state.data_api.admin_list_texts(),
    )?;

    let discussion_titles: HashMap<Uuid, String> = discussions
        .iter()
        .map(|discussion| (discussion.id, discussion.title.clone()))
        .collect();
    let text_titles: HashMap<Uuid, String> = texts
        .iter()
        .map(|text| (text.id, text.title.clone()))
        .collect();

    let view = DashboardView {
        posts: &posts,
        marginalia: &marginalia,
        discussions: &discussions,
        contacts: &contacts,
        discussion_titles: &discussion_titles,
        text_titles: &text_titles,
        filters: DashboardFilters {
            posts: ActiveFilter::parse(params.posts.as_deref()),
            marginalia: ActiveFilter::parse(params.marginalia.as_deref()),
            discussions: ActiveFilter::parse(params.discussions.as_deref()),
        },
        now: Utc::now(),
    };
    let body = Html(layout::page("Admin", &views::dashboard(&view)));
    Ok(body.into_response())
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        warn!(error = %self, "admin dashboard error");
        let (status, message) = match &self {
            DashboardError::MissingConfig => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            DashboardError::DataApi(DataApiError::ServiceKeyMissing) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            DashboardError::DataApi(_) => (
                StatusCode::BAD_GATEWAY,
                "Unable to load the dashboard. Please try again later.".to_string(),
            ),
        };
        let body = Html(layout::error_page("Admin", &message));
        (status, body).into_response()
    }
}
