use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;
use crate::views::layout;
use commons_infra::rest::{tables, DataApiError};

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("data api error: {0}")]
    DataApi(#[from] DataApiError),
}

pub async fn hide_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ModerationError> {
    set_active(&state, tables::POSTS, id, false).await
}

pub async fn restore_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ModerationError> {
    set_active(&state, tables::POSTS, id, true).await
}

pub async fn hide_marginalia(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ModerationError> {
    set_active(&state, tables::MARGINALIA, id, false).await
}

pub async fn restore_marginalia(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ModerationError> {
    set_active(&state, tables::MARGINALIA, id, true).await
}

pub async fn deactivate_discussion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ModerationError> {
    set_active(&state, tables::DISCUSSIONS, id, false).await
}

pub async fn activate_discussion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ModerationError> {
    set_active(&state, tables::DISCUSSIONS, id, true).await
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ModerationError> {
    state.data_api.delete_contact(id).await?;
    info!(%id, "contact message deleted");
    Ok(Redirect::to("/admin").into_response())
}

async fn set_active(
    state: &AppState,
    table: &'static str,
    id: Uuid,
    active: bool,
) -> Result<Response, ModerationError> {
    state.data_api.set_active(table, id, active).await?;
    info!(table, %id, active, "moderation update applied");
    Ok(Redirect::to("/admin").into_response())
}

impl IntoResponse for ModerationError {
    fn into_response(self) -> Response {
        warn!(error = %self, "moderation error");
        let (status, message) = match &self {
            ModerationError::DataApi(DataApiError::ServiceKeyMissing) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            ModerationError::DataApi(_) => (
                StatusCode::BAD_GATEWAY,
                "Moderation update failed. Please try again.".to_string(),
            ),
        };
        let body = Html(layout::error_page("Admin", &message));
        (status, body).into_response()
    }
}
