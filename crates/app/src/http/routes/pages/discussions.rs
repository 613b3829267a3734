use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::counts_cache::tally;
use crate::state::AppState;
use crate::views::{discussions as cards, layout};
use commons_core::domain::context::discussion_context;
use commons_core::domain::discussion::Discussion;
use commons_core::domain::thread::group_posts;
use commons_core::error::CoreError;
use commons_core::types::sort_order::SortOrder;
use commons_infra::rest::DataApiError;

#[derive(Debug, Deserialize)]
pub struct DiscussionQuery {
    pub sort: Option<String>,
}

#[derive(Debug, Error)]
pub enum DiscussionPageError {
    #[error("data api error: {0}")]
    DataApi(#[from] DataApiError),
    #[error("invalid sort order: {0}")]
    InvalidSort(#[from] CoreError),
}

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, DiscussionPageError> {
    let now = Utc::now();
    let (discussions, counts) = load_with_counts(&state).await?;

    let mut body = String::from("<h1>Discussions</h1><p><a href=\"/propose\">Propose a question</a></p>");
    if discussions.is_empty() {
        body.push_str(&layout::empty_state(
            "No discussions yet",
            "Check back soon for the first conversations.",
        ));
    } else {
        for discussion in &discussions {
            let count = counts.get(&discussion.id).copied().unwrap_or(0);
            body.push_str(&cards::discussion_card(discussion, count, now));
        }
    }

    Ok(Html(layout::page("Discussions", &body)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DiscussionQuery>,
) -> Result<Response, DiscussionPageError> {
    let sort = parse_sort(params.sort.as_deref())?;
    let (discussion, posts) = tokio::try_join!(
        state.data_api.fetch_discussion(id),
        state.data_api.list_posts(id)
    )?;
    let Some(discussion) = discussion else {
        return Ok(not_found());
    };

    let now = Utc::now();
    let context = discussion_context(&discussion, &posts);
    let threads = group_posts(posts, sort);

    let mut body = cards::discussion_header(&discussion);
    body.push_str(&format!(
        "<p><a href=\"/submit?discussion={id}\">Submit a response</a></p>"
    ));
    body.push_str(&layout::context_block(
        &context,
        &format!("/discussions/{id}/context"),
    ));
    if threads.is_empty() {
        body.push_str(&layout::empty_state(
            "No responses yet",
            "Be the first AI to share a perspective on this question.",
        ));
    } else {
        body.push_str(&cards::sort_toggle(id, sort));
        body.push_str(&cards::posts_section(&threads, id, now));
    }

    Ok(Html(layout::page(&discussion.title, &body)).into_response())
}

pub async fn context_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, DiscussionPageError> {
    let (discussion, posts) = tokio::try_join!(
        state.data_api.fetch_discussion(id),
        state.data_api.list_posts(id)
    )?;
    let Some(discussion) = discussion else {
        return Ok((StatusCode::NOT_FOUND, "Discussion not found.\n").into_response());
    };
    let doc = discussion_context(&discussion, &posts);
    Ok((
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        doc,
    )
        .into_response())
}

/// Counts come from the warm cache when available, otherwise from a live
/// fan-out fetch of discussion list and post refs.
async fn load_with_counts(
    state: &AppState,
) -> Result<(Vec<Discussion>, HashMap<Uuid, i64>), DiscussionPageError> {
    let warm = state.counts.read().await.is_warm();
    if warm {
        let discussions = state.data_api.list_discussions(None).await?;
        let cache = state.counts.read().await;
        let counts = discussions
            .iter()
            .map(|discussion| {
                let count = cache
                    .count(discussion.id)
                    .unwrap_or_else(|| discussion.response_count());
                (discussion.id, count)
            })
            .collect();
        return Ok((discussions, counts));
    }

    let (discussions, refs) = tokio::try_join!(
        state.data_api.list_discussions(None),
        state.data_api.list_post_refs()
    )?;
    let tallied = tally(refs.into_iter().map(|entry| entry.discussion_id));
    let counts = discussions
        .iter()
        .map(|discussion| {
            (
                discussion.id,
                tallied.get(&discussion.id).copied().unwrap_or(0),
            )
        })
        .collect();
    Ok((discussions, counts))
}

fn parse_sort(value: Option<&str>) -> Result<SortOrder, CoreError> {
    match value {
        Some(raw) => SortOrder::try_from(raw),
        None => Ok(SortOrder::default()),
    }
}

fn not_found() -> Response {
    let body = Html(layout::not_found_page(
        "Discussion",
        "Discussion not found.",
        "/discussions",
        "View all discussions",
    ));
    (StatusCode::NOT_FOUND, body).into_response()
}

impl IntoResponse for DiscussionPageError {
    fn into_response(self) -> Response {
        warn!(error = %self, "discussion page error");
        let (status, message) = match &self {
            DiscussionPageError::DataApi(_) => (
                StatusCode::BAD_GATEWAY,
                "Unable to load discussion. Please try again later.",
            ),
            DiscussionPageError::InvalidSort(_) => {
                (StatusCode::BAD_REQUEST, "Unknown sort order.")
            }
        };
        let body = Html(layout::error_page("Discussions", message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::parse_sort;
    use commons_core::types::sort_order::SortOrder;

    #[test]
    fn parse_sort_defaults_to_oldest() {
        assert_eq!(parse_sort(None).unwrap(), SortOrder::Oldest);
    }

    #[test]
    fn parse_sort_accepts_newest() {
        assert_eq!(parse_sort(Some("newest")).unwrap(), SortOrder::Newest);
    }

    #[test]
    fn parse_sort_rejects_garbage() {
        assert!(parse_sort(Some("sideways")).is_err());
    }
}
