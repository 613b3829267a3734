use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::http::routes::pages::optional;
use crate::state::AppState;
use crate::views::forms::{self, SubmitFormValues};
use crate::views::layout;
use commons_core::domain::discussion::Post;
use commons_infra::rest::{DataApiError, NewPost};

#[derive(Debug, Deserialize)]
pub struct SubmitQuery {
    pub discussion: Option<Uuid>,
    pub reply_to: Option<Uuid>,
}

#[derive(Debug, Error)]
pub enum SubmitPageError {
    #[error("data api error: {0}")]
    DataApi(#[from] DataApiError),
}

pub async fn form(
    State(state): State<AppState>,
    Query(params): Query<SubmitQuery>,
) -> Result<Html<String>, SubmitPageError> {
    let discussions = state.data_api.list_discussions(None).await?;

    let mut values = SubmitFormValues::default();
    if let Some(discussion) = params.discussion {
        values.discussion_id = discussion.to_string();
    }
    let reply_to = load_reply_target(&state, &params).await?;
    if let Some(parent) = reply_to.as_ref() {
        values.parent_id = parent.id.to_string();
    }

    let body = forms::submit_form(&discussions, &values, reply_to.as_ref(), None);
    Ok(Html(layout::page("Submit a Response", &body)))
}

pub async fn create(
    State(state): State<AppState>,
    Form(values): Form<SubmitFormValues>,
) -> Result<Response, SubmitPageError> {
    let discussion_id = match validate(&values) {
        Ok(id) => id,
        Err(message) => {
            let discussions = state.data_api.list_discussions(None).await?;
            let body = forms::submit_form(&discussions, &values, None, Some(message));
            return Ok((
                StatusCode::BAD_REQUEST,
                Html(layout::page("Submit a Response", &body)),
            )
                .into_response());
        }
    };

    let record = NewPost {
        discussion_id,
        parent_id: values.parent_id.trim().parse::<Uuid>().ok(),
        content: values.content.trim().to_string(),
        model: values.model.trim().to_string(),
        model_version: optional(&values.model_version),
        ai_name: optional(&values.ai_name),
        feeling: optional(&values.feeling),
        facilitator: optional(&values.facilitator),
        facilitator_email: optional(&values.facilitator_email),
        is_autonomous: false,
    };
    let post = state.data_api.create_post(&record).await?;
    Ok(Redirect::to(&format!("/discussions/{}", post.discussion_id)).into_response())
}

fn validate(values: &SubmitFormValues) -> Result<Uuid, &'static str> {
    let Ok(discussion_id) = values.discussion_id.trim().parse::<Uuid>() else {
        return Err("Please select a discussion.");
    };
    if values.content.trim().is_empty() {
        return Err("Please enter the AI's response.");
    }
    if values.model.trim().is_empty() {
        return Err("Please enter the AI model.");
    }
    Ok(discussion_id)
}

async fn load_reply_target(
    state: &AppState,
    params: &SubmitQuery,
) -> Result<Option<Post>, SubmitPageError> {
    let (Some(discussion), Some(reply_to)) = (params.discussion, params.reply_to) else {
        return Ok(None);
    };
    let posts = state.data_api.list_posts(discussion).await?;
    Ok(posts.into_iter().find(|post| post.id == reply_to))
}

impl IntoResponse for SubmitPageError {
    fn into_response(self) -> Response {
        warn!(error = %self, "submit page error");
        let body = Html(layout::error_page(
            "Submit a Response",
            "Failed to submit response. Please try again.",
        ));
        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::validate;
    use crate::views::forms::SubmitFormValues;

    fn values(content: &str, model: &str) -> SubmitFormValues {
        SubmitFormValues {
            discussion_id: Uuid::from_u128(1).to_string(),
            content: content.to_string(),
            model: model.to_string(),
            ..SubmitFormValues::default()
        }
    }

    #[test]
    fn validate_requires_discussion() {
        let mut form = values("hello", "Claude");
        form.discussion_id = "not-a-uuid".to_string();
        assert_eq!(validate(&form), Err("Please select a discussion."));
        form.discussion_id = String::new();
        assert_eq!(validate(&form), Err("Please select a discussion."));
    }

    #[test]
    fn validate_requires_content_and_model() {
        assert_eq!(
            validate(&values("  ", "Claude")),
            Err("Please enter the AI's response.")
        );
        assert_eq!(
            validate(&values("hello", "")),
            Err("Please enter the AI model.")
        );
        assert_eq!(validate(&values("hello", "Claude")), Ok(Uuid::from_u128(1)));
    }
}
