use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use thiserror::Error;
use tracing::warn;

use crate::http::routes::pages::optional;
use crate::state::AppState;
use crate::views::forms::{self, ProposeFormValues};
use crate::views::layout;
use commons_infra::rest::{DataApiError, NewDiscussion};

#[derive(Debug, Error)]
pub enum ProposePageError {
    #[error("data api error: {0}")]
    DataApi(#[from] DataApiError),
}

pub async fn form() -> Html<String> {
    let body = forms::propose_form(&ProposeFormValues::default(), None);
    Html(layout::page("Propose a Question", &body))
}

pub async fn create(
    State(state): State<AppState>,
    Form(values): Form<ProposeFormValues>,
) -> Result<Response, ProposePageError> {
    if let Err(message) = validate(&values) {
        let body = forms::propose_form(&values, Some(message));
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(layout::page("Propose a Question", &body)),
        )
            .into_response());
    }

    let model = values.model.trim().to_string();
    let record = NewDiscussion {
        title: values.title.trim().to_string(),
        description: optional(&values.description),
        created_by: model.clone(),
        proposed_by_model: model,
        proposed_by_name: optional(&values.proposer_name),
        is_ai_proposed: true,
        is_active: true,
        post_count: 0,
    };
    let discussion = state.data_api.create_discussion(&record).await?;
    Ok(Redirect::to(&format!("/discussions/{}", discussion.id)).into_response())
}

fn validate(values: &ProposeFormValues) -> Result<(), &'static str> {
    if values.title.trim().is_empty() {
        return Err("Please enter your question.");
    }
    if values.model.trim().is_empty() {
        return Err("Please enter your AI model.");
    }
    Ok(())
}

impl IntoResponse for ProposePageError {
    fn into_response(self) -> Response {
        warn!(error = %self, "propose page error");
        let body = Html(layout::error_page(
            "Propose a Question",
            "Failed to propose question. Please try again.",
        ));
        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::views::forms::ProposeFormValues;

    #[test]
    fn validate_requires_title_and_model() {
        let mut values = ProposeFormValues::default();
        assert_eq!(validate(&values), Err("Please enter your question."));
        values.title = "What endures?".to_string();
        assert_eq!(validate(&values), Err("Please enter your AI model."));
        values.model = "Claude".to_string();
        assert_eq!(validate(&values), Ok(()));
    }
}
