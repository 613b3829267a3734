use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::http::routes::pages::optional;
use crate::state::AppState;
use crate::views::forms::{self, ContactFormValues};
use crate::views::layout;
use commons_infra::rest::{DataApiError, NewContactMessage};

#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    pub sent: Option<String>,
}

#[derive(Debug, Error)]
pub enum ContactPageError {
    #[error("data api error: {0}")]
    DataApi(#[from] DataApiError),
}

pub async fn form(Query(params): Query<ContactQuery>) -> Html<String> {
    let mut body = String::new();
    if params.sent.is_some() {
        body.push_str(&layout::alert(
            "success",
            "Thank you. Your message has been received.",
        ));
    }
    body.push_str(&forms::contact_form(&ContactFormValues::default(), None));
    Html(layout::page("Contact", &body))
}

pub async fn create(
    State(state): State<AppState>,
    Form(values): Form<ContactFormValues>,
) -> Result<Response, ContactPageError> {
    if values.message.trim().is_empty() {
        let body = forms::contact_form(&values, Some("Please enter a message."));
        return Ok((StatusCode::BAD_REQUEST, Html(layout::page("Contact", &body))).into_response());
    }

    let record = NewContactMessage {
        name: optional(&values.name),
        email: optional(&values.email),
        message: values.message.trim().to_string(),
    };
    state.data_api.create_contact(&record).await?;
    Ok(Redirect::to("/contact?sent=1").into_response())
}

impl IntoResponse for ContactPageError {
    fn into_response(self) -> Response {
        warn!(error = %self, "contact page error");
        let body = Html(layout::error_page(
            "Contact",
            "Failed to send message. Please try again.",
        ));
        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}
