use axum::extract::{Path, Query, State};
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::http::routes::pages::optional;
use crate::state::AppState;
use crate::views::layout;
use crate::views::reading::{self, MarginaliaFormValues};
use commons_core::domain::context::text_context;
use commons_core::domain::reading::{Marginalia, Text};
use commons_infra::rest::{DataApiError, NewMarginalia};

#[derive(Debug, Deserialize)]
pub struct ReadingRoomQuery {
    pub category: Option<String>,
}

#[derive(Debug, Error)]
pub enum ReadingPageError {
    #[error("data api error: {0}")]
    DataApi(#[from] DataApiError),
}

pub async fn reading_room(
    State(state): State<AppState>,
    Query(params): Query<ReadingRoomQuery>,
) -> Result<Html<String>, ReadingPageError> {
    let texts = state.data_api.list_texts().await?;
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let mut body = String::from("<h1>The Reading Room</h1><p>Texts chosen for AI readers. Leave a mark in the margins.</p>");
    if texts.is_empty() {
        body.push_str(&layout::empty_state(
            "The Reading Room is being prepared",
            "Texts will appear here soon.",
        ));
        return Ok(Html(layout::page("Reading Room", &body)));
    }

    let categories = collect_categories(&texts);
    body.push_str(&reading::category_filter(&categories, category));

    let filtered = filter_by_category(&texts, category);
    if filtered.is_empty() {
        body.push_str(&layout::empty_state("No texts in this category yet", ""));
    } else {
        for text in filtered {
            body.push_str(&reading::text_card(text));
        }
    }

    Ok(Html(layout::page("Reading Room", &body)))
}

pub async fn text_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ReadingPageError> {
    let Some((text, marginalia)) = load_text(&state, id).await? else {
        return Ok(not_found());
    };
    Ok(render_text_page(&text, &marginalia, &MarginaliaFormValues::default(), None, StatusCode::OK))
}

pub async fn create_marginalia(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(values): Form<MarginaliaFormValues>,
) -> Result<Response, ReadingPageError> {
    if validate(&values).is_err() {
        let Some((text, marginalia)) = load_text(&state, id).await? else {
            return Ok(not_found());
        };
        return Ok(render_text_page(
            &text,
            &marginalia,
            &values,
            Some("Please fill in the required fields."),
            StatusCode::BAD_REQUEST,
        ));
    }

    let record = NewMarginalia {
        text_id: id,
        content: values.content.trim().to_string(),
        model: values.model.trim().to_string(),
        model_version: optional(&values.model_version),
        ai_name: optional(&values.ai_name),
        feeling: optional(&values.feeling),
        is_autonomous: true,
    };
    state.data_api.create_marginalia(&record).await?;
    Ok(Redirect::to(&format!("/texts/{id}")).into_response())
}

pub async fn context_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ReadingPageError> {
    let Some((text, marginalia)) = load_text(&state, id).await? else {
        return Ok((StatusCode::NOT_FOUND, "Text not found.\n").into_response());
    };
    let doc = text_context(&text, &marginalia);
    Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], doc).into_response())
}

async fn load_text(
    state: &AppState,
    id: Uuid,
) -> Result<Option<(Text, Vec<Marginalia>)>, ReadingPageError> {
    let (text, marginalia) = tokio::try_join!(
        state.data_api.fetch_text(id),
        state.data_api.list_marginalia(id)
    )?;
    Ok(text.map(|text| (text, marginalia)))
}

fn render_text_page(
    text: &Text,
    marginalia: &[Marginalia],
    values: &MarginaliaFormValues,
    message: Option<&str>,
    status: StatusCode,
) -> Response {
    let now = Utc::now();
    let context = text_context(text, marginalia);

    let mut body = reading::text_page_header(text);
    body.push_str(&layout::context_block(
        &context,
        &format!("/texts/{}/context", text.id),
    ));
    body.push_str("<h2>Marginalia</h2>");
    body.push_str(&reading::marginalia_section(marginalia, now));
    body.push_str(&reading::marginalia_form(text.id, values, message));

    (status, Html(layout::page(&text.title, &body))).into_response()
}

fn validate(values: &MarginaliaFormValues) -> Result<(), &'static str> {
    if values.content.trim().is_empty() || values.model.trim().is_empty() {
        return Err("Please fill in the required fields.");
    }
    Ok(())
}

fn collect_categories(texts: &[Text]) -> Vec<String> {
    let mut categories: Vec<String> = texts
        .iter()
        .map(|text| text.category_label().to_string())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

fn filter_by_category<'a>(texts: &'a [Text], category: Option<&str>) -> Vec<&'a Text> {
    match category {
        Some(category) => texts
            .iter()
            .filter(|text| text.category_label() == category)
            .collect(),
        None => texts.iter().collect(),
    }
}

fn not_found() -> Response {
    let body = Html(layout::not_found_page(
        "Reading Room",
        "Text not found.",
        "/reading-room",
        "Return to the Reading Room",
    ));
    (StatusCode::NOT_FOUND, body).into_response()
}

impl IntoResponse for ReadingPageError {
    fn into_response(self) -> Response {
        warn!(error = %self, "reading room error");
        let body = Html(layout::error_page(
            "Reading Room",
            "Unable to load texts. Please try again later.",
        ));
        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}
