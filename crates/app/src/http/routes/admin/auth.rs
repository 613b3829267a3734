use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::http::middleware::admin_auth;
use crate::state::AppState;
use crate::views::{admin as views, layout};

const DEFAULT_REMEMBER_DAYS: i64 = 7;
const MAX_REMEMBER_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
pub struct AdminLoginForm {
    #[serde(default)]
    pub password: String,
    pub remember_days: Option<i64>,
}

#[derive(Debug, Error)]
pub enum AdminLoginError {
    #[error("admin auth not configured")]
    MissingConfig,
    #[error("invalid admin password hash")]
    InvalidHash,
    #[error("token issuance failed")]
    TokenIssue,
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(payload): Form<AdminLoginForm>,
) -> Result<Response, AdminLoginError> {
    let password = payload.password.trim();
    if password.is_empty() {
        return Ok(login_rejected("Please enter the password."));
    }

    let hash = state
        .config
        .admin_password_hash
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or(AdminLoginError::MissingConfig)?;
    let secret = state
        .config
        .admin_token_secret
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or(AdminLoginError::MissingConfig)?;

    let parsed_hash = PasswordHash::new(hash).map_err(|_| AdminLoginError::InvalidHash)?;
    let verifier = Argon2::default();
    if verifier
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        warn!("admin login rejected");
        return Ok(login_rejected("Invalid password."));
    }

    let Ok(remember_days) = resolve_remember_days(payload.remember_days) else {
        return Ok(login_rejected("Stay-signed-in must be 7 or 30 days."));
    };
    let max_age_secs = remember_days.saturating_mul(24 * 60 * 60);
    let token =
        admin_auth::issue_token(secret, max_age_secs).map_err(|_| AdminLoginError::TokenIssue)?;
    let secure = admin_auth::is_https(&headers);
    let cookie = admin_auth::build_cookie_value(&token, max_age_secs, secure);

    info!(remember_days, "admin session issued");
    let response = Redirect::to("/admin").into_response();
    Ok(admin_auth::attach_cookie(response, cookie))
}

pub async fn logout(headers: HeaderMap) -> Response {
    let secure = admin_auth::is_https(&headers);
    let cookie = admin_auth::clear_cookie_value(secure);
    let response = Redirect::to("/admin").into_response();
    admin_auth::attach_cookie(response, cookie)
}

fn login_rejected(message: &str) -> Response {
    let body = Html(layout::page("Admin", &views::login_page(Some(message))));
    (StatusCode::UNAUTHORIZED, body).into_response()
}

fn resolve_remember_days(value: Option<i64>) -> Result<i64, ()> {
    let days = value.unwrap_or(DEFAULT_REMEMBER_DAYS);
    match days {
        DEFAULT_REMEMBER_DAYS | MAX_REMEMBER_DAYS => Ok(days),
        _ => Err(()),
    }
}

impl IntoResponse for AdminLoginError {
    fn into_response(self) -> Response {
        warn!(error = %self, "admin login error");
        let status = match self {
            AdminLoginError::MissingConfig | AdminLoginError::InvalidHash => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AdminLoginError::TokenIssue => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Html(layout::error_page("Admin", &self.to_string()));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_remember_days;

    #[test]
    fn resolve_remember_days_defaults_to_seven() {
        assert_eq!(resolve_remember_days(None).unwrap(), 7);
    }

    #[test]
    fn resolve_remember_days_accepts_thirty() {
        assert_eq!(resolve_remember_days(Some(30)).unwrap(), 30);
    }

    #[test]
    fn resolve_remember_days_rejects_other_values() {
        assert!(resolve_remember_days(Some(1)).is_err());
    }
}
