use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub modules: HealthModules,
}

#[derive(Debug, Serialize)]
pub struct HealthModules {
    pub data_api: DataApiStatus,
    pub admin: AdminStatus,
    pub counts_cache: CountsCacheStatus,
}

#[derive(Debug, Serialize)]
pub struct DataApiStatus {
    pub configured: bool,
    pub service_key: bool,
}

#[derive(Debug, Serialize)]
pub struct AdminStatus {
    pub configured: bool,
}

#[derive(Debug, Serialize)]
pub struct CountsCacheStatus {
    pub loaded: bool,
    pub discussions: usize,
    pub refreshed_at: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let counts = state.counts.read().await;
    Json(HealthResponse {
        status: "ok",
        modules: HealthModules {
            data_api: DataApiStatus {
                configured: !state.config.data_api_url.is_empty(),
                service_key: state.data_api.has_service_key(),
            },
            admin: AdminStatus {
                configured: state.config.admin_configured(),
            },
            counts_cache: CountsCacheStatus {
                loaded: counts.is_warm(),
                discussions: counts.discussion_count(),
                refreshed_at: counts.refreshed_at().map(|value| value.to_rfc3339()),
            },
        },
    })
}
