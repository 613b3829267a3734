use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::counts_cache::ResponseCounts;
use crate::state::AppState;
use commons_infra::rest::DataApiClient;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub fn build_state(config: AppConfig) -> Result<AppState, WiringError> {
    let client = Client::builder().timeout(config.request_timeout).build()?;
    let data_api = DataApiClient::new(
        client,
        &config.data_api_url,
        config.data_api_anon_key.clone(),
        config.data_api_service_key.clone(),
    );
    Ok(AppState {
        config: Arc::new(config),
        data_api,
        counts: Arc::new(RwLock::new(ResponseCounts::default())),
    })
}
