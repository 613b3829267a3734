use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::counts_cache::ResponseCounts;
use commons_infra::rest::DataApiClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub data_api: DataApiClient,
    pub counts: Arc<RwLock<ResponseCounts>>,
}
