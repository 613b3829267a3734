pub mod scheduler;
pub mod tasks;

use thiserror::Error;
use tracing::{info, warn};

use crate::state::AppState;
use commons_infra::rest::DataApiError;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("data api error: {0}")]
    DataApi(#[from] DataApiError),
}

pub async fn start(state: AppState) -> Result<(), JobError> {
    let counts_interval = state.config.counts_refresh_interval;
    if counts_interval.as_secs() == 0 {
        info!("counts refresh disabled; worker idle");
        return Ok(());
    }

    let counts_state = state.clone();
    scheduler::run_interval("counts_refresh", counts_interval, move || {
        let state = counts_state.clone();
        async move {
            match tasks::counts_refresh::run(&state).await {
                Ok(stats) => info!(?stats, "counts refresh complete"),
                Err(err) => warn!(error = %err, "counts refresh failed"),
            }
            Ok(())
        }
    })
    .await
}
