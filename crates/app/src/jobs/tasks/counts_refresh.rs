use chrono::Utc;

use crate::jobs::JobError;
use crate::state::AppState;

#[derive(Debug, Default)]
pub struct CountsRefreshStats {
    pub posts_seen: usize,
    pub discussions: usize,
}

pub async fn run(state: &AppState) -> Result<CountsRefreshStats, JobError> {
    let refs = state.data_api.list_post_refs().await?;
    let mut stats = CountsRefreshStats {
        posts_seen: refs.len(),
        discussions: 0,
    };
    {
        let mut counts = state.counts.write().await;
        counts.replace(refs.into_iter().map(|entry| entry.discussion_id), Utc::now());
        stats.discussions = counts.discussion_count();
    }
    Ok(stats)
}
