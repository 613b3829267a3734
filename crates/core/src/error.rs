use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid sort order: {0}")]
    InvalidSortOrder(String),
}
