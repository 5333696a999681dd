use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Batch rejected: {0}")]
    Rejected(String)
}
