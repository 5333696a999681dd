use thiserror::Error;

use crate::engine::IngestionError;
use crate::relocation::RelocationError;

#[derive(Debug, Error)]
pub enum RunFailure {
    #[error("Ingestion aborted: {0}")]
    Ingestion(#[from] IngestionError),
    #[error("Relocation failed: {0}")]
    Relocation(#[from] RelocationError)
}
