use std::fmt::Display;
use std::future::Future;

use tracing::{error, info, info_span, Instrument};

/// Runs one stage of a run inside its own span, logging when it starts, when
/// it returns and why it failed.
pub async fn traced<T, E, F>(operation: &'static str, future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display
{
    let span = info_span!("stage", operation);

    async move {
        info!("Entering {operation}");

        let result = future.await;

        match &result {
            Ok(_) => info!("{operation} returned"),
            Err(error) => error!("{operation} failed: {error}")
        }

        result
    }
    .instrument(span)
    .await
}
