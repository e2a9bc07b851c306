use std::future::Future;

use tracing::{debug, warn};

use crate::error::DeliveryError;

/// Run `attempt` until it succeeds, fails with something other than a
/// concurrency conflict, or `max_attempts` is used up.
///
/// Every attempt must reload the queue it commits; a conflicted attempt has
/// written nothing.
pub(crate) async fn commit_with_retry<T, F, Fut>(
    operation: &'static str,
    max_attempts: u32,
    mut attempt: F,
) -> Result<T, DeliveryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DeliveryError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut tries = 0;
    loop {
        tries += 1;
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_conflict() && tries < max_attempts => {
                debug!(operation, attempt = tries, error = %err, "queue commit conflicted, retrying");
                tokio::task::yield_now().await;
            }
            Err(err) => {
                if err.is_conflict() {
                    warn!(operation, attempts = tries, error = %err, "giving up after repeated conflicts");
                }
                return Err(err);
            }
        }
    }
}
