use std::future::Future;
use std::time::Duration;

use yadirect_core::DirectError;

/// Chunk size for spreading `total` ids over `sessions` requests, capped at `cap`.
///
/// Returns `ceil(total / sessions)` bounded to `1..=cap`.
#[must_use]
pub fn partition_size(total: usize, sessions: usize, cap: usize) -> usize {
    total.div_ceil(sessions.max(1)).clamp(1, cap.max(1))
}

/// Run `call` over `inputs` in sequential waves of at most `limit` futures.
///
/// Every wave is joined before the next one starts. When `deadline` is set it
/// applies to each wave separately: futures still pending when it expires
/// resolve to `RequestTimeout(capability)` and finished ones keep their result.
///
/// Returns per-input outcomes in input order together with the size of each wave.
pub async fn run_in_waves<T, R, F, Fut>(
    inputs: Vec<T>,
    limit: usize,
    deadline: Option<Duration>,
    capability: &str,
    call: F,
) -> (Vec<Result<R, DirectError>>, Vec<usize>)
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, DirectError>>,
{
    let limit = limit.max(1);
    let mut outcomes = Vec::with_capacity(inputs.len());
    let mut wave_sizes = Vec::new();
    let mut pending = inputs.into_iter().peekable();

    while pending.peek().is_some() {
        let wave: Vec<T> = pending.by_ref().take(limit).collect();
        wave_sizes.push(wave.len());
        #[cfg(feature = "tracing")]
        tracing::debug!(wave = wave_sizes.len(), size = wave.len(), capability, "starting wave");

        let expires_at = deadline.map(|d| tokio::time::Instant::now() + d);
        let tasks = wave.into_iter().map(|input| {
            let fut = call(input);
            async move {
                match expires_at {
                    Some(at) => tokio::time::timeout_at(at, fut)
                        .await
                        .unwrap_or_else(|_| Err(DirectError::request_timeout(capability))),
                    None => fut.await,
                }
            }
        });
        outcomes.extend(futures::future::join_all(tasks).await);
    }
    (outcomes, wave_sizes)
}
