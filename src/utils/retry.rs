// src/utils/retry.rs

//! Bounded retry for async operations.

use std::future::Future;

/// Run `operation` up to `max_attempts` times, returning the first
/// success or the last error.
///
/// Retries happen immediately, with no backoff. `max_attempts` of 1
/// means a single try with no retry; each failed non-final attempt is
/// logged at warn level. The operation is a closure so every attempt
/// gets a fresh future.
pub async fn retry<T, E, F, Fut>(max_attempts: usize, mut operation: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < max_attempts => {
                log::warn!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt,
                    max_attempts,
                    error
                );
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = Cell::new(0usize);
        let result = retry(3, || {
            let call = calls.get() + 1;
            calls.set(call);
            async move {
                if call < 3 {
                    Err(format!("failure {}", call))
                } else {
                    Ok(call)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_first_success_stops_retrying() {
        let calls = Cell::new(0usize);
        let result = retry(3, || {
            calls.set(calls.get() + 1);
            async { Ok::<_, String>("done") }
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let calls = Cell::new(0usize);
        let result: Result<(), String> = retry(3, || {
            let call = calls.get() + 1;
            calls.set(call);
            async move { Err(format!("failure {}", call)) }
        })
        .await;

        assert_eq!(result, Err("failure 3".to_string()));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_single_attempt_never_retries() {
        let calls = Cell::new(0usize);
        let result: Result<(), String> = retry(1, || {
            let call = calls.get() + 1;
            calls.set(call);
            async move { Err(format!("failure {}", call)) }
        })
        .await;

        assert_eq!(result, Err("failure 1".to_string()));
        assert_eq!(calls.get(), 1);
    }
}
