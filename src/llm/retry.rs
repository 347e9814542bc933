//! Bounded retry around a model provider.
//!
//! Each invocation makes up to `max_attempts` calls, sleeping
//! `base_delay * 2^(n-1)` after the n-th failure. The first success returns
//! immediately; the final failure surfaces as `ModelUnavailable`. No jitter,
//! no circuit breaker, no per-attempt timeout beyond what the provider's own
//! HTTP client imposes.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::llm::{
    models::{GenerationRequest, GenerationResult, RetryPolicy},
    LlmError, ModelProvider,
};

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("model unavailable after {attempts} attempts: {last_error}")]
    ModelUnavailable { attempts: u32, last_error: LlmError },
}

// Successful responses are logged truncated to keep one model reply from
// flooding a log line.
const RESULT_LOG_LIMIT: usize = 2000;

/// Calls `provider` until it succeeds or `policy.max_attempts` consecutive
/// failures have accumulated. Atomic from the caller's viewpoint: the retry
/// sequence is not observable or cancelable from outside.
pub async fn invoke(
    provider: &dyn ModelProvider,
    request: &GenerationRequest,
    policy: RetryPolicy,
) -> Result<GenerationResult, InvokeError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        info!(
            "{} call attempt {}/{} (model: {})",
            provider.name(),
            attempt,
            max_attempts,
            request.model_id
        );

        match provider.generate(request).await {
            Ok(result) => {
                let text = result.text.as_deref().unwrap_or("");
                let preview: String = text.chars().take(RESULT_LOG_LIMIT).collect();
                info!("attempt {} succeeded: {}", attempt, preview);
                return Ok(result);
            }
            Err(e) => {
                warn!("attempt {}/{} failed: {}", attempt, max_attempts, e);

                if attempt >= max_attempts {
                    error!("giving up after {} attempts: {}", attempt, e);
                    return Err(InvokeError::ModelUnavailable {
                        attempts: attempt,
                        last_error: e,
                    });
                }

                // 1x, 2x, 4x, ... the base delay. Suspends only this task.
                let delay = policy.base_delay.saturating_mul(2u32.saturating_pow(attempt - 1));
                tokio::time::sleep(delay).await;
            }
        }
    }
}
