//! Remote dispatch of rendered prompts
//!
//! One remote call per prompt. Calls are independent: a failed call never
//! aborts its siblings, and the result sequence always has one entry per
//! input prompt, in input order, no matter how dispatch interleaves.

use crate::config::PipelineConfig;
use crate::error::DispatchError;
use presswatch_domain::traits::TextGenerator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Caller-supplied retry policy composed around each remote call
///
/// Retries only failures worth re-attempting (timeouts, rate limits,
/// transport failures) with exponential backoff. Wrapping calls this way
/// leaves the dispatcher's ordering guarantees untouched.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first
    pub max_attempts: u32,

    /// Backoff before the second attempt; doubles each further attempt
    pub backoff_base: Duration,
}

impl RetryPolicy {
    /// Create a retry policy
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts,
            backoff_base,
        }
    }

    /// Backoff before the attempt after `attempt` (1-based) failed
    fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_base
            .saturating_mul(1u32 << attempt.saturating_sub(1).min(16))
    }
}

/// Shared cancellation flag for an in-flight batch
///
/// Cancelling stops new calls from being issued; already-completed
/// results stay valid and are still returned.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Create a fresh handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of remaining calls
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// True once cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Submits rendered prompts to the remote service
///
/// Parallelism is bounded by a semaphore; `parallelism = 1` degenerates
/// to strictly sequential dispatch. The provider seam is synchronous, so
/// each call runs on the blocking pool under a per-call timeout.
pub struct Dispatcher<P: TextGenerator> {
    provider: Arc<P>,
    call_timeout: Duration,
    parallelism: usize,
    retry: Option<RetryPolicy>,
    cancel: CancelHandle,
}

impl<P> Dispatcher<P>
where
    P: TextGenerator + Send + Sync + 'static,
{
    /// Create a dispatcher over a provider
    pub fn new(provider: P, config: &PipelineConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            call_timeout: config.dispatch_timeout(),
            parallelism: config.parallelism.max(1),
            retry: None,
            cancel: CancelHandle::new(),
        }
    }

    /// Wrap every call in a retry policy
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Handle for cancelling the remaining calls of a batch
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Dispatch one remote call per prompt
    ///
    /// Returns exactly one result per prompt, in prompt order.
    pub async fn dispatch(&self, prompts: Vec<String>) -> Vec<Result<String, DispatchError>> {
        let total = prompts.len();
        let semaphore = Arc::new(Semaphore::new(self.parallelism));
        let mut handles = Vec::with_capacity(total);

        for (idx, prompt) in prompts.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let provider = Arc::clone(&self.provider);
            let cancel = self.cancel.clone();
            let call_timeout = self.call_timeout;
            let retry = self.retry;

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return Err(DispatchError::Cancelled),
                };
                call_with_retry(provider, prompt, call_timeout, retry, cancel, idx).await
            }));
        }

        let mut results = Vec::with_capacity(total);
        for handle in handles {
            results.push(match handle.await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Dispatch worker panicked: {}", e);
                    Err(DispatchError::ServiceFailure(format!(
                        "worker task failed: {}",
                        e
                    )))
                }
            });
        }
        results
    }
}

/// Run one call, re-attempting per the policy
async fn call_with_retry<P>(
    provider: Arc<P>,
    prompt: String,
    call_timeout: Duration,
    retry: Option<RetryPolicy>,
    cancel: CancelHandle,
    idx: usize,
) -> Result<String, DispatchError>
where
    P: TextGenerator + Send + Sync + 'static,
{
    let max_attempts = retry.map_or(1, |p| p.max_attempts.max(1));
    let mut attempt = 0;

    loop {
        attempt += 1;
        if cancel.is_cancelled() {
            return Err(DispatchError::Cancelled);
        }

        match call_once(Arc::clone(&provider), prompt.clone(), call_timeout).await {
            Ok(reply) => return Ok(reply),
            Err(error) => {
                if attempt < max_attempts && error.is_retryable() {
                    let delay = retry.map(|p| p.backoff_for(attempt)).unwrap_or_default();
                    debug!(
                        "Call {} failed ({}), retrying in {:?} (attempt {}/{})",
                        idx + 1,
                        error,
                        delay,
                        attempt,
                        max_attempts
                    );
                    tokio::time::sleep(delay).await;
                } else {
                    return Err(error);
                }
            }
        }
    }
}

/// Run exactly one call against the provider under the timeout
async fn call_once<P>(
    provider: Arc<P>,
    prompt: String,
    call_timeout: Duration,
) -> Result<String, DispatchError>
where
    P: TextGenerator + Send + Sync + 'static,
{
    let worker = tokio::task::spawn_blocking(move || {
        provider
            .generate(&prompt)
            .map_err(|e| DispatchError::from_failure(&e))
    });

    match timeout(call_timeout, worker).await {
        Err(_) => Err(DispatchError::Timeout),
        Ok(Err(join)) => Err(DispatchError::ServiceFailure(format!(
            "worker task failed: {}",
            join
        ))),
        Ok(Ok(result)) => result,
    }
}
