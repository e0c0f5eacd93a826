//! Retrying factory decorator

use async_trait::async_trait;

use aquifer_core::{ResourceFactory, Result};

use super::BackoffStrategy;

/// Configuration for creation retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt
    max_attempts: u32,
    /// Backoff schedule for delays between retries
    backoff: BackoffStrategy,
}

impl RetryConfig {
    /// Create a new retry configuration.
    ///
    /// `max_attempts` counts retries, not calls: 0 means fail on the
    /// first error, 3 means up to four creation attempts in total.
    pub fn new(max_attempts: u32, backoff: BackoffStrategy) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Get the maximum number of retries
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Get the backoff schedule
    pub fn backoff(&self) -> &BackoffStrategy {
        &self.backoff
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(3, BackoffStrategy::default())
    }
}

/// A `ResourceFactory` decorator that retries failed creation attempts
/// with exponential backoff.
///
/// Liveness checks and disposal pass straight through to the wrapped
/// factory; only `create` is intercepted.
pub struct RetryingFactory<F> {
    inner: F,
    config: RetryConfig,
}

impl<F> RetryingFactory<F> {
    /// Wrap a factory with retry behavior
    pub fn new(inner: F, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// Get the wrapped factory
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: ResourceFactory> ResourceFactory for RetryingFactory<F> {
    type Resource = F::Resource;

    async fn create(&self) -> Result<Self::Resource> {
        let mut attempt = 0u32;
        loop {
            match self.inner.create().await {
                Ok(resource) => return Ok(resource),
                Err(err) => {
                    if attempt >= self.config.max_attempts() {
                        return Err(err);
                    }
                    let delay = self.config.backoff().delay_for(attempt);
                    tracing::warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "resource creation failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn validate(&self, resource: &Self::Resource) -> bool {
        self.inner.validate(resource).await
    }

    async fn dispose(&self, resource: Self::Resource) {
        self.inner.dispose(resource).await
    }
}
