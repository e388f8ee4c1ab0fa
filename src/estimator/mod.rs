//! Salary estimation backends
//!
//! The estimator is an opaque text-in/text-out collaborator: it receives a
//! natural-language prompt and returns whatever the model replied. It may be
//! slow and it may fail; callers decide what an empty reply means.

mod command;
mod factory;
mod gemini;

pub use command::CommandEstimator;
pub use factory::create_estimator;
pub use gemini::GeminiEstimator;

use crate::error::WagecastResult;
use async_trait::async_trait;

/// Text generation service producing a salary estimate from a prompt
#[async_trait]
pub trait Estimator: Send + Sync {
    /// Generate a reply for the prompt
    async fn generate(&self, prompt: &str) -> WagecastResult<String>;

    /// Human-readable provider name for display
    fn name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::error::WagecastError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted estimator that counts how often it was called
    #[derive(Debug, Default)]
    pub struct MockEstimator {
        response: Option<String>,
        error: Option<String>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl MockEstimator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(mut self, response: impl Into<String>) -> Self {
            self.response = Some(response.into());
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Estimator for MockEstimator {
        async fn generate(&self, _prompt: &str) -> WagecastResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            if let Some(ref error) = self.error {
                return Err(WagecastError::estimation("mock", error));
            }

            self.response
                .clone()
                .ok_or_else(|| WagecastError::estimation("mock", "No mock response configured"))
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }
}
