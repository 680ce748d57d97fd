//! Fixed-count, fixed-delay retry around an embedding backend.
//!
//! The transient failures targeted are rate-limit cooldowns of known fixed
//! duration, so the delay is constant: no exponential backoff, no jitter.
//! The sleep blocks the calling worker task for the full delay; callers
//! wanting cancellation must check between attempts, not inside the sleep.

use std::sync::Arc;
use std::time::Duration;

use super::traits::{Embedder, EmbeddingError};

pub const RETRY_COUNT: usize = 5;
pub const RETRY_DELAY: Duration = Duration::from_secs(30);

pub struct EmbeddingRetrier {
    embedder: Arc<dyn Embedder>,
    attempts: usize,
    delay: Duration,
}

impl EmbeddingRetrier {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self::with_policy(embedder, RETRY_COUNT, RETRY_DELAY)
    }

    /// Override attempt count and delay; used by tests with a paused clock.
    pub fn with_policy(embedder: Arc<dyn Embedder>, attempts: usize, delay: Duration) -> Self {
        Self {
            embedder,
            attempts,
            delay,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.embedder.dimensions()
    }

    /// Embed `text`, retrying on any failure. Returns the vector on first
    /// success, or `EmbeddingError::Exhausted` carrying the chunk text once
    /// the attempt budget is spent.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        for attempt in 1..=self.attempts {
            match self.embedder.embed(text).await {
                Ok(vector) => return Ok(vector),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "embedding attempt failed");
                    if attempt < self.attempts {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }
        Err(EmbeddingError::Exhausted {
            chunk: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first `failures` calls, then succeeds.
    struct FlakyEmbedder {
        failures: usize,
        calls: AtomicUsize,
    }

    impl FlakyEmbedder {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Embedder for FlakyEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(EmbeddingError::Api("rate limited".to_string()))
            } else {
                Ok(vec![0.0; 4])
            }
        }

        fn dimensions(&self) -> usize {
            4
        }
    }

    #[tokio::test]
    async fn first_success_returns_immediately() {
        let embedder = Arc::new(FlakyEmbedder::new(0));
        let retrier = EmbeddingRetrier::with_policy(embedder.clone(), 5, Duration::from_secs(30));
        let vector = retrier.embed("chunk").await.unwrap();
        assert_eq!(vector.len(), 4);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_failures() {
        let embedder = Arc::new(FlakyEmbedder::new(3));
        let retrier = EmbeddingRetrier::with_policy(embedder.clone(), 5, Duration::from_secs(30));
        let vector = retrier.embed("chunk").await.unwrap();
        assert_eq!(vector.len(), 4);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_carries_chunk_text() {
        let embedder = Arc::new(FlakyEmbedder::new(usize::MAX));
        let retrier = EmbeddingRetrier::with_policy(embedder.clone(), 5, Duration::from_secs(30));
        let err = retrier.embed("the failing chunk").await.unwrap_err();
        match err {
            EmbeddingError::Exhausted { chunk } => assert_eq!(chunk, "the failing chunk"),
            other => panic!("expected Exhausted, got {other}"),
        }
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_applies_between_attempts_only() {
        let embedder = Arc::new(FlakyEmbedder::new(1));
        let retrier = EmbeddingRetrier::with_policy(embedder.clone(), 5, Duration::from_secs(30));
        let started = tokio::time::Instant::now();
        retrier.embed("chunk").await.unwrap();
        // One failure, so exactly one fixed delay elapsed (paused clock).
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }
}
