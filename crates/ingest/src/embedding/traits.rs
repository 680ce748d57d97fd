use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Raised only after the retry budget is exhausted; carries the text of
    /// the chunk that could not be embedded.
    #[error("embedding retries exhausted for chunk: {chunk}")]
    Exhausted { chunk: String },
}

/// Trait for embedding backends (Azure OpenAI, local models, etc.)
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one chunk of text, returning a vector of the declared dimensionality.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// The dimensionality of the output vectors.
    fn dimensions(&self) -> usize;
}
