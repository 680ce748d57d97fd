pub mod azure;
pub mod retry;
pub mod traits;

pub use azure::AzureOpenAiEmbedder;
pub use retry::{EmbeddingRetrier, RETRY_COUNT, RETRY_DELAY};
pub use traits::{Embedder, EmbeddingError};
