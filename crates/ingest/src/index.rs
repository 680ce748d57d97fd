//! Search-index collaborator boundary.
//!
//! Used by orchestration code, not the chunking core. Re-indexing a source
//! replaces all of its chunks by URL identity rather than diffing.

use async_trait::async_trait;
use thiserror::Error;

use chunkmill_core::Document;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index operation failed: {0}")]
    Backend(String),
}

#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn upsert(&self, docs: &[Document]) -> Result<(), IndexError>;

    /// Delete every indexed chunk whose `url` field equals `url`.
    async fn delete_by_url(&self, url: &str) -> Result<(), IndexError>;
}

/// Replace all previously indexed chunks of `url` with `docs`.
pub async fn replace_source(
    index: &dyn SearchIndex,
    url: &str,
    docs: &[Document],
) -> Result<(), IndexError> {
    index.delete_by_url(url).await?;
    index.upsert(docs).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryIndex {
        docs: Mutex<Vec<Document>>,
    }

    #[async_trait]
    impl SearchIndex for InMemoryIndex {
        async fn upsert(&self, docs: &[Document]) -> Result<(), IndexError> {
            self.docs.lock().unwrap().extend_from_slice(docs);
            Ok(())
        }

        async fn delete_by_url(&self, url: &str) -> Result<(), IndexError> {
            self.docs.lock().unwrap().retain(|d| d.url != url);
            Ok(())
        }
    }

    fn doc(id: &str, url: &str) -> Document {
        let mut d = Document::new("content".into(), "title".into());
        d.id = id.to_string();
        d.url = url.to_string();
        d
    }

    #[tokio::test]
    async fn replace_source_swaps_all_chunks_of_one_url() {
        let index = InMemoryIndex::default();
        index
            .upsert(&[doc("1", "https://a"), doc("2", "https://a"), doc("3", "https://b")])
            .await
            .unwrap();

        replace_source(&index, "https://a", &[doc("9", "https://a")])
            .await
            .unwrap();

        let docs = index.docs.lock().unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "9"]);
    }

    #[tokio::test]
    async fn replace_source_with_no_prior_chunks_just_inserts() {
        let index = InMemoryIndex::default();
        replace_source(&index, "https://new", &[doc("1", "https://new")])
            .await
            .unwrap();
        assert_eq!(index.docs.lock().unwrap().len(), 1);
    }
}
