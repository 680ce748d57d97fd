use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::{Embedder, EmbeddingError};

const API_VERSION: &str = "2023-05-15";

/// Azure-OpenAI-style embedding backend.
pub struct AzureOpenAiEmbedder {
    client: Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    dimensions: usize,
}

impl AzureOpenAiEmbedder {
    pub fn new(endpoint: String, api_key: String, deployment: String, dimensions: usize) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            deployment,
            dimensions,
        }
    }
}

#[derive(Serialize)]
struct EmbedRequest {
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedItem>,
}

#[derive(Deserialize)]
struct EmbedItem {
    embedding: Vec<f32>,
}

#[async_trait]
impl Embedder for AzureOpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!(
            "{}/openai/deployments/{}/embeddings?api-version={API_VERSION}",
            self.endpoint, self.deployment
        );
        let request = EmbedRequest {
            input: vec![text.to_string()],
        };

        let response = self
            .client
            .post(url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api(format!("{status}: {body}")));
        }

        let resp: EmbedResponse = response.json().await?;
        let embedding = resp
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| EmbeddingError::Api("empty embedding response".to_string()))?;

        if embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }

        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_wire_format_parses() {
        let json = r#"{"data": [{"embedding": [0.1, -0.2, 0.3], "index": 0}]}"#;
        let resp: EmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data[0].embedding, vec![0.1, -0.2, 0.3]);
    }
}
