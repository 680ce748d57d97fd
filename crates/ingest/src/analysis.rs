//! Document-analysis collaborator boundary and HTTP client.
//!
//! The pipeline consumes analysis results through the trait; the Azure-style
//! client below is the shipped implementation. The client handle is
//! constructed once at process start and shared read-only thereafter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::layout::AnalyzeResult;

const API_VERSION: &str = "2023-07-31";
const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: usize = 60;

/// Whether heading/table structure is extracted, or plain reading order only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Layout,
    Read,
}

impl AnalysisMode {
    fn model(self) -> &'static str {
        match self {
            AnalysisMode::Layout => "prebuilt-layout",
            AnalysisMode::Read => "prebuilt-read",
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("document analysis failed: {0}")]
    Failed(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(&self, bytes: &[u8], mode: AnalysisMode)
        -> Result<AnalyzeResult, AnalysisError>;
}

/// Azure-Document-Intelligence-style analysis backend.
///
/// Analysis is a long-running operation: submit the document, then poll the
/// operation URL returned in the `operation-location` header until it
/// settles.
pub struct AzureDocumentAnalyzer {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl AzureDocumentAnalyzer {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOperation {
    status: String,
    #[serde(default)]
    analyze_result: Option<AnalyzeResult>,
    #[serde(default)]
    error: Option<OperationError>,
}

#[derive(Deserialize)]
struct OperationError {
    code: String,
    message: String,
}

#[async_trait]
impl DocumentAnalyzer for AzureDocumentAnalyzer {
    async fn analyze(
        &self,
        bytes: &[u8],
        mode: AnalysisMode,
    ) -> Result<AnalyzeResult, AnalysisError> {
        let url = format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={API_VERSION}",
            self.endpoint,
            mode.model()
        );
        let response = self
            .client
            .post(url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Failed(format!("{status}: {body}")));
        }

        let operation_url = response
            .headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AnalysisError::Failed("missing operation-location header".into()))?
            .to_string();

        for _ in 0..MAX_POLLS {
            tokio::time::sleep(POLL_INTERVAL).await;
            let operation: AnalyzeOperation = self
                .client
                .get(&operation_url)
                .header("Ocp-Apim-Subscription-Key", &self.api_key)
                .send()
                .await?
                .json()
                .await?;
            match operation.status.as_str() {
                "succeeded" => {
                    return operation.analyze_result.ok_or_else(|| {
                        AnalysisError::Failed("operation succeeded without a result".into())
                    });
                }
                "failed" => {
                    let message = operation
                        .error
                        .map(|e| format!("{}: {}", e.code, e.message))
                        .unwrap_or_else(|| "unknown error".into());
                    return Err(AnalysisError::Failed(message));
                }
                _ => {}
            }
        }
        Err(AnalysisError::Failed(
            "operation did not complete within the polling budget".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_operation_carries_result() {
        let json = r#"{
            "status": "succeeded",
            "analyzeResult": {
                "content": "hello",
                "pages": [{"spans": [{"offset": 0, "length": 5}]}]
            }
        }"#;
        let op: AnalyzeOperation = serde_json::from_str(json).unwrap();
        assert_eq!(op.status, "succeeded");
        assert_eq!(op.analyze_result.unwrap().content, "hello");
    }

    #[test]
    fn failed_operation_carries_error() {
        let json = r#"{
            "status": "failed",
            "error": {"code": "InvalidRequest", "message": "bad pdf"}
        }"#;
        let op: AnalyzeOperation = serde_json::from_str(json).unwrap();
        let err = op.error.unwrap();
        assert_eq!(err.code, "InvalidRequest");
        assert_eq!(err.message, "bad pdf");
    }

    #[test]
    fn running_operation_has_no_result_yet() {
        let op: AnalyzeOperation = serde_json::from_str(r#"{"status": "running"}"#).unwrap();
        assert!(op.analyze_result.is_none());
        assert!(op.error.is_none());
    }

    #[test]
    fn modes_map_to_prebuilt_models() {
        assert_eq!(AnalysisMode::Layout.model(), "prebuilt-layout");
        assert_eq!(AnalysisMode::Read.model(), "prebuilt-read");
    }
}
