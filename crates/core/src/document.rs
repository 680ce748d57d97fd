use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One indexable chunk of a source document.
///
/// `id` is assigned at write time by the orchestrator, not by the splitter.
/// `content_vector` stays `None` until the embedding stage attaches it; the
/// rest of the record is immutable once handed to the index stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub filepath: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_vector: Option<Vec<f32>>,
}

impl Document {
    pub fn new(content: String, title: String) -> Self {
        Self {
            content,
            id: String::new(),
            title,
            filepath: String::new(),
            url: String::new(),
            metadata: HashMap::new(),
            content_vector: None,
        }
    }
}

/// Origin of a source file: at least a URL and a last-updated timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub url: String,
    pub last_updated: DateTime<Utc>,
}

/// Aggregate outcome of a chunking run.
///
/// Accumulated additively across files: each file contributes one immutable
/// result merged into the running total, so the counters stay accurate even
/// when individual files fail.
#[derive(Debug, Clone, Default)]
pub struct ChunkingResult {
    pub chunks: Vec<Document>,
    pub total_files: usize,
    pub num_unsupported_format_files: usize,
    pub num_files_with_errors: usize,
    pub skipped_chunks: usize,
}

impl ChunkingResult {
    /// Fold another file's result into this one (sum counts, extend chunks).
    pub fn merge(&mut self, other: ChunkingResult) {
        self.chunks.extend(other.chunks);
        self.total_files += other.total_files;
        self.num_unsupported_format_files += other.num_unsupported_format_files;
        self.num_files_with_errors += other.num_files_with_errors;
        self.skipped_chunks += other.skipped_chunks;
    }
}
