use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chunking: ChunkingConfig,
    pub embedding: EmbeddingConfig,
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            chunking: ChunkingConfig::from_env(),
            embedding: EmbeddingConfig::from_env(),
            analysis: AnalysisConfig::from_env(),
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Token budget per chunk. 0 means unbounded.
    pub chunk_size: usize,
    /// Tokens shared between consecutive chunks.
    pub token_overlap: usize,
    /// Chunks below this token count are dropped and tallied.
    pub min_chunk_size: usize,
    /// Use the layout analysis model for PDFs (headings/tables) instead of plain read.
    pub use_layout: bool,
}

impl ChunkingConfig {
    pub fn from_env() -> Self {
        Self {
            chunk_size: env_usize("CHUNK_SIZE", 1024),
            token_overlap: env_usize("TOKEN_OVERLAP", 128),
            min_chunk_size: env_usize("MIN_CHUNK_SIZE", 10),
            use_layout: env_bool("USE_LAYOUT", false),
        }
    }
}

// ── Embedding ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub enabled: bool,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub deployment: String,
    pub dimensions: usize,
}

impl EmbeddingConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env_bool("ADD_EMBEDDINGS", false),
            endpoint: env_opt("EMBEDDING_MODEL_ENDPOINT"),
            api_key: env_opt("EMBEDDING_MODEL_KEY"),
            deployment: env_or("EMBEDDING_DEPLOYMENT", "text-embedding-ada-002"),
            dimensions: env_usize("EMBEDDING_DIMENSIONS", 1536),
        }
    }
}

// ── Document analysis ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl AnalysisConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: env_opt("FORM_RECOGNIZER_ENDPOINT"),
            api_key: env_opt("FORM_RECOGNIZER_KEY"),
        }
    }
}
