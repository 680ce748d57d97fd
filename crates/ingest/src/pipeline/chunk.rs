//! Orchestration: file discovery, format dispatch, splitting, filtering,
//! and embedding attachment.
//!
//! Every file contributes exactly one [`ChunkingResult`] merged into the run
//! total. Unsupported formats and extraction failures are tallied per file
//! when `ignore_errors` is set; configuration problems always abort the run.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use walkdir::WalkDir;

use chunkmill_core::config::ChunkingConfig;
use chunkmill_core::{ChunkingResult, Document, SourceInfo};

use crate::analysis::{AnalysisMode, DocumentAnalyzer};
use crate::document;
use crate::embedding::{EmbeddingError, EmbeddingRetrier};
use crate::layout::extract_structured_text;
use crate::splitter::{merge_serially, split_sections, Fragment, RecursiveSplitter, UNBOUNDED_BUDGET};
use crate::tokenizer::{TokenCounter, TokenizerError};

use super::format::FileFormat;

// ── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("content extraction failed: {0}")]
    Extraction(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TokenizerError> for ChunkError {
    fn from(e: TokenizerError) -> Self {
        ChunkError::Configuration(e.to_string())
    }
}

// ── Options ─────────────────────────────────────────────────────────────────

/// Knobs for a chunking run. The defaults match the env-config defaults.
#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// Token budget per chunk. 0 means unbounded.
    pub token_budget: usize,
    /// Tokens shared between consecutive chunks.
    pub token_overlap: usize,
    /// Chunks below this token count are dropped and tallied.
    pub min_chunk_size: usize,
    /// Count per-file failures instead of aborting the run.
    pub ignore_errors: bool,
    /// Use layout analysis for PDF-family files (headings and tables).
    pub use_layout: bool,
    /// Attach an embedding vector to every chunk.
    pub add_embeddings: bool,
    /// Prepended to each file's relative path to form the chunk URL.
    pub url_prefix: Option<String>,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            token_budget: 1024,
            token_overlap: 128,
            min_chunk_size: 10,
            ignore_errors: true,
            use_layout: false,
            add_embeddings: false,
            url_prefix: None,
        }
    }
}

impl ChunkOptions {
    pub fn from_config(cfg: &ChunkingConfig) -> Self {
        Self {
            token_budget: cfg.chunk_size,
            token_overlap: cfg.token_overlap,
            min_chunk_size: cfg.min_chunk_size,
            use_layout: cfg.use_layout,
            ..Self::default()
        }
    }
}

// ── Pipeline ────────────────────────────────────────────────────────────────

/// The chunking pipeline. Holds the tokenizer and the optional collaborators;
/// construction fails fast if the tokenizer cannot load.
pub struct ChunkPipeline {
    tokens: TokenCounter,
    analyzer: Option<Arc<dyn DocumentAnalyzer>>,
    embedder: Option<Arc<EmbeddingRetrier>>,
}

impl ChunkPipeline {
    pub fn new() -> Result<Self, ChunkError> {
        Ok(Self {
            tokens: TokenCounter::new()?,
            analyzer: None,
            embedder: None,
        })
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn DocumentAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_embedder(mut self, embedder: Arc<EmbeddingRetrier>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn token_counter(&self) -> &TokenCounter {
        &self.tokens
    }

    /// Split one document's raw content into budget-sized fragments plus the
    /// extracted title.
    ///
    /// Markdown splits the raw text at section boundaries so blank lines
    /// survive until after sectioning; every other format splits the cleaned
    /// content directly.
    fn split_content(
        &self,
        raw: &str,
        file_name: &str,
        format: FileFormat,
        opts: &ChunkOptions,
    ) -> (String, Vec<Fragment>) {
        let budget = if opts.token_budget == 0 {
            UNBOUNDED_BUDGET
        } else {
            opts.token_budget
        };
        let doc = document::parse(raw, file_name, format, &self.tokens);
        let total = self.tokens.count(&doc.content);
        if total < budget {
            let fragment = Fragment {
                text: doc.content,
                tokens: total,
            };
            return (doc.title, vec![fragment]);
        }
        let fragments = match format {
            FileFormat::Markdown => {
                let splitter = RecursiveSplitter::for_text(
                    self.tokens.clone(),
                    opts.token_budget,
                    opts.token_overlap,
                );
                let mut pieces = Vec::new();
                for section in split_sections(raw) {
                    let count = self.tokens.count(&section);
                    if count > budget {
                        pieces.extend(splitter.split(&section));
                    } else {
                        pieces.push(Fragment {
                            text: section,
                            tokens: count,
                        });
                    }
                }
                merge_serially(pieces, budget)
                    .into_iter()
                    .map(|f| {
                        let text = document::text::cleanup_content(&f.text);
                        let tokens = self.tokens.count(&text);
                        Fragment { text, tokens }
                    })
                    .collect()
            }
            FileFormat::Code => RecursiveSplitter::for_code(
                self.tokens.clone(),
                opts.token_budget,
                opts.token_overlap,
            )
            .split(&doc.content),
            _ => RecursiveSplitter::for_text(
                self.tokens.clone(),
                opts.token_budget,
                opts.token_overlap,
            )
            .split(&doc.content),
        };
        (doc.title, fragments)
    }

    /// Chunk already-extracted content into documents. Fragments below the
    /// minimum size are dropped and tallied; an exhausted embedding retry
    /// fails the whole file so no partially-embedded set is emitted.
    pub async fn chunk_content(
        &self,
        content: &str,
        file_name: &str,
        url: &str,
        format: FileFormat,
        opts: &ChunkOptions,
    ) -> Result<ChunkingResult, ChunkError> {
        let embedder = if opts.add_embeddings {
            Some(self.embedder.as_ref().ok_or_else(|| {
                ChunkError::Configuration("embeddings requested but no embedder configured".into())
            })?)
        } else {
            None
        };

        let (title, fragments) = self.split_content(content, file_name, format, opts);

        let mut result = ChunkingResult {
            total_files: 1,
            ..Default::default()
        };
        for fragment in fragments {
            if fragment.tokens < opts.min_chunk_size {
                tracing::debug!(file = file_name, tokens = fragment.tokens, "chunk below minimum size, skipping");
                result.skipped_chunks += 1;
                continue;
            }
            let mut doc = Document::new(fragment.text, title.clone());
            doc.url = url.to_string();
            if let Some(retrier) = embedder {
                doc.content_vector = Some(retrier.embed(&doc.content).await?);
            }
            result.chunks.push(doc);
        }
        Ok(result)
    }

    /// Chunk a single file: detect the format, extract content (running
    /// document analysis for PDF-family files), then chunk it.
    pub async fn chunk_file(
        &self,
        path: &Path,
        url: &str,
        opts: &ChunkOptions,
    ) -> Result<ChunkingResult, ChunkError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let Some(format) = FileFormat::from_extension(&file_name) else {
            if opts.ignore_errors {
                tracing::debug!(file = %file_name, "unsupported format, skipping");
                return Ok(ChunkingResult {
                    total_files: 1,
                    num_unsupported_format_files: 1,
                    ..Default::default()
                });
            }
            return Err(ChunkError::UnsupportedFormat(file_name));
        };

        let (content, format) = if format.requires_analysis() {
            let Some(analyzer) = &self.analyzer else {
                return Err(ChunkError::Configuration(format!(
                    "{file_name} needs a document analyzer, none configured"
                )));
            };
            let bytes = tokio::fs::read(path).await?;
            let mode = if opts.use_layout {
                AnalysisMode::Layout
            } else {
                AnalysisMode::Read
            };
            let analyzed = analyzer
                .analyze(&bytes, mode)
                .await
                .map_err(|e| ChunkError::Extraction(e.to_string()))?;
            let text = extract_structured_text(&analyzed);
            let format = if opts.use_layout {
                FileFormat::PdfHtml
            } else {
                FileFormat::Text
            };
            (text, format)
        } else {
            let bytes = tokio::fs::read(path).await?;
            (String::from_utf8_lossy(&bytes).into_owned(), format)
        };

        self.chunk_content(&content, &file_name, url, format, opts).await
    }

    /// Chunk one file under `root`, filling in each chunk's relative filepath,
    /// URL, and last-modified metadata.
    pub async fn process_file(
        &self,
        path: &Path,
        root: &Path,
        opts: &ChunkOptions,
    ) -> Result<ChunkingResult, ChunkError> {
        let rel = path.strip_prefix(root).unwrap_or(path);
        let rel_posix = rel.to_string_lossy().replace('\\', "/");
        let source = SourceInfo {
            url: match &opts.url_prefix {
                Some(prefix) => format!("{prefix}{rel_posix}"),
                None => String::new(),
            },
            last_updated: tokio::fs::metadata(path)
                .await
                .and_then(|m| m.modified())
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now()),
        };

        let mut result = self.chunk_file(path, &source.url, opts).await?;
        for chunk in &mut result.chunks {
            chunk.filepath = rel_posix.clone();
            chunk.metadata.insert(
                "last_updated".into(),
                serde_json::json!(source.last_updated.to_rfc3339()),
            );
        }
        Ok(result)
    }

    /// Walk `root` and chunk every file in it. Per-file failures are counted
    /// when `ignore_errors` is set; configuration errors abort regardless.
    pub async fn chunk_directory(
        &self,
        root: &Path,
        opts: &ChunkOptions,
    ) -> Result<ChunkingResult, ChunkError> {
        let mut total = ChunkingResult::default();
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            match self.process_file(path, root, opts).await {
                Ok(result) => total.merge(result),
                Err(e @ ChunkError::Configuration(_)) => return Err(e),
                Err(e) if opts.ignore_errors => {
                    tracing::warn!(file = %path.display(), error = %e, "file failed, counting and continuing");
                    total.merge(ChunkingResult {
                        total_files: 1,
                        num_files_with_errors: 1,
                        ..Default::default()
                    });
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!(
            total_files = total.total_files,
            chunks = total.chunks.len(),
            unsupported = total.num_unsupported_format_files,
            errors = total.num_files_with_errors,
            skipped_chunks = total.skipped_chunks,
            "chunking complete"
        );
        Ok(total)
    }
}
