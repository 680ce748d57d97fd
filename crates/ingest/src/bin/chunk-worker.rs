//! chunk-worker — batch CLI wrapping the chunking pipeline.
//!
//! Walks an input directory, chunks every supported file, and writes the
//! resulting documents as JSON Lines. Embeddings are attached when enabled
//! via config and an Azure OpenAI endpoint is present.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use chunkmill_core::config::{load_dotenv, Config};
use chunkmill_ingest::analysis::AzureDocumentAnalyzer;
use chunkmill_ingest::embedding::{AzureOpenAiEmbedder, EmbeddingRetrier};
use chunkmill_ingest::{ChunkOptions, ChunkPipeline};

// ── CLI ─────────────────────────────────────────────────────────────

/// Chunk a directory of documents into token-bounded pieces.
#[derive(Parser, Debug)]
#[command(name = "chunk-worker", version, about)]
struct Cli {
    /// Directory of source documents.
    #[arg(long, env = "INPUT_DIR")]
    input: PathBuf,

    /// Output JSONL file (one document per line).
    #[arg(long, env = "OUTPUT_FILE", default_value = "chunks.jsonl")]
    output: PathBuf,

    /// URL prefix prepended to each file's relative path.
    #[arg(long, env = "URL_PREFIX")]
    url_prefix: Option<String>,

    /// Abort on the first file error instead of counting and continuing.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    load_dotenv();

    let cli = Cli::parse();
    let config = Config::from_env();

    let mut opts = ChunkOptions::from_config(&config.chunking);
    opts.ignore_errors = !cli.strict;
    opts.add_embeddings = config.embedding.enabled;
    opts.url_prefix = cli.url_prefix.clone();

    let mut pipeline = ChunkPipeline::new()?;
    if let (Some(endpoint), Some(api_key)) =
        (config.analysis.endpoint.clone(), config.analysis.api_key.clone())
    {
        pipeline =
            pipeline.with_analyzer(Arc::new(AzureDocumentAnalyzer::new(endpoint, api_key)));
    }
    if config.embedding.enabled {
        let (Some(endpoint), Some(api_key)) =
            (config.embedding.endpoint.clone(), config.embedding.api_key.clone())
        else {
            bail!("ADD_EMBEDDINGS is set but EMBEDDING_MODEL_ENDPOINT / EMBEDDING_MODEL_KEY are not");
        };
        let embedder = AzureOpenAiEmbedder::new(
            endpoint,
            api_key,
            config.embedding.deployment.clone(),
            config.embedding.dimensions,
        );
        pipeline = pipeline.with_embedder(Arc::new(EmbeddingRetrier::new(Arc::new(embedder))));
    }

    info!(input = %cli.input.display(), output = %cli.output.display(), "starting chunking run");
    let mut result = pipeline.chunk_directory(&cli.input, &opts).await?;

    // Ids are assigned at write time so they stay sequential across the run.
    let mut out = std::fs::File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    for (i, chunk) in result.chunks.iter_mut().enumerate() {
        chunk.id = i.to_string();
        chunk
            .metadata
            .insert("chunk_id".into(), serde_json::json!(i.to_string()));
        serde_json::to_writer(&mut out, chunk)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(
        files = result.total_files,
        chunks = result.chunks.len(),
        unsupported = result.num_unsupported_format_files,
        errors = result.num_files_with_errors,
        skipped_chunks = result.skipped_chunks,
        "run finished"
    );
    Ok(())
}
