//! chunkmill-ingest — document chunking and content-extraction pipeline.
//!
//! Turns raw source documents (text, HTML, Markdown, source code, PDF layout
//! analysis results) into bounded, overlapping, token-sized chunks suitable
//! for embedding and retrieval indexing.

pub mod analysis;
pub mod document;
pub mod embedding;
pub mod index;
pub mod layout;
pub mod pipeline;
pub mod splitter;
pub mod tokenizer;

pub use pipeline::{ChunkError, ChunkOptions, ChunkPipeline, FileFormat};
pub use tokenizer::TokenCounter;
