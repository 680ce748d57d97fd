//! File-to-chunks orchestration.

mod chunk;
mod format;

pub use chunk::{ChunkError, ChunkOptions, ChunkPipeline};
pub use format::FileFormat;
