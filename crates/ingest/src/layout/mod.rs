//! PDF structural reconstruction from a layout-analysis result.

mod extract;
mod table;
pub mod types;

pub use extract::extract_structured_text;
pub use types::AnalyzeResult;
