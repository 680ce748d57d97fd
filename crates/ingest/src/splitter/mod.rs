//! Token-aware splitting: boundary-preferring recursive splitter, markdown
//! section splitter, and the serial chunk merger.

mod markdown;
mod merge;
mod recursive;

pub use markdown::split_sections;
pub use merge::merge_serially;
pub use recursive::RecursiveSplitter;

pub(crate) use recursive::UNBOUNDED_BUDGET;

/// A split piece of text with its measured token count.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub tokens: usize,
}
