//! Token counting over a fixed BPE encoding.
//!
//! Chunk-size guarantees depend on real token counts, so construction fails
//! fast when the encoding table cannot be built; there is no character-count
//! fallback.

use std::sync::Arc;

use thiserror::Error;
use tiktoken_rs::{cl100k_base, CoreBPE};

#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("failed to load token encoding: {0}")]
    Load(String),
}

/// Counts tokens and truncates strings at token boundaries.
///
/// The encoding table is loaded once and shared read-only; cloning is cheap.
#[derive(Clone)]
pub struct TokenCounter {
    bpe: Arc<CoreBPE>,
}

impl TokenCounter {
    pub fn new() -> Result<Self, TokenizerError> {
        let bpe = cl100k_base().map_err(|e| TokenizerError::Load(e.to_string()))?;
        Ok(Self { bpe: Arc::new(bpe) })
    }

    /// Number of tokens in `text` under the loaded encoding.
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Decode the first `max_tokens` encoded tokens of `text`.
    ///
    /// Cuts at a token boundary, which may fall mid-word. The result always
    /// counts at most `max_tokens`.
    pub fn truncate(&self, text: &str, max_tokens: usize) -> String {
        let tokens = self.bpe.encode_ordinary(text);
        if tokens.len() <= max_tokens {
            return text.to_string();
        }
        self.decode_prefix(&tokens, max_tokens)
    }

    /// Decode the trailing `n` tokens of `text`.
    pub fn tail(&self, text: &str, n: usize) -> String {
        let tokens = self.bpe.encode_ordinary(text);
        if tokens.len() <= n {
            return text.to_string();
        }
        let mut start = tokens.len() - n;
        // A token boundary can split a multi-byte sequence; step forward until
        // the suffix decodes cleanly.
        while start < tokens.len() {
            if let Ok(s) = self.bpe.decode(tokens[start..].to_vec()) {
                return s;
            }
            start += 1;
        }
        String::new()
    }

    fn decode_prefix(&self, tokens: &[usize], max_tokens: usize) -> String {
        let mut end = max_tokens.min(tokens.len());
        while end > 0 {
            if let Ok(s) = self.bpe.decode(tokens[..end].to_vec()) {
                return s;
            }
            end -= 1;
        }
        String::new()
    }
}
