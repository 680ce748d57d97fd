//! Boundary-aware recursive splitting.
//!
//! Separators are tried in priority order: sentence terminators first, then
//! word-break characters with the most granular (newline, space) last. A
//! chunk never exceeds the token budget except when a single unbreakable
//! unit already does, in which case it passes through oversized instead of
//! being dropped.

use super::Fragment;
use crate::tokenizer::TokenCounter;

/// A zero budget means "unbounded": splitting is effectively disabled.
pub(crate) const UNBOUNDED_BUDGET: usize = 1_000_000_000;

const SENTENCE_ENDINGS: &[&str] = &[".", "!", "?"];
const WORD_BREAKS: &[&str] = &[",", ";", ":", "(", ")", "[", "]", "{", "}", "\t", "\n", " "];
const CODE_SEPARATORS: &[&str] = &["\nclass ", "\ndef ", "\n\tdef ", "\n\n", "\n", " "];

/// Which side of the cut a separator stays attached to.
///
/// Sentence terminators close the text before them; code boundaries like
/// `\ndef ` open the text after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attach {
    Left,
    Right,
}

pub struct RecursiveSplitter {
    tokens: TokenCounter,
    separators: Vec<&'static str>,
    attach: Attach,
    budget: usize,
    overlap: usize,
}

impl RecursiveSplitter {
    /// Splitter for prose (plain text, HTML, PDF-derived HTML).
    pub fn for_text(tokens: TokenCounter, token_budget: usize, token_overlap: usize) -> Self {
        let separators = SENTENCE_ENDINGS.iter().chain(WORD_BREAKS).copied().collect();
        Self::new(tokens, separators, Attach::Left, token_budget, token_overlap)
    }

    /// Splitter for source code: prefers class/function boundaries.
    pub fn for_code(tokens: TokenCounter, token_budget: usize, token_overlap: usize) -> Self {
        Self::new(
            tokens,
            CODE_SEPARATORS.to_vec(),
            Attach::Right,
            token_budget,
            token_overlap,
        )
    }

    fn new(
        tokens: TokenCounter,
        separators: Vec<&'static str>,
        attach: Attach,
        token_budget: usize,
        token_overlap: usize,
    ) -> Self {
        let budget = if token_budget == 0 {
            UNBOUNDED_BUDGET
        } else {
            token_budget
        };
        // Overlap must leave room for fresh content in every chunk.
        let overlap = token_overlap.min(budget / 2);
        Self {
            tokens,
            separators,
            attach,
            budget,
            overlap,
        }
    }

    /// Split `content` into fragments each within the token budget, with up
    /// to the configured token overlap duplicated between consecutive
    /// fragments.
    pub fn split(&self, content: &str) -> Vec<Fragment> {
        let total = self.tokens.count(content);
        if total < self.budget {
            // Fast path: short documents skip all boundary search.
            return vec![Fragment {
                text: content.to_string(),
                tokens: total,
            }];
        }

        // Cores are built against a reduced budget so that prepending the
        // previous chunk's tail never pushes a chunk over the full budget.
        let core_budget = (self.budget - self.overlap).max(1);
        let pieces = self.split_recursive(content, &self.separators, core_budget);
        let cores = self.pack(pieces, core_budget);
        self.attach_overlap(cores)
    }

    fn split_recursive(&self, text: &str, separators: &[&'static str], budget: usize) -> Vec<String> {
        if self.tokens.count(text) <= budget {
            return vec![text.to_string()];
        }
        let Some(pos) = separators.iter().position(|sep| text.contains(sep)) else {
            // No boundary left: an atomic unit becomes its own oversized piece.
            return vec![text.to_string()];
        };

        let mut out = Vec::new();
        for piece in split_keep_separator(text, separators[pos], self.attach) {
            if self.tokens.count(&piece) <= budget {
                out.push(piece);
            } else {
                out.extend(self.split_recursive(&piece, &separators[pos + 1..], budget));
            }
        }
        out
    }

    /// Greedily pack pieces into fragments up to `budget` tokens each.
    fn pack(&self, pieces: Vec<String>, budget: usize) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        let mut current = String::new();
        let mut total = 0usize;
        for piece in pieces {
            let size = self.tokens.count(&piece);
            if total > 0 && total + size > budget {
                fragments.push(Fragment {
                    text: std::mem::take(&mut current),
                    tokens: total,
                });
                total = 0;
            }
            current.push_str(&piece);
            total += size;
        }
        if total > 0 {
            fragments.push(Fragment {
                text: current,
                tokens: total,
            });
        }
        fragments
    }

    /// Re-include the trailing `overlap`-token suffix of fragment *i* at the
    /// head of fragment *i+1*, then re-measure.
    fn attach_overlap(&self, cores: Vec<Fragment>) -> Vec<Fragment> {
        if self.overlap == 0 || cores.len() <= 1 {
            return cores;
        }
        let mut chunks: Vec<Fragment> = Vec::with_capacity(cores.len());
        for core in cores {
            match chunks.last() {
                Some(prev) => {
                    let tail = self.tokens.tail(&prev.text, self.overlap);
                    let text = format!("{tail}{}", core.text);
                    let tokens = self.tokens.count(&text);
                    chunks.push(Fragment { text, tokens });
                }
                None => chunks.push(core),
            }
        }
        chunks
    }
}

/// Split on `sep`, keeping the separator attached to one side so that
/// concatenating the pieces reconstructs the input. Empty pieces are dropped.
fn split_keep_separator(text: &str, sep: &str, attach: Attach) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, m) in text.match_indices(sep) {
        let boundary = match attach {
            Attach::Left => idx + m.len(),
            Attach::Right => idx,
        };
        if boundary > start {
            pieces.push(text[start..boundary].to_string());
            start = boundary;
        }
    }
    if start < text.len() {
        pieces.push(text[start..].to_string());
    }
    pieces
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn left_attach_keeps_terminator_on_preceding_piece() {
        let pieces = split_keep_separator("One. Two. Three", ".", Attach::Left);
        assert_eq!(pieces, vec!["One.", " Two.", " Three"]);
        assert_eq!(pieces.concat(), "One. Two. Three");
    }

    #[test]
    fn left_attach_handles_trailing_separator() {
        let pieces = split_keep_separator("a.b.", ".", Attach::Left);
        assert_eq!(pieces, vec!["a.", "b."]);
    }

    #[test]
    fn right_attach_opens_pieces_with_separator() {
        let pieces = split_keep_separator("\ndef a\ndef b", "\ndef ", Attach::Right);
        assert_eq!(pieces, vec!["\ndef a", "\ndef b"]);
        assert_eq!(pieces.concat(), "\ndef a\ndef b");
    }
}
