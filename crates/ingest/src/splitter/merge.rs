//! Serial merge of undersized fragments.

use super::Fragment;

/// Greedily coalesce `fragments` into chunks of at most `token_budget`
/// tokens. The running buffer is flushed whenever adding the next fragment
/// would exceed the budget; the final non-empty buffer is always flushed. A
/// single fragment already over budget passes through alone, unmerged.
///
/// Token totals are summed from the fragment counts rather than re-measured,
/// which is safe because counting is non-decreasing under concatenation.
pub fn merge_serially(fragments: Vec<Fragment>, token_budget: usize) -> Vec<Fragment> {
    let mut merged = Vec::new();
    let mut current = String::new();
    let mut total = 0usize;

    for fragment in fragments {
        if total > 0 && total + fragment.tokens > token_budget {
            merged.push(Fragment {
                text: std::mem::take(&mut current),
                tokens: total,
            });
            total = 0;
        }
        total += fragment.tokens;
        current.push_str(&fragment.text);
    }
    if total > 0 {
        merged.push(Fragment {
            text: current,
            tokens: total,
        });
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, tokens: usize) -> Fragment {
        Fragment {
            text: text.to_string(),
            tokens,
        }
    }

    #[test]
    fn packs_small_fragments_up_to_budget() {
        let merged = merge_serially(vec![frag("a ", 3), frag("b ", 3), frag("c ", 3)], 7);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "a b ");
        assert_eq!(merged[0].tokens, 6);
        assert_eq!(merged[1].text, "c ");
        assert_eq!(merged[1].tokens, 3);
    }

    #[test]
    fn every_output_within_budget_except_oversized_input() {
        let merged = merge_serially(
            vec![frag("small ", 2), frag("huge ", 50), frag("tiny ", 1)],
            10,
        );
        // The oversized fragment passes through alone.
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1].tokens, 50);
        for m in [&merged[0], &merged[2]] {
            assert!(m.tokens <= 10);
        }
    }

    #[test]
    fn final_buffer_flushed_even_below_budget() {
        let merged = merge_serially(vec![frag("x", 1)], 100);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].tokens, 1);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(merge_serially(vec![], 10).is_empty());
    }
}
