//! Sequence similarity ratio based on longest matching blocks.
//!
//! The ratio is `2 * M / T`, where `T` is the total number of characters in
//! both strings and `M` is the number of characters covered by matching
//! blocks. Blocks are found by taking the longest common substring, then
//! recursing on the unmatched text to its left and right. Ties between
//! equally long blocks go to the one starting earliest in `a`, then earliest
//! in `b`, so results are reproducible.

/// A matching block: `a[a_start..a_start + size] == b[b_start..b_start + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Similarity ratio in `[0, 1]` between two strings, compared by `char`.
///
/// Two empty strings are identical (ratio 1.0).
///
/// ```
/// use nba_mantle::matching::ratio::sequence_ratio;
///
/// assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
/// assert_eq!(sequence_ratio("same", "same"), 1.0);
/// assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
/// ```
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched: usize = matching_blocks(&a, &b).iter().map(|m| m.size).sum();
    count_to_f64(2 * matched) / count_to_f64(total)
}

/// All matching blocks between `a` and `b`, ordered by position
#[must_use]
pub fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut blocks = Vec::new();
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = find_longest_match(a, b, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }

        if alo < block.a_start && blo < block.b_start {
            pending.push((alo, block.a_start, blo, block.b_start));
        }
        let a_end = block.a_start + block.size;
        let b_end = block.b_start + block.size;
        if a_end < ahi && b_end < bhi {
            pending.push((a_end, ahi, b_end, bhi));
        }
        blocks.push(block);
    }

    blocks.sort_unstable_by_key(|m| (m.a_start, m.b_start));
    blocks
}

/// Longest common run within `a[alo..ahi]` and `b[blo..bhi]`
fn find_longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchingBlock {
    let mut best = MatchingBlock {
        a_start: alo,
        b_start: blo,
        size: 0,
    };

    // previous[t]: length of the common run ending at a[i - 1], b[blo + t - 1]
    let width = bhi.saturating_sub(blo) + 1;
    let mut previous = vec![0usize; width];
    let mut current = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let t = j - blo + 1;
            if a[i] == b[j] {
                let run = previous[t - 1] + 1;
                current[t] = run;
                if run > best.size {
                    best = MatchingBlock {
                        a_start: i + 1 - run,
                        b_start: j + 1 - run,
                        size: run,
                    };
                }
            } else {
                current[t] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    best
}

#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_identical_and_empty() {
        assert_eq!(sequence_ratio("", ""), 1.0);
        assert_eq!(sequence_ratio("lebron james", "lebron james"), 1.0);
        assert_eq!(sequence_ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_single_typo() {
        // 12 matched characters out of 25 total
        let ratio = sequence_ratio("lebron james", "lebron jamess");
        assert!((ratio - 24.0 / 25.0).abs() < 1e-9);
        assert!(ratio >= 0.8);
    }

    #[test]
    fn test_short_fragment_falls_below_cutoff() {
        // "bron" matches 4 characters out of 16
        let ratio = sequence_ratio("lebron james", "bron");
        assert!((ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_matching_blocks_recurse_both_sides() {
        let blocks = matching_blocks(&chars("abxcd"), &chars("abcd"));
        assert_eq!(
            blocks,
            vec![
                MatchingBlock {
                    a_start: 0,
                    b_start: 0,
                    size: 2
                },
                MatchingBlock {
                    a_start: 3,
                    b_start: 2,
                    size: 2
                },
            ]
        );
    }

    #[test]
    fn test_longest_match_prefers_earliest_block() {
        let a = chars("abab");
        let b = chars("ab");
        let block = find_longest_match(&a, &b, 0, a.len(), 0, b.len());
        assert_eq!(block.a_start, 0);
        assert_eq!(block.size, 2);
    }

    #[test]
    fn test_unicode_compared_by_char() {
        let ratio = sequence_ratio("nikola jokić", "nikola jokic");
        assert!((ratio - 22.0 / 24.0).abs() < 1e-9);
    }
}
