//! Ratcliff/Obershelp string similarity.
//!
//! Find the longest common contiguous block, recurse into the unmatched
//! left and right remainders, and sum the matched lengths `M`; the ratio is
//! `2*M / (len(a) + len(b))`, in `[0.0, 1.0]`.

/// Similarity ratio between two strings, compared char by char.
/// Two empty strings are identical by convention (1.0).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_len(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Total length of all non-overlapping matching blocks.
fn matching_len(a: &[char], b: &[char]) -> usize {
    let (ai, bi, len) = longest_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_len(&a[..ai], &b[..bi]) + matching_len(&a[ai + len..], &b[bi + len..])
}

/// Earliest longest common contiguous block, as (start in a, start in b, len).
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // prev[j] = length of the common block ending at a[i-1], b[j]
    let mut prev = vec![0usize; b.len()];
    let mut curr = vec![0usize; b.len()];

    for (i, &ac) in a.iter().enumerate() {
        for (j, &bc) in b.iter().enumerate() {
            curr[j] = if ac == bc {
                let len = if j == 0 { 1 } else { prev[j - 1] + 1 };
                // Strictly greater: earliest block wins on ties.
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
                len
            } else {
                0
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(ratio("Hello World", "Hello World"), 1.0);
        assert_eq!(ratio("a", "a"), 1.0);
    }

    #[test]
    fn both_empty_score_one_by_convention() {
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn disjoint_alphabets_score_zero() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn empty_against_nonempty_scores_zero() {
        assert_eq!(ratio("", "abc"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn overlapping_substring() {
        // Longest block "bcd" (3 chars), total length 8.
        assert!((ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn recursion_picks_up_blocks_on_both_sides() {
        // "abc" matches, then "def" in the right remainders: M = 6 of 14.
        assert!((ratio("abcXdef", "abcYdef") - 12.0 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_eq!(ratio("ABC", "abc"), 0.0);
    }

    #[test]
    fn result_stays_in_unit_interval() {
        for (a, b) in [("ab", "aX"), ("abcd", "abXYZ"), ("xy", "yx")] {
            let r = ratio(a, b);
            assert!((0.0..=1.0).contains(&r), "ratio({a}, {b}) = {r}");
        }
    }
}
