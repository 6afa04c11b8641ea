//! Compact notation for small integer sets.
//!
//! Runs of three or more consecutive integers collapse to `first-last`;
//! shorter runs are listed member by member. `{1, 2, 3, 6}` becomes
//! `1-3,6` while `{1, 2}` stays `1,2`.

/// Shortest run written as a range.
const MIN_RANGE_RUN: usize = 3;

/// Compresses a set of integers into range notation.
///
/// Input order and duplicates do not matter; the output is ascending.
///
/// # Example
///
/// ```
/// use telemars_filters::compress::compress;
///
/// assert_eq!(compress([1, 2, 3, 4, 6]), "1-4,6");
/// assert_eq!(compress([3, 1]), "1,3");
/// ```
pub fn compress(values: impl IntoIterator<Item = u32>) -> String {
    let mut sorted: Vec<u32> = values.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut tokens = Vec::new();
    for run in runs(&sorted) {
        if run.len() >= MIN_RANGE_RUN {
            tokens.push(format!("{}-{}", run[0], run[run.len() - 1]));
        } else {
            tokens.extend(run.iter().map(ToString::to_string));
        }
    }
    tokens.join(",")
}

/// Splits an ascending, duplicate-free slice into maximal consecutive runs.
pub(crate) fn runs(sorted: &[u32]) -> Vec<&[u32]> {
    let mut out = Vec::new();
    let mut start = 0;
    for i in 1..=sorted.len() {
        let breaks = i == sorted.len() || sorted[i] != sorted[i - 1] + 1;
        if breaks {
            out.push(&sorted[start..i]);
            start = i;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        assert_eq!(compress([4]), "4");
    }

    #[test]
    fn test_two_consecutive_stay_listed() {
        assert_eq!(compress([1, 2]), "1,2");
    }

    #[test]
    fn test_three_consecutive_become_range() {
        assert_eq!(compress([1, 2, 3]), "1-3");
    }

    #[test]
    fn test_range_then_single() {
        assert_eq!(compress([1, 2, 3, 6]), "1-3,6");
        assert_eq!(compress([1, 2, 3, 4, 6]), "1-4,6");
    }

    #[test]
    fn test_full_domain() {
        assert_eq!(compress([1, 2, 3, 4, 5, 6]), "1-6");
    }

    #[test]
    fn test_gaps_only() {
        assert_eq!(compress([1, 3, 5]), "1,3,5");
    }

    #[test]
    fn test_pair_then_range() {
        assert_eq!(compress([1, 2, 4, 5, 6]), "1,2,4-6");
    }

    #[test]
    fn test_unsorted_input() {
        assert_eq!(compress([6, 3, 1, 2]), "1-3,6");
    }

    #[test]
    fn test_empty() {
        assert_eq!(compress([]), "");
    }

    #[test]
    fn test_runs() {
        let sorted = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 15];
        let runs = runs(&sorted);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1], &[15]);
    }
}
