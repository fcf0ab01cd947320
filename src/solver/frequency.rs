//! Feedback-frequency histogram and guess-scoring statistics
//!
//! A `FrequencyTable` counts how many codewords of a list fall into each
//! feedback ordinal. The derived statistics are the raw material of every
//! guess heuristic: worst-case bucket, sum of squares, entropy, and
//! nonzero-partition count.

use crate::core::{Feedback, Rules};

/// Bucket capacity covering the largest feedback space (`pegs = 9`).
pub const MAX_FEEDBACK_ORDINALS: usize = 55;

/// Histogram of feedback outcomes over a codeword list
///
/// Invariant: the sum of all buckets equals the length of the list that
/// was counted.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    buckets: [u32; MAX_FEEDBACK_ORDINALS],
    limit: usize,
}

impl FrequencyTable {
    /// An all-zero table sized to the feedback space of `rules`
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        Self {
            buckets: [0; MAX_FEEDBACK_ORDINALS],
            limit: rules.feedback_count(),
        }
    }

    /// Count a list of feedbacks into a fresh table
    #[must_use]
    pub fn count(rules: Rules, feedbacks: &[Feedback]) -> Self {
        let mut table = Self::new(rules);
        for &fb in feedbacks {
            table.tally(fb);
        }
        table
    }

    /// Add one occurrence
    #[inline]
    pub fn tally(&mut self, feedback: Feedback) {
        debug_assert!((feedback.ordinal() as usize) < self.limit);
        self.buckets[feedback.ordinal() as usize] += 1;
    }

    /// Occurrences for one feedback ordinal
    #[inline]
    #[must_use]
    pub fn get(&self, ordinal: usize) -> u32 {
        self.buckets[ordinal]
    }

    /// Number of ordinals in the underlying feedback space
    #[inline]
    #[must_use]
    pub const fn ordinal_count(&self) -> usize {
        self.limit
    }

    /// The bucket slice, one entry per feedback ordinal
    #[inline]
    #[must_use]
    pub fn buckets(&self) -> &[u32] {
        &self.buckets[..self.limit]
    }

    /// Sum of all buckets, i.e. the size of the counted list
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets().iter().map(|&n| n as usize).sum()
    }

    /// Largest bucket: the worst-case partition size
    #[must_use]
    pub fn maximum(&self) -> u32 {
        self.buckets().iter().copied().max().unwrap_or(0)
    }

    /// `Σ nᵢ²`, proportional to the expected partition size
    #[must_use]
    pub fn sum_of_squares(&self) -> u64 {
        self.buckets()
            .iter()
            .map(|&n| u64::from(n) * u64::from(n))
            .sum()
    }

    /// `Σ nᵢ·ln(nᵢ)` over nonzero buckets
    ///
    /// Minimizing this maximizes the true entropy of the partition without
    /// dividing by the total in the hot loop.
    #[must_use]
    pub fn modified_entropy(&self) -> f64 {
        self.buckets()
            .iter()
            .filter(|&&n| n > 1)
            .map(|&n| {
                let n = f64::from(n);
                n * n.ln()
            })
            .sum()
    }

    /// Shannon entropy (nats) of the partition distribution
    #[must_use]
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        total.ln() - self.modified_entropy() / total
    }

    /// Number of buckets with at least one element
    #[must_use]
    pub fn nonzero_partitions(&self) -> usize {
        self.buckets().iter().filter(|&&n| n > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Rules {
        Rules::new(4, 6, true).unwrap()
    }

    fn table_from(pairs: &[(u8, u8, u32)]) -> FrequencyTable {
        let mut table = FrequencyTable::new(rules());
        for &(exact, color, n) in pairs {
            for _ in 0..n {
                table.tally(Feedback::new(exact, color));
            }
        }
        table
    }

    #[test]
    fn empty_table_statistics() {
        let table = FrequencyTable::new(rules());
        assert_eq!(table.total(), 0);
        assert_eq!(table.maximum(), 0);
        assert_eq!(table.sum_of_squares(), 0);
        assert_eq!(table.nonzero_partitions(), 0);
        assert!(table.modified_entropy().abs() < f64::EPSILON);
        assert!(table.entropy().abs() < f64::EPSILON);
    }

    #[test]
    fn total_matches_counted_list() {
        let feedbacks = vec![
            Feedback::new(0, 0),
            Feedback::new(1, 1),
            Feedback::new(1, 1),
            Feedback::new(4, 0),
        ];
        let table = FrequencyTable::count(rules(), &feedbacks);
        assert_eq!(table.total(), 4);
        assert_eq!(table.get(Feedback::new(1, 1).ordinal() as usize), 2);
    }

    #[test]
    fn maximum_and_sum_of_squares() {
        let table = table_from(&[(0, 0, 3), (1, 0, 2), (2, 0, 1)]);
        assert_eq!(table.maximum(), 3);
        assert_eq!(table.sum_of_squares(), 9 + 4 + 1);
        assert_eq!(table.nonzero_partitions(), 3);
        // Sum of squares dominates the maximum for any non-empty table.
        assert!(table.sum_of_squares() >= u64::from(table.maximum()));
    }

    #[test]
    fn entropy_zero_for_single_bucket() {
        let table = table_from(&[(1, 2, 7)]);
        assert!(table.entropy().abs() < 1e-12);
        assert!((table.modified_entropy() - 7.0 * 7.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn entropy_maximal_for_uniform_split() {
        let uniform = table_from(&[(0, 0, 4), (0, 1, 4), (1, 0, 4), (0, 2, 4)]);
        let skewed = table_from(&[(0, 0, 13), (0, 1, 1), (1, 0, 1), (0, 2, 1)]);
        assert!((uniform.entropy() - 4.0f64.ln()).abs() < 1e-12);
        assert!(uniform.entropy() > skewed.entropy());
        // The scoring form is minimized where true entropy is maximized.
        assert!(uniform.modified_entropy() < skewed.modified_entropy());
    }

    #[test]
    fn singleton_buckets_contribute_no_modified_entropy() {
        let table = table_from(&[(0, 0, 1), (0, 1, 1), (1, 0, 1)]);
        assert!(table.modified_entropy().abs() < f64::EPSILON);
        assert!((table.entropy() - 3.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn nonzero_partitions_bounded_by_list_size() {
        let table = table_from(&[(0, 0, 1), (2, 1, 1)]);
        assert!(table.nonzero_partitions() <= table.total());
    }
}
