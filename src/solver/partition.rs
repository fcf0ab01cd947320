//! In-place partitioning of a codeword range by feedback
//!
//! `partition` is the foundation of every tree-building breaker: it
//! reorders a mutable range so that codewords sharing a feedback against a
//! fixed guess become contiguous, groups appearing in ascending ordinal
//! order, and returns the per-feedback counts. The counts double as the
//! group boundaries via prefix sums.
//!
//! The reorder is a multi-way Dutch-national-flag pass: one write cursor
//! per feedback bucket, a current-bucket cursor that skips buckets already
//! full, and one swap per misplaced element. Every element moves at most
//! once, so the whole pass is O(N) after the O(N) feedback scan.

use super::frequency::{FrequencyTable, MAX_FEEDBACK_ORDINALS};
use crate::core::{Codeword, Feedback, Rules, compare};

/// Group `range` in place by feedback against `guess`
///
/// On return, for every feedback ordinal `f`, the elements comparing to
/// `f` occupy `[starts[f], starts[f] + counts[f])` where `starts` are the
/// prefix sums of the returned table.
#[must_use]
pub fn partition(rules: Rules, range: &mut [Codeword], guess: &Codeword) -> FrequencyTable {
    let mut ordinals: Vec<u8> = range
        .iter()
        .map(|secret| compare(rules, guess, secret).ordinal())
        .collect();

    let mut table = FrequencyTable::new(rules);
    for &ord in &ordinals {
        table.tally(Feedback::from_ordinal(ord));
    }

    let buckets = rules.feedback_count();
    let mut write = [0usize; MAX_FEEDBACK_ORDINALS];
    let mut end = [0usize; MAX_FEEDBACK_ORDINALS];
    let mut offset = 0;
    for ord in 0..buckets {
        write[ord] = offset;
        offset += table.get(ord) as usize;
        end[ord] = offset;
    }

    // Walk buckets left to right. The element at the current bucket's write
    // cursor either already belongs there (advance) or gets swapped into
    // the write slot of its own bucket. Buckets that fill up are skipped,
    // which keeps the cursor from revisiting placed elements.
    let mut current = 0;
    while current < buckets {
        if write[current] == end[current] {
            current += 1;
            continue;
        }
        let i = write[current];
        let target = ordinals[i] as usize;
        if target == current {
            write[current] += 1;
        } else {
            let j = write[target];
            range.swap(i, j);
            ordinals.swap(i, j);
            write[target] += 1;
        }
    }

    table
}

/// Keep exactly the codewords whose feedback against `guess` equals
/// `feedback`
///
/// The filter form of [`partition`], used when narrowing a possibility
/// set after a round of play.
#[must_use]
pub fn filter_by_feedback(
    rules: Rules,
    list: &[Codeword],
    guess: &Codeword,
    feedback: Feedback,
) -> Vec<Codeword> {
    list.iter()
        .filter(|secret| compare(rules, guess, secret) == feedback)
        .copied()
        .collect()
}
