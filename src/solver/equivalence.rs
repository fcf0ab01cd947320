//! Color-symmetry reduction of candidate guesses
//!
//! Two colors are interchangeable when both are still unguessed or both
//! are known impossible: permuting them across every remaining possibility
//! cannot change the outcome of future play, so scoring one guess per
//! symmetry class is enough. `ColorSymmetryFilter` keeps the
//! first-scanned candidate of each class; `DummyFilter` disables the
//! pruning.

use crate::core::{Codeword, ColorMask, MAX_COLORS, MAX_PEGS, Rules};
use rustc_hash::FxHashSet;

/// Reduces a candidate-guess list to one representative per
/// color-symmetry class
pub trait EquivalenceFilter {
    fn name(&self) -> &'static str;

    /// Return the kept representatives, preserving scan order
    fn reduce(
        &self,
        rules: Rules,
        candidates: &[Codeword],
        unguessed: ColorMask,
        impossible: ColorMask,
    ) -> Vec<Codeword>;
}

/// No-op filter: every candidate is its own representative
pub struct DummyFilter;

impl EquivalenceFilter for DummyFilter {
    fn name(&self) -> &'static str {
        "dummy"
    }

    fn reduce(
        &self,
        _rules: Rules,
        candidates: &[Codeword],
        _unguessed: ColorMask,
        _impossible: ColorMask,
    ) -> Vec<Codeword> {
        candidates.to_vec()
    }
}

/// Keeps the first-scanned candidate per color-symmetry class
///
/// A candidate's class is identified by its canonical relabeling: free
/// colors are renamed, in order of first occurrence, to the smallest
/// still-unused color of their own pool (unguessed or impossible). Two
/// candidates are interchangeable exactly when their canonical slot
/// arrays coincide.
pub struct ColorSymmetryFilter;

impl ColorSymmetryFilter {
    fn canonical_slots(
        rules: Rules,
        codeword: &Codeword,
        pools: &[Vec<u8>; 2],
        pool_of: &[Option<usize>; MAX_COLORS],
    ) -> [i8; MAX_PEGS] {
        let mut relabel: [i8; MAX_COLORS] = [-1; MAX_COLORS];
        let mut next = [0usize; 2];
        let mut slots = [crate::core::EMPTY_SLOT; MAX_PEGS];

        for peg in 0..rules.pegs() {
            let color = codeword.slot(peg);
            debug_assert!(color >= 0);
            let color = color as usize;
            slots[peg] = match pool_of[color] {
                None => color as i8,
                Some(pool) => {
                    if relabel[color] < 0 {
                        relabel[color] = pools[pool][next[pool]] as i8;
                        next[pool] += 1;
                    }
                    relabel[color]
                }
            };
        }
        slots
    }
}

impl EquivalenceFilter for ColorSymmetryFilter {
    fn name(&self) -> &'static str {
        "color-symmetry"
    }

    fn reduce(
        &self,
        rules: Rules,
        candidates: &[Codeword],
        unguessed: ColorMask,
        impossible: ColorMask,
    ) -> Vec<Codeword> {
        // A color can be both unguessed and impossible; the impossible pool
        // takes priority so the two pools stay disjoint.
        let mut pools: [Vec<u8>; 2] = [Vec::new(), Vec::new()];
        let mut pool_of: [Option<usize>; MAX_COLORS] = [None; MAX_COLORS];
        for color in 0..rules.colors() {
            let bit = 1u16 << color;
            let pool = if impossible & bit != 0 {
                Some(0)
            } else if unguessed & bit != 0 {
                Some(1)
            } else {
                None
            };
            if let Some(pool) = pool {
                pools[pool].push(color as u8);
                pool_of[color] = Some(pool);
            }
        }

        let mut seen: FxHashSet<[i8; MAX_PEGS]> = FxHashSet::default();
        candidates
            .iter()
            .filter(|cand| seen.insert(Self::canonical_slots(rules, cand, &pools, &pool_of)))
            .copied()
            .collect()
    }
}
