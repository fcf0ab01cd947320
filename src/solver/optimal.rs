//! Exhaustive depth-first branch-and-bound search for optimal strategies
//!
//! Minimizes the total number of guesses summed over every remaining
//! secret, optionally under a maximum-rounds constraint. Candidates come
//! from the equivalence-reduced universe; subtrees that cannot beat the
//! incumbent are pruned via a lower-bound table derived from the feedback
//! branching factor. The search is single-threaded and CPU-bound, so it
//! checks a shared cancellation token and a node budget at every
//! recursion boundary and surfaces either as an aborted search rather
//! than a partial tree.

use super::breaker::{BreakerState, CodeBreaker, Phase, SolverError, present_colors};
use super::equivalence::{ColorSymmetryFilter, EquivalenceFilter};
use super::partition::partition;
use super::tree::{Child, Node, NodeId, StrategyTree, TreeBuilder};
use crate::core::{Codeword, ColorMask, Feedback, Rules};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation handle for a running search
///
/// Clone it, hand one copy to the breaker, and flip it from anywhere;
/// the search notices at its next recursion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tuning knobs for the optimal search
#[derive(Debug, Clone, Default)]
pub struct OptimalConfig {
    /// Reject strategies needing more than this many rounds for any secret
    pub max_rounds: Option<u32>,
    /// Abort after visiting this many search nodes
    pub max_nodes: Option<u64>,
}

/// Branch-and-bound breaker minimizing total guesses over all secrets
pub struct OptimalCodeBreaker {
    state: BreakerState,
    config: OptimalConfig,
    cancel: CancelToken,
}

impl OptimalCodeBreaker {
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        Self::with_config(rules, OptimalConfig::default())
    }

    #[must_use]
    pub fn with_config(rules: Rules, config: OptimalConfig) -> Self {
        Self {
            state: BreakerState::new(rules),
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Token observed at every recursion of the search
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

impl CodeBreaker for OptimalCodeBreaker {
    fn name(&self) -> &'static str {
        "optimal"
    }

    fn description(&self) -> &'static str {
        "exhaustive search minimizing the total number of guesses"
    }

    fn rules(&self) -> Rules {
        self.state.rules
    }

    fn phase(&self) -> Phase {
        self.state.phase
    }

    fn possibility_count(&self) -> usize {
        self.state.possibilities.len()
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn make_guess(&self) -> Result<Codeword, SolverError> {
        if self.state.phase == Phase::Done {
            return Err(SolverError::GameOver);
        }
        let possibilities = &self.state.possibilities;
        if possibilities.is_empty() {
            return Err(SolverError::PossibilitiesExhausted);
        }
        if possibilities.len() <= 2 {
            return Ok(possibilities[0]);
        }

        let mut search = Search::new(&self.state, &self.config, &self.cancel);
        let mut scratch = possibilities.clone();
        let mut builder = TreeBuilder::new(self.state.rules);
        // A rounds cap can force a costlier tree than the greedy one, so
        // the greedy cost is only a sound incumbent without the cap.
        let seed = match self.config.max_rounds {
            None => greedy_cost(self.state.rules, &mut scratch.clone()),
            Some(_) => u64::MAX,
        };
        let found = search.best_subtree(
            &mut builder,
            &mut scratch,
            self.state.unguessed,
            self.state.impossible,
            self.config.max_rounds,
            seed,
        )?;
        match found {
            Some((root, _)) => Ok(*builder.node(root).guess()),
            None => Err(SolverError::RoundLimitExceeded),
        }
    }

    fn add_feedback(&mut self, guess: &Codeword, feedback: Feedback) -> Result<(), SolverError> {
        self.state.apply_feedback(guess, feedback)
    }

    fn build_strategy_tree(
        &mut self,
        first_guess: Option<&Codeword>,
    ) -> Result<StrategyTree, SolverError> {
        let rules = self.state.rules;
        let mut scratch = self.state.all.clone();
        if scratch.is_empty() {
            return Err(SolverError::PossibilitiesExhausted);
        }

        let mut search = Search::new(&self.state, &self.config, &self.cancel);
        let mut builder = TreeBuilder::new(rules);
        let unguessed = rules.color_mask();

        let found = match first_guess {
            None => {
                let seed = match self.config.max_rounds {
                    None => greedy_cost(rules, &mut scratch.clone()),
                    Some(_) => u64::MAX,
                };
                search.best_subtree(
                    &mut builder,
                    &mut scratch,
                    unguessed,
                    0,
                    self.config.max_rounds,
                    seed,
                )?
            }
            Some(first) => {
                search.forced_root(&mut builder, &mut scratch, unguessed, first)?
            }
        };

        match found {
            Some((root, _)) => Ok(builder.finish(root)),
            None => Err(SolverError::RoundLimitExceeded),
        }
    }
}

/// Total cost of the first-possibility strategy, used to seed the
/// branch-and-bound incumbent with an achievable bound
fn greedy_cost(rules: Rules, range: &mut [Codeword]) -> u64 {
    if range.is_empty() {
        return 0;
    }
    let guess = range[0];
    let table = partition(rules, range, &guess);
    let mut cost = range.len() as u64;
    let mut offset = 0;
    for ord in 0..table.ordinal_count() {
        let count = table.get(ord) as usize;
        if count == 0 {
            continue;
        }
        if !Feedback::from_ordinal(ord as u8).is_perfect(rules) {
            cost += greedy_cost(rules, &mut range[offset..offset + count]);
        }
        offset += count;
    }
    cost
}

struct Search<'a> {
    rules: Rules,
    all: &'a [Codeword],
    filter: ColorSymmetryFilter,
    max_rounds: Option<u32>,
    max_nodes: Option<u64>,
    visited: u64,
    cancel: &'a CancelToken,
}

impl<'a> Search<'a> {
    fn new(state: &'a BreakerState, config: &OptimalConfig, cancel: &'a CancelToken) -> Self {
        Self {
            rules: state.rules,
            all: &state.all,
            filter: ColorSymmetryFilter,
            max_rounds: config.max_rounds,
            max_nodes: config.max_nodes,
            visited: 0,
            cancel,
        }
    }

    /// Fewest total steps any strategy can need for `n` secrets: one at
    /// depth 1, then at most `branching - 1` more per extra round
    fn lower_bound(&self, n: usize) -> u64 {
        let branching = (self.rules.feedback_count() - 1) as u64;
        let mut remaining = n as u64;
        let mut total = 0u64;
        let mut depth = 1u64;
        let mut capacity = 1u64;
        while remaining > 0 {
            let take = remaining.min(capacity);
            total += depth * take;
            remaining -= take;
            depth += 1;
            capacity = capacity.saturating_mul(branching);
        }
        total
    }

    /// Fewest rounds able to cover `n` secrets at all
    fn min_rounds(&self, n: usize) -> u32 {
        let branching = (self.rules.feedback_count() - 1) as u64;
        let mut covered = 0u64;
        let mut capacity = 1u64;
        let mut rounds = 0u32;
        while covered < n as u64 {
            covered = covered.saturating_add(capacity);
            capacity = capacity.saturating_mul(branching);
            rounds += 1;
        }
        rounds
    }

    fn tick(&mut self) -> Result<(), SolverError> {
        if self.cancel.is_cancelled() {
            return Err(SolverError::SearchAborted);
        }
        self.visited += 1;
        if let Some(limit) = self.max_nodes
            && self.visited > limit
        {
            return Err(SolverError::SearchAborted);
        }
        Ok(())
    }

    /// Best strategy for `range`, if one exists with total cost at most
    /// `max_cost` within `rounds_left`
    ///
    /// `Ok(None)` means "nothing beats the bound", which callers treat as
    /// a pruned branch; hard failures (cancellation, budget) are errors.
    fn best_subtree(
        &mut self,
        builder: &mut TreeBuilder,
        range: &mut [Codeword],
        unguessed: ColorMask,
        impossible: ColorMask,
        rounds_left: Option<u32>,
        max_cost: u64,
    ) -> Result<Option<(NodeId, u64)>, SolverError> {
        self.tick()?;
        let rules = self.rules;
        let n = range.len();
        debug_assert!(n > 0);

        if let Some(rounds) = rounds_left
            && self.min_rounds(n) > rounds
        {
            return Ok(None);
        }
        if self.lower_bound(n) > max_cost {
            return Ok(None);
        }

        // A lone possibility is guessed outright.
        if n == 1 {
            let node = Node::new(range[0], 1, 1, vec![(rules.perfect(), Child::Solved)]);
            return Ok(Some((builder.push(node), 1)));
        }

        let candidates = self
            .filter
            .reduce(rules, self.all, unguessed, impossible);
        let ordered = self.order_candidates(&candidates, range);

        let mut incumbent: Option<(NodeId, u64)> = None;
        let mut limit = max_cost;

        for index in ordered {
            let guess = candidates[index];
            let table = partition(rules, range, &guess);
            if table.nonzero_partitions() == 1
                && table.get(rules.perfect().ordinal() as usize) == 0
            {
                continue; // no information gained; cannot terminate
            }

            // Cheap bound for this guess before any recursion.
            let mut guess_bound = n as u64;
            for ord in 0..table.ordinal_count() {
                let count = table.get(ord) as usize;
                if count > 0 && !Feedback::from_ordinal(ord as u8).is_perfect(rules) {
                    guess_bound += self.lower_bound(count);
                }
            }
            if guess_bound > limit {
                continue;
            }

            let child_unguessed = unguessed & !guess.color_mask();
            let child_rounds = rounds_left.map(|r| r - 1);

            // Remaining optimistic cost of buckets not yet searched; lets
            // each child search run against the tightest available bound.
            let mut pending: u64 = guess_bound - n as u64;
            let mut spent: u64 = n as u64;
            let mut children = Vec::with_capacity(table.nonzero_partitions());
            let mut offset = 0;
            let mut viable = true;

            for ord in 0..table.ordinal_count() {
                let count = table.get(ord) as usize;
                if count == 0 {
                    continue;
                }
                let feedback = Feedback::from_ordinal(ord as u8);
                if feedback.is_perfect(rules) {
                    children.push((feedback, Child::Solved));
                    offset += count;
                    continue;
                }

                let sub = &mut range[offset..offset + count];
                offset += count;
                pending -= self.lower_bound(count);
                let child_limit = limit - spent - pending;
                let child_impossible = rules.color_mask() & !present_colors(sub);
                match self.best_subtree(
                    builder,
                    sub,
                    child_unguessed,
                    child_impossible,
                    child_rounds,
                    child_limit,
                )? {
                    Some((child, cost)) => {
                        spent += cost;
                        children.push((feedback, Child::Node(child)));
                    }
                    None => {
                        viable = false;
                        break;
                    }
                }
            }

            if !viable || spent > limit {
                continue;
            }

            let node = Node::new(guess, n, candidates.len(), children);
            let id = builder.push(node);
            limit = spent.saturating_sub(1);
            incumbent = Some((id, spent));
        }

        Ok(incumbent)
    }

    /// Try candidates in ascending expected-partition-size order so good
    /// incumbents appear early and tighten the bound
    fn order_candidates(&self, candidates: &[Codeword], range: &mut [Codeword]) -> Vec<usize> {
        let rules = self.rules;
        let mut keyed: Vec<(u64, usize)> = candidates
            .iter()
            .enumerate()
            .map(|(index, cand)| {
                let table = partition(rules, range, cand);
                (table.sum_of_squares(), index)
            })
            .collect();
        keyed.sort_by_key(|&(key, index)| (key, index));
        keyed.into_iter().map(|(_, index)| index).collect()
    }

    /// Root expansion for a forced opening guess
    fn forced_root(
        &mut self,
        builder: &mut TreeBuilder,
        range: &mut [Codeword],
        unguessed: ColorMask,
        first: &Codeword,
    ) -> Result<Option<(NodeId, u64)>, SolverError> {
        self.tick()?;
        let rules = self.rules;
        let n = range.len();
        let table = partition(rules, range, first);
        let child_unguessed = unguessed & !first.color_mask();
        let child_rounds = self.max_rounds.map(|r| r.saturating_sub(1));

        let mut spent = n as u64;
        let mut children = Vec::with_capacity(table.nonzero_partitions());
        let mut offset = 0;
        for ord in 0..table.ordinal_count() {
            let count = table.get(ord) as usize;
            if count == 0 {
                continue;
            }
            let feedback = Feedback::from_ordinal(ord as u8);
            if feedback.is_perfect(rules) {
                children.push((feedback, Child::Solved));
                offset += count;
                continue;
            }
            let sub = &mut range[offset..offset + count];
            offset += count;
            let seed = match child_rounds {
                None => greedy_cost(rules, &mut sub.to_vec()),
                Some(_) => u64::MAX,
            };
            let child_impossible = rules.color_mask() & !present_colors(sub);
            match self.best_subtree(
                builder,
                sub,
                child_unguessed,
                child_impossible,
                child_rounds,
                seed,
            )? {
                Some((child, cost)) => {
                    spent += cost;
                    children.push((feedback, Child::Node(child)));
                }
                None => return Ok(None),
            }
        }

        let id = builder.push(Node::new(*first, n, 1, children));
        Ok(Some((id, spent)))
    }
}
