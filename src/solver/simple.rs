//! The trivial breaker: always guess the first remaining possibility

use super::breaker::{BreakerState, CodeBreaker, Phase, SolverError};
use super::partition::partition;
use super::tree::{Child, Node, NodeId, StrategyTree, TreeBuilder};
use crate::core::{Codeword, Feedback, Rules};

/// Guesses the first element of the possibility set, in generator order
///
/// Simple to reason about and fast, but several guesses worse than the
/// scored strategies on average.
pub struct SimpleCodeBreaker {
    state: BreakerState,
}

impl SimpleCodeBreaker {
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        Self {
            state: BreakerState::new(rules),
        }
    }

    fn build_node(
        &self,
        builder: &mut TreeBuilder,
        range: &mut [Codeword],
        forced: Option<&Codeword>,
    ) -> NodeId {
        let rules = self.state.rules;
        let guess = forced.copied().unwrap_or(range[0]);
        let table = partition(rules, range, &guess);

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
            } else {
                let sub = &mut range[offset..offset + count];
                let child = self.build_node(builder, sub, None);
                children.push((feedback, Child::Node(child)));
            }
            offset += count;
        }

        builder.push(Node::new(guess, range.len(), range.len(), children))
    }
}

impl CodeBreaker for SimpleCodeBreaker {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn description(&self) -> &'static str {
        "guess the first remaining possibility"
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
        self.state.first_possibility()
    }

    fn add_feedback(&mut self, guess: &Codeword, feedback: Feedback) -> Result<(), SolverError> {
        self.state.apply_feedback(guess, feedback)
    }

    fn build_strategy_tree(
        &mut self,
        first_guess: Option<&Codeword>,
    ) -> Result<StrategyTree, SolverError> {
        let mut scratch = self.state.all.clone();
        if scratch.is_empty() {
            return Err(SolverError::PossibilitiesExhausted);
        }
        let mut builder = TreeBuilder::new(self.state.rules);
        let root = self.build_node(&mut builder, &mut scratch, first_guess);
        Ok(builder.finish(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compare;
    use crate::solver::tree::replay;

    #[test]
    fn plays_a_full_game() {
        let rules = Rules::new(4, 6, true).unwrap();
        let secret = Codeword::parse(rules, "4310").unwrap();
        let mut breaker = SimpleCodeBreaker::new(rules);
        breaker.reset();

        let mut rounds = 0;
        loop {
            rounds += 1;
            assert!(rounds <= 10, "simple breaker failed to converge");
            let guess = breaker.make_guess().unwrap();
            let feedback = compare(rules, &guess, &secret);
            breaker.add_feedback(&guess, feedback).unwrap();
            if breaker.phase() == Phase::Done {
                break;
            }
        }
        assert_eq!(breaker.possibility_count(), 1);
    }

    #[test]
    fn make_guess_is_first_possibility() {
        let rules = Rules::new(4, 6, true).unwrap();
        let mut breaker = SimpleCodeBreaker::new(rules);
        breaker.reset();
        assert_eq!(breaker.make_guess().unwrap().to_string(), "0000");
        // Deterministic across repeated calls.
        assert_eq!(breaker.make_guess().unwrap().to_string(), "0000");
    }

    #[test]
    fn tree_covers_every_secret() {
        let rules = Rules::new(3, 4, true).unwrap();
        let mut breaker = SimpleCodeBreaker::new(rules);
        let tree = breaker.build_strategy_tree(None).unwrap();

        let universe = crate::core::generate(rules);
        let info = tree.depth_info(16);
        assert_eq!(info.histogram.iter().sum::<usize>(), universe.len());

        let mut total = 0u64;
        for secret in &universe {
            let depth = replay(&tree, secret).expect("every secret reachable");
            total += depth as u64;
        }
        assert_eq!(total, info.total_steps);
    }

    #[test]
    fn tree_covers_every_secret_without_repeats() {
        // 4 pegs over 10 colors with no repeats: 10*9*8*7 = 5040 codewords,
        // exercising the distinct-colors comparison path end to end.
        let rules = Rules::new(4, 10, false).unwrap();
        let mut breaker = SimpleCodeBreaker::new(rules);
        let tree = breaker.build_strategy_tree(None).unwrap();

        let universe = crate::core::generate(rules);
        assert_eq!(universe.len(), 5040);
        let info = tree.depth_info(16);
        assert_eq!(info.histogram.iter().sum::<usize>(), 5040);

        let mut total = 0u64;
        for secret in &universe {
            let depth = replay(&tree, secret).expect("every secret reachable");
            total += depth as u64;
        }
        assert_eq!(total, info.total_steps);
    }

    #[test]
    fn tree_respects_forced_first_guess() {
        let rules = Rules::new(4, 6, true).unwrap();
        let first = Codeword::parse(rules, "1122").unwrap();
        let mut breaker = SimpleCodeBreaker::new(rules);
        let tree = breaker.build_strategy_tree(Some(&first)).unwrap();

        let root = tree.node(tree.root());
        assert_eq!(*root.guess(), first);
        assert_eq!(root.possibility_count(), 1296);
        // The perfect bucket holds exactly the forced guess itself.
        assert_eq!(root.child(rules.perfect()), Some(Child::Solved));
        let info = tree.depth_info(16);
        assert_eq!(info.histogram.iter().sum::<usize>(), 1296);
    }
}
