//! Shared codebreaker contract and game state
//!
//! Every breaker drives the same state machine: `reset` enters play,
//! `make_guess` proposes a codeword, `add_feedback` narrows the
//! possibility set, and a perfect feedback finishes the game. Strategy
//! differences live entirely in guess selection and tree building.

use super::heuristic::{
    HeuristicCodeBreaker, MaximizeEntropy, MaximizePartitions, MinimizeAverage, MinimizeWorstCase,
};
use super::optimal::OptimalCodeBreaker;
use super::partition::filter_by_feedback;
use super::simple::SimpleCodeBreaker;
use super::tree::StrategyTree;
use crate::core::{Codeword, ColorMask, Feedback, Rules, generate};
use std::fmt;

/// Factory names accepted by [`create_breaker`]
pub const STRATEGY_NAMES: &[&str] = &[
    "simple", "minmax", "minavg", "entropy", "maxparts", "optimal",
];

/// Game phase of a breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Playing,
    Done,
}

/// Errors surfaced by breaker operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// `make_guess` after the game already finished
    GameOver,
    /// The possibility set became empty: the feedback sequence is
    /// inconsistent with every codeword
    PossibilitiesExhausted,
    /// A feedback outside the rule set's ordinal space
    NonconformingFeedback(Feedback),
    /// The optimal search hit its node budget or was cancelled
    SearchAborted,
    /// No strategy exists within the configured round limit
    RoundLimitExceeded,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver => write!(f, "The game is already finished"),
            Self::PossibilitiesExhausted => {
                write!(f, "No codeword is consistent with the feedback received")
            }
            Self::NonconformingFeedback(fb) => {
                write!(f, "Feedback {fb} does not conform to the active rules")
            }
            Self::SearchAborted => write!(f, "Search aborted before completion"),
            Self::RoundLimitExceeded => {
                write!(f, "No strategy fits within the configured round limit")
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// A codebreaking strategy
///
/// `build_strategy_tree` is a pure function of the rules and the optional
/// forced first guess; it does not require prior play and does not
/// observe `reset`/`add_feedback` state.
pub trait CodeBreaker {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn rules(&self) -> Rules;
    fn phase(&self) -> Phase;

    /// Codewords still consistent with the feedback received so far
    fn possibility_count(&self) -> usize;

    /// Restore the full possibility set and enter play
    fn reset(&mut self);

    /// Propose a guess for the current possibility set
    ///
    /// # Errors
    /// [`SolverError::GameOver`] after a perfect feedback;
    /// [`SolverError::PossibilitiesExhausted`] if nothing remains.
    fn make_guess(&self) -> Result<Codeword, SolverError>;

    /// Narrow the possibility set by one round of feedback
    ///
    /// # Errors
    /// [`SolverError::NonconformingFeedback`] for a feedback outside the
    /// rules' ordinal space; [`SolverError::PossibilitiesExhausted`] when
    /// the narrowed set is empty.
    fn add_feedback(&mut self, guess: &Codeword, feedback: Feedback) -> Result<(), SolverError>;

    /// Build the complete decision tree for every possible secret
    ///
    /// # Errors
    /// Strategy-specific: the optimal breaker can abort on budget or
    /// round-limit grounds.
    fn build_strategy_tree(
        &mut self,
        first_guess: Option<&Codeword>,
    ) -> Result<StrategyTree, SolverError>;
}

/// Construct a breaker by factory name
///
/// Recognized names are listed in [`STRATEGY_NAMES`]; anything else
/// yields `None`.
#[must_use]
pub fn create_breaker(name: &str, rules: Rules) -> Option<Box<dyn CodeBreaker>> {
    match name {
        "simple" => Some(Box::new(SimpleCodeBreaker::new(rules))),
        "minmax" => Some(Box::new(HeuristicCodeBreaker::new(rules, MinimizeWorstCase))),
        "minavg" => Some(Box::new(HeuristicCodeBreaker::new(rules, MinimizeAverage))),
        "entropy" => Some(Box::new(HeuristicCodeBreaker::new(rules, MaximizeEntropy))),
        "maxparts" => Some(Box::new(HeuristicCodeBreaker::new(
            rules,
            MaximizePartitions,
        ))),
        "optimal" => Some(Box::new(OptimalCodeBreaker::new(rules))),
        _ => None,
    }
}

/// State shared by every breaker implementation
#[derive(Debug, Clone)]
pub(crate) struct BreakerState {
    pub rules: Rules,
    pub all: Vec<Codeword>,
    pub possibilities: Vec<Codeword>,
    pub guessed: ColorMask,
    pub unguessed: ColorMask,
    pub impossible: ColorMask,
    pub phase: Phase,
}

impl BreakerState {
    pub fn new(rules: Rules) -> Self {
        let all = generate(rules);
        Self {
            rules,
            possibilities: all.clone(),
            all,
            guessed: 0,
            unguessed: rules.color_mask(),
            impossible: 0,
            phase: Phase::Initialized,
        }
    }

    pub fn reset(&mut self) {
        self.possibilities = self.all.clone();
        self.guessed = 0;
        self.unguessed = self.rules.color_mask();
        self.impossible = 0;
        self.phase = Phase::Playing;
    }

    /// First remaining possibility, used by the trivial guess paths
    pub fn first_possibility(&self) -> Result<Codeword, SolverError> {
        if self.phase == Phase::Done {
            return Err(SolverError::GameOver);
        }
        self.possibilities
            .first()
            .copied()
            .ok_or(SolverError::PossibilitiesExhausted)
    }

    /// Narrow possibilities to those consistent with `feedback` and update
    /// the color masks
    pub fn apply_feedback(
        &mut self,
        guess: &Codeword,
        feedback: Feedback,
    ) -> Result<(), SolverError> {
        if !feedback.conforms_to(self.rules) {
            return Err(SolverError::NonconformingFeedback(feedback));
        }
        let narrowed = filter_by_feedback(self.rules, &self.possibilities, guess, feedback);
        if narrowed.is_empty() {
            return Err(SolverError::PossibilitiesExhausted);
        }
        self.possibilities = narrowed;

        self.guessed |= guess.color_mask();
        self.unguessed = self.rules.color_mask() & !self.guessed;
        self.impossible = self.rules.color_mask() & !present_colors(&self.possibilities);

        if feedback.is_perfect(self.rules) {
            self.phase = Phase::Done;
        }
        Ok(())
    }
}

/// Union of the colors appearing anywhere in `codewords`
pub(crate) fn present_colors(codewords: &[Codeword]) -> ColorMask {
    codewords
        .iter()
        .fold(0, |mask, cw| mask | cw.color_mask())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Rules {
        Rules::new(4, 6, true).unwrap()
    }

    #[test]
    fn factory_knows_every_strategy() {
        let rules = rules();
        for name in STRATEGY_NAMES {
            let breaker = create_breaker(name, rules).unwrap();
            assert_eq!(breaker.name(), *name);
            assert!(!breaker.description().is_empty());
        }
        assert!(create_breaker("bogus", rules).is_none());
    }

    #[test]
    fn state_machine_reset_and_narrowing() {
        let rules = rules();
        let mut state = BreakerState::new(rules);
        assert_eq!(state.phase, Phase::Initialized);
        assert_eq!(state.possibilities.len(), 1296);

        state.reset();
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.unguessed, rules.color_mask());
        assert_eq!(state.impossible, 0);

        let guess = Codeword::parse(rules, "1122").unwrap();
        state.apply_feedback(&guess, Feedback::new(0, 0)).unwrap();
        // 0A0B removes every codeword containing colors 1 or 2.
        assert_eq!(state.possibilities.len(), 256);
        assert_eq!(state.unguessed & 0b110, 0);
        assert_eq!(state.impossible, 0b110);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn perfect_feedback_finishes_the_game() {
        let rules = rules();
        let mut state = BreakerState::new(rules);
        state.reset();
        let guess = Codeword::parse(rules, "1122").unwrap();
        state.apply_feedback(&guess, rules.perfect()).unwrap();
        assert_eq!(state.phase, Phase::Done);
        assert_eq!(state.possibilities.len(), 1);
        assert_eq!(state.possibilities[0], guess);
        assert!(matches!(
            state.first_possibility(),
            Err(SolverError::GameOver)
        ));
    }

    #[test]
    fn inconsistent_feedback_is_an_error() {
        let rules = rules();
        let mut state = BreakerState::new(rules);
        state.reset();
        let guess = Codeword::parse(rules, "1122").unwrap();
        state.apply_feedback(&guess, Feedback::new(0, 0)).unwrap();
        // Claiming 4A0B for a codeword already excluded empties the set.
        let stale = Codeword::parse(rules, "1111").unwrap();
        assert_eq!(
            state.apply_feedback(&stale, rules.perfect()),
            Err(SolverError::PossibilitiesExhausted)
        );
    }

    #[test]
    fn nonconforming_feedback_is_rejected() {
        let rules = rules();
        let mut state = BreakerState::new(rules);
        state.reset();
        let guess = Codeword::parse(rules, "1122").unwrap();
        let bad = Feedback::new(5, 0);
        assert_eq!(
            state.apply_feedback(&guess, bad),
            Err(SolverError::NonconformingFeedback(bad))
        );
        // The possibility set is untouched by the rejected feedback.
        assert_eq!(state.possibilities.len(), 1296);
    }

    #[test]
    fn present_colors_union() {
        let rules = rules();
        let list = vec![
            Codeword::parse(rules, "0011").unwrap(),
            Codeword::parse(rules, "2233").unwrap(),
        ];
        assert_eq!(present_colors(&list), 0b1111);
        assert_eq!(present_colors(&[]), 0);
    }
}
