//! Code-breaking strategies
//!
//! This module contains the partition machinery shared by every breaker
//! and the breakers themselves: exhaustive-first, heuristic, and optimal.

pub mod breaker;
pub mod equivalence;
pub mod frequency;
pub mod heuristic;
pub mod optimal;
mod partition;
pub mod simple;
pub mod tree;

pub use breaker::{CodeBreaker, Phase, STRATEGY_NAMES, SolverError, create_breaker};
pub use equivalence::{ColorSymmetryFilter, DummyFilter, EquivalenceFilter};
pub use frequency::{FrequencyTable, MAX_FEEDBACK_ORDINALS};
pub use heuristic::{
    Heuristic, HeuristicCodeBreaker, MaximizeEntropy, MaximizePartitions, MinimizeAverage,
    MinimizeWorstCase,
};
pub use optimal::{CancelToken, OptimalCodeBreaker, OptimalConfig};
pub use partition::{filter_by_feedback, partition};
pub use simple::SimpleCodeBreaker;
pub use tree::{Child, DepthInfo, EdgeRecord, Node, NodeId, StrategyTree, TreeBuilder};
