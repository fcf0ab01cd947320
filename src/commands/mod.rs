//! Command implementations

pub mod benchmark;
pub mod solve;
pub mod tree;

pub use benchmark::{BenchmarkResult, run_benchmark};
pub use solve::{RoundStep, SolveConfig, SolveResult, solve_secret};
pub use tree::{TreeReport, build_tree};
