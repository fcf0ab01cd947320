//! Mastermind Solver
//!
//! A codebreaker for Mastermind-style games with configurable peg count,
//! color count, and repeat policy, including an exhaustive optimal-strategy
//! search.
//!
//! # Quick Start
//!
//! ```rust
//! use mastermind_solver::core::{Codeword, Rules, compare};
//!
//! // Classic Mastermind: 4 pegs, 6 colors, repeats allowed
//! let rules = Rules::new(4, 6, true).unwrap();
//!
//! let guess = Codeword::parse(rules, "1122").unwrap();
//! let secret = Codeword::parse(rules, "2112").unwrap();
//!
//! // Two pegs right, two more colors misplaced
//! let feedback = compare(rules, &guess, &secret);
//! assert_eq!(feedback.to_string(), "2A2B");
//! ```

// Core domain types
pub mod core;

// Code-breaking strategies
pub mod solver;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
