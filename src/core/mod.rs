//! Core domain types for the codebreaking solver
//!
//! Fundamental value types and pure functions: rules, codewords, feedback,
//! comparison, and universe enumeration. Everything here is deterministic
//! and free of shared state.

mod codeword;
mod compare;
mod feedback;
mod generate;
mod rules;

pub use codeword::{Codeword, CodewordError, EMPTY_SLOT};
pub use compare::{compare, compare_many};
pub use feedback::Feedback;
pub use generate::generate;
pub use rules::{ColorMask, MAX_COLORS, MAX_ENCODING_WIDTH, MAX_PEGS, Rules, RulesError};
