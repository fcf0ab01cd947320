//! Secret solving command
//!
//! Plays a full game against a known secret and returns the guess trace.

use crate::core::{Codeword, Feedback, compare};
use crate::solver::{CodeBreaker, Phase};

/// Configuration for solving a secret
pub struct SolveConfig {
    pub secret: String,
    pub max_rounds: usize,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(secret: String) -> Self {
        Self {
            secret,
            max_rounds: 10,
        }
    }
}

/// Result of playing a game to completion
pub struct SolveResult {
    pub success: bool,
    pub rounds: Vec<RoundStep>,
    pub secret: String,
}

/// A single round in the game trace
pub struct RoundStep {
    pub guess: String,
    pub feedback: Feedback,
    pub possibilities_before: usize,
    pub possibilities_after: usize,
}

/// Play a game against `secret` with the given breaker
///
/// # Errors
///
/// Returns an error if:
/// - The secret does not parse under the breaker's rules
/// - The breaker cannot produce a guess
/// - The round limit is reached without finding the secret
pub fn solve_secret(
    config: SolveConfig,
    breaker: &mut dyn CodeBreaker,
) -> Result<SolveResult, String> {
    let rules = breaker.rules();
    let secret = Codeword::parse(rules, &config.secret)
        .map_err(|e| format!("Invalid secret: {e}"))?;

    breaker.reset();
    let mut rounds: Vec<RoundStep> = Vec::new();

    for _ in 0..config.max_rounds {
        let possibilities_before = breaker.possibility_count();
        let guess = breaker.make_guess().map_err(|e| e.to_string())?;
        let feedback = compare(rules, &guess, &secret);
        breaker
            .add_feedback(&guess, feedback)
            .map_err(|e| e.to_string())?;

        rounds.push(RoundStep {
            guess: guess.to_string(),
            feedback,
            possibilities_before,
            possibilities_after: breaker.possibility_count(),
        });

        if breaker.phase() == Phase::Done {
            return Ok(SolveResult {
                success: true,
                rounds,
                secret: config.secret,
            });
        }
    }

    Ok(SolveResult {
        success: false,
        rounds,
        secret: config.secret,
    })
}
