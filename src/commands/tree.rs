//! Strategy tree command
//!
//! Precomputes a full decision tree and summarizes its shape.

use crate::core::Codeword;
use crate::solver::{CodeBreaker, DepthInfo, StrategyTree};
use std::time::{Duration, Instant};

/// Histogram depth cap for reports; deeper leaves land in the last bucket
const REPORT_MAX_DEPTH: usize = 16;

/// Result of building a strategy tree
pub struct TreeReport {
    pub strategy: &'static str,
    pub tree: StrategyTree,
    pub info: DepthInfo,
    pub node_count: usize,
    pub secrets_covered: usize,
    pub average_rounds: f64,
    pub duration: Duration,
}

/// Build the complete decision tree for a breaker
///
/// # Errors
///
/// Returns an error if the first guess does not parse under the
/// breaker's rules or the breaker's search fails.
pub fn build_tree(
    breaker: &mut dyn CodeBreaker,
    first_guess: Option<&str>,
) -> Result<TreeReport, String> {
    let rules = breaker.rules();
    let forced = first_guess
        .map(|text| Codeword::parse(rules, text))
        .transpose()
        .map_err(|e| format!("Invalid first guess: {e}"))?;

    let start = Instant::now();
    let tree = breaker
        .build_strategy_tree(forced.as_ref())
        .map_err(|e| e.to_string())?;
    let duration = start.elapsed();

    let info = tree.depth_info(REPORT_MAX_DEPTH);
    let secrets_covered: usize = info.histogram.iter().sum();
    let average_rounds = if secrets_covered == 0 {
        0.0
    } else {
        info.total_steps as f64 / secrets_covered as f64
    };

    Ok(TreeReport {
        strategy: breaker.name(),
        node_count: tree.node_count(),
        tree,
        info,
        secrets_covered,
        average_rounds,
        duration,
    })
}
