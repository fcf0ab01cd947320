//! Codeword universe enumeration
//!
//! Generates every codeword conforming to a rule set, exactly once, in
//! ascending lexicographic slot order. The order is deterministic for a
//! given rule set, which the breakers rely on for reproducible guessing.

use super::codeword::Codeword;
use super::rules::Rules;

/// Enumerate the full codeword universe for `rules`
///
/// The result has [`Rules::universe_size`] elements: `colors^pegs` when
/// repeats are allowed, the falling factorial otherwise (empty when
/// `pegs > colors` without repeats).
///
/// # Examples
/// ```
/// use mastermind_solver::core::{Rules, generate};
///
/// let rules = Rules::new(4, 6, true).unwrap();
/// let all = generate(rules);
/// assert_eq!(all.len(), 1296);
/// assert_eq!(all[0].to_string(), "0000");
/// assert_eq!(all[1295].to_string(), "5555");
/// ```
#[must_use]
pub fn generate(rules: Rules) -> Vec<Codeword> {
    let mut out = Vec::with_capacity(rules.universe_size());
    let mut current = Codeword::empty(rules);
    extend(rules, &mut current, 0, &mut out);
    out
}

/// Fix pegs `0..peg` and enumerate the remaining slots recursively,
/// honoring the per-color repetition cap
fn extend(rules: Rules, current: &mut Codeword, peg: usize, out: &mut Vec<Codeword>) {
    if peg == rules.pegs() {
        out.push(*current);
        return;
    }
    let cap = if rules.repeatable() { rules.pegs() as u8 } else { 1 };
    for color in 0..rules.colors() as u8 {
        if current.count(color as usize) < cap {
            current.set(peg, color);
            extend(rules, current, peg + 1, out);
            current.clear(peg);
        }
    }
}
