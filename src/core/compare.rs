//! Codeword comparison: the hottest operation in the solver
//!
//! Two code paths produce the feedback. The general path works for any
//! rules via per-color count minimums. When repeats are disallowed every
//! per-color count is 0 or 1, so the color-match total collapses to a
//! popcount of intersected color masks. The two paths must agree; the
//! tests check the equivalence over full universes, not a sample.

use super::codeword::Codeword;
use super::feedback::Feedback;
use super::rules::Rules;

/// Compare one guess against one secret
///
/// `exact` counts positions with identical colors; `color_matches` counts
/// the additional positionless color matches. Both codewords must conform
/// to `rules`.
///
/// # Examples
/// ```
/// use mastermind_solver::core::{Codeword, Feedback, Rules, compare};
///
/// let rules = Rules::new(4, 6, true).unwrap();
/// let guess = Codeword::parse(rules, "1122").unwrap();
/// let secret = Codeword::parse(rules, "2112").unwrap();
/// assert_eq!(compare(rules, &guess, &secret), Feedback::new(2, 2));
/// ```
#[inline]
#[must_use]
pub fn compare(rules: Rules, guess: &Codeword, secret: &Codeword) -> Feedback {
    if rules.repeatable() {
        compare_general(rules, guess, secret)
    } else {
        compare_distinct(rules, guess, secret)
    }
}

/// Compare one guess against many secrets, order-preserving
#[must_use]
pub fn compare_many(rules: Rules, guess: &Codeword, secrets: &[Codeword]) -> Vec<Feedback> {
    secrets
        .iter()
        .map(|secret| compare(rules, guess, secret))
        .collect()
}

/// General path: color matches via per-color count minimums
fn compare_general(rules: Rules, guess: &Codeword, secret: &Codeword) -> Feedback {
    let exact = exact_matches(rules, guess, secret);
    let mut total = 0u8;
    for color in 0..rules.colors() {
        total += guess.count(color).min(secret.count(color));
    }
    Feedback::new(exact, total - exact)
}

/// No-repeat path: every count is 0 or 1, so intersecting the color masks
/// and counting bits gives the color-match total directly
fn compare_distinct(rules: Rules, guess: &Codeword, secret: &Codeword) -> Feedback {
    let exact = exact_matches(rules, guess, secret);
    let total = (guess.color_mask() & secret.color_mask()).count_ones() as u8;
    Feedback::new(exact, total - exact)
}

#[inline]
fn exact_matches(rules: Rules, guess: &Codeword, secret: &Codeword) -> u8 {
    let mut exact = 0u8;
    for peg in 0..rules.pegs() {
        if guess.slot(peg) == secret.slot(peg) {
            exact += 1;
        }
    }
    exact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generate;

    fn cw(rules: Rules, text: &str) -> Codeword {
        Codeword::parse(rules, text).unwrap()
    }

    #[test]
    fn compare_classic_cases() {
        let rules = Rules::new(4, 6, true).unwrap();
        let secret = cw(rules, "1234");

        assert_eq!(compare(rules, &cw(rules, "1234"), &secret), Feedback::new(4, 0));
        assert_eq!(compare(rules, &cw(rules, "1243"), &secret), Feedback::new(2, 2));
        assert_eq!(compare(rules, &cw(rules, "4321"), &secret), Feedback::new(0, 4));
        assert_eq!(compare(rules, &cw(rules, "5555"), &secret), Feedback::new(0, 0));
        assert_eq!(compare(rules, &cw(rules, "1111"), &secret), Feedback::new(1, 0));
    }

    #[test]
    fn compare_duplicate_colors() {
        let rules = Rules::new(4, 6, true).unwrap();
        // Guess has two 1s but the secret only one: min(2, 1) = 1 match.
        let secret = cw(rules, "1223");
        assert_eq!(compare(rules, &cw(rules, "1145"), &secret), Feedback::new(1, 0));
        // Both 2s line up on counts; one is positional.
        assert_eq!(compare(rules, &cw(rules, "2254"), &secret), Feedback::new(1, 1));
    }

    #[test]
    fn compare_is_symmetric() {
        let rules = Rules::new(3, 5, true).unwrap();
        let all = generate(rules);
        for a in &all {
            for b in &all {
                assert_eq!(compare(rules, a, b), compare(rules, b, a));
            }
        }
    }

    #[test]
    fn compare_self_is_perfect() {
        let rules = Rules::new(4, 6, true).unwrap();
        for cw in generate(rules).iter().step_by(37) {
            assert!(compare(rules, cw, cw).is_perfect(rules));
        }
    }

    #[test]
    fn distinct_path_matches_general_path() {
        // Run both paths over the full no-repeat universe. Equality here is
        // a correctness invariant of the comparator, not a sampling check.
        let rules = Rules::new(3, 6, false).unwrap();
        let all = generate(rules);
        for a in &all {
            for b in &all {
                assert_eq!(
                    compare_distinct(rules, a, b),
                    compare_general(rules, a, b)
                );
            }
        }
    }

    #[test]
    fn compare_many_preserves_order() {
        let rules = Rules::new(4, 6, true).unwrap();
        let guess = cw(rules, "1122");
        let secrets = [cw(rules, "1122"), cw(rules, "3344"), cw(rules, "1212")];
        let feedbacks = compare_many(rules, &guess, &secrets);
        assert_eq!(feedbacks.len(), 3);
        assert_eq!(feedbacks[0], Feedback::new(4, 0));
        assert_eq!(feedbacks[1], Feedback::new(0, 0));
        assert_eq!(feedbacks[2], Feedback::new(2, 2));
    }
}
