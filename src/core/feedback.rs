//! Feedback: the `(exact, colorMatches)` outcome of comparing two codewords
//!
//! A feedback is stored as a single ordinal `u8` over the dense space
//! ordered primarily by `exact + colorMatches` ascending and secondarily by
//! `exact` ascending. For `pegs` pegs the space has
//! `(pegs+1)(pegs+2)/2` ordinals, one per outcome, including the
//! practically-unreachable `(pegs-1, 1)` case. The perfect match
//! `(pegs, 0)` is always the maximum ordinal.

use super::rules::{MAX_PEGS, Rules};
use std::fmt;

/// Match outcome for one guess/secret pair, as a dense ordinal
///
/// # Examples
/// ```
/// use mastermind_solver::core::Feedback;
///
/// let fb = Feedback::new(2, 1);
/// assert_eq!(fb.exact(), 2);
/// assert_eq!(fb.color_matches(), 1);
/// assert_eq!(fb.to_string(), "2A1B");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Feedback(u8);

impl Feedback {
    /// Create a feedback from its components
    ///
    /// The ordinal of `(exact, color)` with `s = exact + color` is
    /// `s(s+1)/2 + exact`: all outcomes with a smaller total sort first,
    /// then a smaller exact count.
    #[inline]
    #[must_use]
    pub const fn new(exact: u8, color_matches: u8) -> Self {
        debug_assert!(
            exact + color_matches <= MAX_PEGS as u8,
            "Feedback components must sum to at most MAX_PEGS"
        );
        let s = exact + color_matches;
        Self(s * (s + 1) / 2 + exact)
    }

    /// Reconstruct a feedback from a raw ordinal
    #[inline]
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Self {
        Self(ordinal)
    }

    /// The raw ordinal, an index into the dense feedback space
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self.0
    }

    /// Count of pegs matching in both color and position
    #[must_use]
    pub fn exact(self) -> u8 {
        let (exact, _) = self.decode();
        exact
    }

    /// Count of additional color matches ignoring position
    #[must_use]
    pub fn color_matches(self) -> u8 {
        let (_, color) = self.decode();
        color
    }

    /// Whether this is the perfect match `(pegs, 0)` under `rules`
    #[inline]
    #[must_use]
    pub fn is_perfect(self, rules: Rules) -> bool {
        self == rules.perfect()
    }

    /// Whether this ordinal exists in the feedback space of `rules`
    ///
    /// Callers receiving an externally-supplied feedback must check this
    /// before using it against a possibility set.
    #[inline]
    #[must_use]
    pub fn conforms_to(self, rules: Rules) -> bool {
        (self.0 as usize) < rules.feedback_count()
    }

    /// Parse the four-character textual form `"<a>A<b>B"`
    ///
    /// Accepts upper- or lowercase `A`/`B`. Returns `None` for anything
    /// ill-formed, including component sums beyond the largest supported
    /// peg count.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::Feedback;
    ///
    /// assert_eq!(Feedback::parse("2A1B"), Some(Feedback::new(2, 1)));
    /// assert_eq!(Feedback::parse("0a4b"), Some(Feedback::new(0, 4)));
    /// assert_eq!(Feedback::parse("2A1C"), None);
    /// assert_eq!(Feedback::parse("21AB"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 {
            return None;
        }
        if !bytes[0].is_ascii_digit() || !bytes[2].is_ascii_digit() {
            return None;
        }
        if !bytes[1].eq_ignore_ascii_case(&b'A') || !bytes[3].eq_ignore_ascii_case(&b'B') {
            return None;
        }
        let exact = bytes[0] - b'0';
        let color = bytes[2] - b'0';
        if (exact + color) as usize > MAX_PEGS {
            return None;
        }
        Some(Self::new(exact, color))
    }

    /// Recover `(exact, color_matches)` from the ordinal
    fn decode(self) -> (u8, u8) {
        let mut s = 0u8;
        while (s + 1) * (s + 2) / 2 <= self.0 {
            s += 1;
        }
        let exact = self.0 - s * (s + 1) / 2;
        (exact, s - exact)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (exact, color) = self.decode();
        write!(f, "{exact}A{color}B")
    }
}

impl std::str::FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid feedback label: {s}"))
    }
}
