//! Codeword representation
//!
//! A codeword is a fixed-width tuple of peg colors together with derived
//! per-color counts and a present-color bitmask. It is a plain `Copy`
//! value: built once (by the generator or the parser) and never mutated
//! afterwards. The textual form is one digit per peg, `'0' + color`,
//! e.g. `1122` for colors 1,1,2,2.

use super::rules::{ColorMask, MAX_COLORS, MAX_PEGS, Rules};
use std::fmt;

/// Slot value for a peg that has not been assigned a color.
pub const EMPTY_SLOT: i8 = -1;

/// One fixed-length sequence of peg colors
///
/// Invariant: `count(c)` equals the number of slots holding color `c`, and
/// `color_mask()` has exactly the bits of colors with a nonzero count.
///
/// # Examples
/// ```
/// use mastermind_solver::core::{Codeword, Rules};
///
/// let rules = Rules::new(4, 6, true).unwrap();
/// let cw = Codeword::parse(rules, "1122").unwrap();
/// assert_eq!(cw.slot(0), 1);
/// assert_eq!(cw.count(2), 2);
/// assert_eq!(cw.to_string(), "1122");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword {
    slots: [i8; MAX_PEGS],
    counts: [u8; MAX_COLORS],
    mask: ColorMask,
    pegs: u8,
}

/// Error type for invalid codeword text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodewordError {
    WrongLength { expected: usize, got: usize },
    InvalidDigit(char),
    ColorOutOfRange(u8),
    RepeatedColor(u8),
}

impl fmt::Display for CodewordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { expected, got } => {
                write!(f, "Codeword must have exactly {expected} digits, got {got}")
            }
            Self::InvalidDigit(ch) => write!(f, "Codeword digit expected, got {ch:?}"),
            Self::ColorOutOfRange(color) => {
                write!(f, "Color {color} is outside the alphabet")
            }
            Self::RepeatedColor(color) => {
                write!(f, "Color {color} repeats but repeats are disallowed")
            }
        }
    }
}

impl std::error::Error for CodewordError {}

impl Codeword {
    /// An all-empty codeword: every slot is [`EMPTY_SLOT`]
    #[must_use]
    pub fn empty(rules: Rules) -> Self {
        Self {
            slots: [EMPTY_SLOT; MAX_PEGS],
            counts: [0; MAX_COLORS],
            mask: 0,
            pegs: rules.pegs() as u8,
        }
    }

    /// Parse a digit-string codeword under `rules`
    ///
    /// # Errors
    /// Returns `CodewordError` if the length is not `rules.pegs()`, a
    /// character is not a digit, a digit names a color outside the
    /// alphabet, or a color repeats under no-repeat rules.
    pub fn parse(rules: Rules, text: &str) -> Result<Self, CodewordError> {
        let digits: Vec<char> = text.chars().collect();
        if digits.len() != rules.pegs() {
            return Err(CodewordError::WrongLength {
                expected: rules.pegs(),
                got: digits.len(),
            });
        }

        let mut codeword = Self::empty(rules);
        for (peg, ch) in digits.into_iter().enumerate() {
            let color = ch
                .to_digit(10)
                .ok_or(CodewordError::InvalidDigit(ch))? as u8;
            if color as usize >= rules.colors() {
                return Err(CodewordError::ColorOutOfRange(color));
            }
            if !rules.repeatable() && codeword.count(color as usize) > 0 {
                return Err(CodewordError::RepeatedColor(color));
            }
            codeword.set(peg, color);
        }
        Ok(codeword)
    }

    /// Assign `color` to `peg`, keeping counts and mask in sync
    ///
    /// Construction-time only; codewords are immutable once handed out.
    pub(crate) fn set(&mut self, peg: usize, color: u8) {
        debug_assert!(peg < self.pegs as usize);
        debug_assert!((color as usize) < MAX_COLORS);
        self.clear(peg);
        self.slots[peg] = color as i8;
        self.counts[color as usize] += 1;
        self.mask |= 1 << color;
    }

    /// Return `peg` to the empty state
    pub(crate) fn clear(&mut self, peg: usize) {
        let old = self.slots[peg];
        if old >= 0 {
            let old = old as usize;
            self.counts[old] -= 1;
            if self.counts[old] == 0 {
                self.mask &= !(1 << old);
            }
            self.slots[peg] = EMPTY_SLOT;
        }
    }

    /// Color at `peg`, or [`EMPTY_SLOT`]
    #[inline]
    #[must_use]
    pub const fn slot(&self, peg: usize) -> i8 {
        self.slots[peg]
    }

    /// Occurrences of `color` across all slots
    #[inline]
    #[must_use]
    pub const fn count(&self, color: usize) -> u8 {
        self.counts[color]
    }

    /// Bitmask of colors present in this codeword
    #[inline]
    #[must_use]
    pub const fn color_mask(&self) -> ColorMask {
        self.mask
    }

    /// Number of pegs
    #[inline]
    #[must_use]
    pub const fn pegs(&self) -> usize {
        self.pegs as usize
    }

    /// Slot colors as a fixed array, for use as a hash key
    #[inline]
    #[must_use]
    pub(crate) const fn slots(&self) -> [i8; MAX_PEGS] {
        self.slots
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for peg in 0..self.pegs as usize {
            let slot = self.slots[peg];
            if slot < 0 {
                write!(f, ".")?;
            } else {
                write!(f, "{slot}")?;
            }
        }
        Ok(())
    }
}
