//! Game rules: peg count, color count, and the repeat-allowed flag
//!
//! `Rules` is a small validated value object. Everything else in the crate
//! takes its dimensions from here: codeword width, alphabet size, and the
//! dense feedback-ordinal space.

use super::feedback::Feedback;
use std::fmt;

/// Maximum number of pegs a codeword can have.
///
/// Bounded by the single-digit textual feedback form (`"4A0B"`).
pub const MAX_PEGS: usize = 9;

/// Maximum number of colors in the alphabet.
///
/// Bounded by the one-digit-per-peg textual codeword form.
pub const MAX_COLORS: usize = 10;

/// Upper bound on `pegs + colors`, fixed by the encoding width shared by
/// codewords and feedback ordinals.
pub const MAX_ENCODING_WIDTH: usize = 16;

/// Bitmask over colors; bit `c` is set when color `c` is in the set.
pub type ColorMask = u16;

/// Immutable game configuration
///
/// Validated at construction; malformed configurations are rejected,
/// never clamped.
///
/// # Examples
/// ```
/// use mastermind_solver::core::Rules;
///
/// let rules = Rules::new(4, 6, true).unwrap();
/// assert_eq!(rules.pegs(), 4);
/// assert_eq!(rules.colors(), 6);
/// assert!(rules.repeatable());
///
/// assert!(Rules::new(0, 6, true).is_err());
/// assert!(Rules::new(9, 10, true).is_err()); // 9 + 10 > 16
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pegs: u8,
    colors: u8,
    repeatable: bool,
}

/// Error type for malformed rule configurations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    PegsOutOfRange(u8),
    ColorsOutOfRange(u8),
    EncodingOverflow { pegs: u8, colors: u8 },
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PegsOutOfRange(pegs) => {
                write!(f, "Peg count must be in 1..={MAX_PEGS}, got {pegs}")
            }
            Self::ColorsOutOfRange(colors) => {
                write!(f, "Color count must be in 1..={MAX_COLORS}, got {colors}")
            }
            Self::EncodingOverflow { pegs, colors } => {
                write!(
                    f,
                    "pegs + colors must be at most {MAX_ENCODING_WIDTH}, got {pegs} + {colors}"
                )
            }
        }
    }
}

impl std::error::Error for RulesError {}

impl Rules {
    /// Create a validated rule set
    ///
    /// # Errors
    /// Returns `RulesError` if:
    /// - `pegs` is 0 or exceeds [`MAX_PEGS`]
    /// - `colors` is 0 or exceeds [`MAX_COLORS`]
    /// - `pegs + colors` exceeds [`MAX_ENCODING_WIDTH`]
    pub fn new(pegs: u8, colors: u8, repeatable: bool) -> Result<Self, RulesError> {
        if pegs == 0 || pegs as usize > MAX_PEGS {
            return Err(RulesError::PegsOutOfRange(pegs));
        }
        if colors == 0 || colors as usize > MAX_COLORS {
            return Err(RulesError::ColorsOutOfRange(colors));
        }
        if pegs as usize + colors as usize > MAX_ENCODING_WIDTH {
            return Err(RulesError::EncodingOverflow { pegs, colors });
        }
        Ok(Self {
            pegs,
            colors,
            repeatable,
        })
    }

    /// Number of pegs per codeword
    #[inline]
    #[must_use]
    pub const fn pegs(self) -> usize {
        self.pegs as usize
    }

    /// Number of colors in the alphabet
    #[inline]
    #[must_use]
    pub const fn colors(self) -> usize {
        self.colors as usize
    }

    /// Whether a color may appear on more than one peg
    #[inline]
    #[must_use]
    pub const fn repeatable(self) -> bool {
        self.repeatable
    }

    /// Size of the dense feedback-ordinal space: `(pegs+1)(pegs+2)/2`
    #[inline]
    #[must_use]
    pub const fn feedback_count(self) -> usize {
        let p = self.pegs as usize;
        (p + 1) * (p + 2) / 2
    }

    /// The perfect-match feedback `(pegs, 0)`, the maximum ordinal
    #[inline]
    #[must_use]
    pub const fn perfect(self) -> Feedback {
        Feedback::new(self.pegs, 0)
    }

    /// Bitmask with one bit set per color in the alphabet
    #[inline]
    #[must_use]
    pub const fn color_mask(self) -> ColorMask {
        (1u16 << self.colors) - 1
    }

    /// Number of codewords conforming to these rules
    ///
    /// `colors^pegs` when repeats are allowed, otherwise the falling
    /// factorial `colors × (colors-1) × … × (colors-pegs+1)` (zero when
    /// `pegs > colors`).
    #[must_use]
    pub fn universe_size(self) -> usize {
        let (pegs, colors) = (self.pegs(), self.colors());
        if self.repeatable {
            colors.pow(pegs as u32)
        } else if pegs > colors {
            0
        } else {
            ((colors - pegs + 1)..=colors).product()
        }
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pegs, {} colors, repeats {}",
            self.pegs,
            self.colors,
            if self.repeatable {
                "allowed"
            } else {
                "disallowed"
            }
        )
    }
}
