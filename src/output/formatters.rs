//! Formatting utilities for terminal output

use crate::core::Feedback;

/// Format feedback as peg symbols: ● per exact match, ○ per color-only
/// match, · for each unmatched position
#[must_use]
pub fn feedback_pegs(feedback: Feedback, pegs: usize) -> String {
    let exact = feedback.exact() as usize;
    let color = feedback.color_matches() as usize;
    let blank = pegs.saturating_sub(exact + color);

    let mut result = String::with_capacity(pegs * 3);
    for _ in 0..exact {
        result.push('●');
    }
    for _ in 0..color {
        result.push('○');
    }
    for _ in 0..blank {
        result.push('·');
    }
    result
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
