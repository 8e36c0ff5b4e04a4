//! Serial 7s: subtract 7 from 100, five times.

use crate::model::score_display;

use super::tokens;

/// The canonical answers. Each is scored on its own, so an early slip does
/// not cost later points.
pub const EXPECTED: [&str; 5] = ["93", "86", "79", "72", "65"];

#[derive(Debug, Clone, Default)]
pub struct SerialSevens {
    checked: Vec<String>,
    score: u8,
}

impl SerialSevens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit each canonical value not already credited. Tokens are matched
    /// literally ("093" does not count).
    ///
    /// Returns the running score as "N/5".
    pub fn score(&mut self, input: &str) -> String {
        for token in tokens(input, &[',']) {
            if EXPECTED.contains(&token) && !self.checked.iter().any(|c| c == token) {
                self.score += 1;
                self.checked.push(token.to_string());
            }
        }
        self.display()
    }

    pub fn points(&self) -> u8 {
        self.score
    }

    pub fn display(&self) -> String {
        score_display(self.score, EXPECTED.len() as u8)
    }
}
