//! Immediate and delayed word recall.
//!
//! Both phases score against the same [`WordSet`]; each keeps its own
//! checked set so a word counts once per phase.

use crate::model::score_display;
use crate::wordbank::{WordSet, WORD_COUNT};

use super::tokens;

/// One recall phase.
#[derive(Debug, Clone, Default)]
pub struct RecallTest {
    checked: Vec<String>,
    score: u8,
}

impl RecallTest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit each remembered word not already credited.
    ///
    /// Returns the running score as "N/5".
    pub fn score(&mut self, words: &WordSet, input: &str) -> String {
        for token in tokens(input, &[',']) {
            let token = token.to_lowercase();
            if words.contains(&token) && !self.checked.contains(&token) {
                self.score += 1;
                self.checked.push(token);
            }
        }
        self.display()
    }

    pub fn points(&self) -> u8 {
        self.score
    }

    /// Words credited so far, in the order they were recalled.
    pub fn checked(&self) -> &[String] {
        &self.checked
    }

    pub fn display(&self) -> String {
        score_display(self.score, WORD_COUNT as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> WordSet {
        WordSet::new(["apple", "table", "penny", "garden", "finger"])
    }

    #[test]
    fn repeated_word_counts_once() {
        let mut recall = RecallTest::new();
        assert_eq!(recall.score(&words(), "apple apple"), "1/5");
        assert_eq!(recall.points(), 1);
    }

    #[test]
    fn repeated_submissions_are_idempotent() {
        let words = words();
        let mut recall = RecallTest::new();
        recall.score(&words, "Apple, TABLE");
        recall.score(&words, "apple table");
        assert_eq!(recall.score(&words, "penny,garden"), "4/5");
        assert_eq!(recall.checked(), ["apple", "table", "penny", "garden"]);
    }

    #[test]
    fn all_words_cap_at_five() {
        let mut recall = RecallTest::new();
        let out = recall.score(&words(), "finger garden penny table apple chair apple");
        assert_eq!(out, "5/5");
    }

    #[test]
    fn empty_or_noise_scores_nothing() {
        let mut recall = RecallTest::new();
        assert_eq!(recall.score(&words(), ""), "0/5");
        assert_eq!(recall.score(&words(), " ,, 123 ?! "), "0/5");
        assert_eq!(recall.points(), 0);
    }
}
