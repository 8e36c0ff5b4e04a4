//! Stroop color-word interference.
//!
//! A color name is shown in a colored ink; the answer is the ink, not the
//! word. Most trials are incongruent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{score_display, Subtest};
use crate::random::{choose, RandomSource};

/// Trials per session.
pub const TRIAL_COUNT: usize = 10;

/// Probability that a trial's ink differs from its word.
pub const INCONGRUENT_PROBABILITY: f64 = 0.7;

/// The four colors used as both words and inks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InkColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl InkColor {
    pub const ALL: [InkColor; 4] = [
        InkColor::Red,
        InkColor::Blue,
        InkColor::Green,
        InkColor::Yellow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InkColor::Red => "red",
            InkColor::Blue => "blue",
            InkColor::Green => "green",
            InkColor::Yellow => "yellow",
        }
    }

    /// Display color as RGBA components in `0.0..=1.0`.
    pub fn rgba(self) -> [f32; 4] {
        match self {
            InkColor::Red => [1.0, 0.2, 0.2, 1.0],
            InkColor::Blue => [0.2, 0.4, 1.0, 1.0],
            InkColor::Green => [0.2, 0.8, 0.2, 1.0],
            InkColor::Yellow => [0.9, 0.9, 0.2, 1.0],
        }
    }

    /// Parse a color name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Option<InkColor> {
        let name = name.trim().to_lowercase();
        InkColor::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for InkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One trial: the word shown and the ink it is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StroopTrial {
    pub word: InkColor,
    pub ink: InkColor,
}

impl StroopTrial {
    /// The word as displayed, upper-case.
    pub fn word_text(&self) -> String {
        self.word.name().to_uppercase()
    }

    pub fn ink_rgba(&self) -> [f32; 4] {
        self.ink.rgba()
    }

    pub fn is_congruent(&self) -> bool {
        self.word == self.ink
    }
}

/// Draw a trial list. For each trial a word is chosen, then a float draw
/// below [`INCONGRUENT_PROBABILITY`] picks a different ink; otherwise the
/// ink matches the word.
pub fn generate_trials(rng: &mut dyn RandomSource, count: usize) -> Vec<StroopTrial> {
    (0..count)
        .map(|_| {
            let word = *choose(rng, &InkColor::ALL);
            let ink = if rng.random_float() < INCONGRUENT_PROBABILITY {
                let others: Vec<InkColor> =
                    InkColor::ALL.into_iter().filter(|c| *c != word).collect();
                *choose(rng, &others)
            } else {
                word
            };
            StroopTrial { word, ink }
        })
        .collect()
}

/// Points for a number of correct answers out of ten.
pub fn stroop_points(correct: usize) -> u8 {
    match correct {
        9.. => 5,
        7..=8 => 4,
        5..=6 => 3,
        3..=4 => 2,
        1..=2 => 1,
        _ => 0,
    }
}

/// Stroop subtest state.
#[derive(Debug, Clone)]
pub struct Stroop {
    trials: Vec<StroopTrial>,
    current: usize,
    correct: usize,
    score: Option<u8>,
}

impl Stroop {
    pub fn new(trials: Vec<StroopTrial>) -> Self {
        Self {
            trials,
            current: 0,
            correct: 0,
            score: None,
        }
    }

    pub fn trials(&self) -> &[StroopTrial] {
        &self.trials
    }

    /// The trial awaiting an answer, if any.
    pub fn current_trial(&self) -> Option<&StroopTrial> {
        if self.score.is_some() {
            return None;
        }
        self.trials.get(self.current)
    }

    /// 1-based number of the current trial.
    pub fn trial_number(&self) -> usize {
        self.current + 1
    }

    pub fn trial_count(&self) -> usize {
        self.trials.len()
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Record an answer for the current trial and move to the next.
    ///
    /// Returns whether more trials remain.
    pub fn submit(&mut self, answer: &str) -> bool {
        let Some(trial) = self.current_trial().copied() else {
            return false;
        };
        if InkColor::parse(answer) == Some(trial.ink) {
            self.correct += 1;
        }
        self.current += 1;
        self.current < self.trials.len()
    }

    /// Close the subtest and fix its score. Later calls return the score
    /// fixed by the first.
    pub fn finish(&mut self) -> u8 {
        *self.score.get_or_insert_with(|| stroop_points(self.correct))
    }

    pub fn is_closed(&self) -> bool {
        self.score.is_some()
    }

    pub fn points(&self) -> u8 {
        self.score.unwrap_or(0)
    }

    pub fn display(&self) -> String {
        score_display(self.points(), Subtest::Stroop.max_score())
    }
}
