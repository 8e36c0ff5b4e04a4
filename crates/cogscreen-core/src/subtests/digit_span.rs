//! Digit span, forward then backward.
//!
//! Each phase is a short ladder: a correct answer moves up one level, a wrong
//! answer or a pass at the top level ends the phase. Every passed level is
//! worth one point.

use serde::{Deserialize, Serialize};

use crate::model::{score_display, Subtest};
use crate::random::RandomSource;

use super::tokens;

const FORWARD_LEN: usize = 5;
const BACKWARD_LEN: usize = 4;

/// Which way the digits are repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn start_level(self) -> usize {
        match self {
            Direction::Forward => 3,
            Direction::Backward => 2,
        }
    }

    fn max_level(self) -> usize {
        match self {
            Direction::Forward => 4,
            Direction::Backward => 3,
        }
    }
}

/// The two digit sequences of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitSequences {
    forward: Vec<u8>,
    backward: Vec<u8>,
}

impl DigitSequences {
    /// Draw 5 forward and 4 backward digits, each in 1..=9.
    pub fn generate(rng: &mut dyn RandomSource) -> Self {
        let mut draw = |n: usize| -> Vec<u8> {
            (0..n).map(|_| rng.random_int(1, 9) as u8).collect()
        };
        let forward = draw(FORWARD_LEN);
        let backward = draw(BACKWARD_LEN);
        Self { forward, backward }
    }

    pub fn new(forward: Vec<u8>, backward: Vec<u8>) -> Self {
        Self { forward, backward }
    }

    pub fn forward(&self) -> &[u8] {
        &self.forward
    }

    pub fn backward(&self) -> &[u8] {
        &self.backward
    }

    /// Digits shown to the user at a level.
    pub fn presented(&self, direction: Direction, level: usize) -> &[u8] {
        let digits = match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        };
        &digits[..level.min(digits.len())]
    }

    /// The answer expected at a level: the presented prefix, reversed for the
    /// backward phase.
    pub fn expected(&self, direction: Direction, level: usize) -> Vec<u8> {
        let mut digits = self.presented(direction, level).to_vec();
        if direction == Direction::Backward {
            digits.reverse();
        }
        digits
    }

    pub fn check_forward(&self, input: &str, level: usize) -> bool {
        digits_match(input, &self.expected(Direction::Forward, level))
    }

    pub fn check_backward(&self, input: &str, level: usize) -> bool {
        digits_match(input, &self.expected(Direction::Backward, level))
    }
}

/// Digits joined for display, e.g. "4 - 7 - 2".
pub fn format_digits(digits: &[u8]) -> String {
    digits
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Compare typed digits against an expected sequence. Input splits on
/// whitespace, commas and hyphens; tokens that are not all digits are ignored.
fn digits_match(input: &str, expected: &[u8]) -> bool {
    let given: Vec<&str> = tokens(input, &[',', '-'])
        .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
        .collect();
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .all(|(g, e)| *g == e.to_string())
}

/// Result of one digit span answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStep {
    /// Correct; the phase continues at this level.
    NextLevel(usize),
    /// The phase is over.
    PhaseComplete { passed: bool },
}

#[derive(Debug, Clone)]
struct Phase {
    direction: Direction,
    level: usize,
    points: u8,
    finished: bool,
}

impl Phase {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            level: direction.start_level(),
            points: 0,
            finished: false,
        }
    }
}

/// Digit span subtest state.
#[derive(Debug, Clone)]
pub struct DigitSpan {
    sequences: DigitSequences,
    forward: Phase,
    backward: Phase,
}

impl DigitSpan {
    pub fn new(sequences: DigitSequences) -> Self {
        Self {
            sequences,
            forward: Phase::new(Direction::Forward),
            backward: Phase::new(Direction::Backward),
        }
    }

    pub fn sequences(&self) -> &DigitSequences {
        &self.sequences
    }

    fn phase(&self, direction: Direction) -> &Phase {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    /// Current level of a phase.
    pub fn level(&self, direction: Direction) -> usize {
        self.phase(direction).level
    }

    pub fn is_finished(&self, direction: Direction) -> bool {
        self.phase(direction).finished
    }

    /// Digits to show for the current level, formatted.
    pub fn prompt(&self, direction: Direction) -> String {
        format_digits(self.sequences.presented(direction, self.level(direction)))
    }

    /// Check an answer at the phase's current level and step the ladder.
    pub fn submit(&mut self, direction: Direction, input: &str) -> SpanStep {
        let phase = match direction {
            Direction::Forward => &mut self.forward,
            Direction::Backward => &mut self.backward,
        };
        if phase.finished {
            return SpanStep::PhaseComplete { passed: false };
        }

        let passed = digits_match(input, &self.sequences.expected(direction, phase.level));
        if passed {
            phase.points += 1;
        }
        if passed && phase.level < phase.direction.max_level() {
            phase.level += 1;
            SpanStep::NextLevel(phase.level)
        } else {
            phase.finished = true;
            SpanStep::PhaseComplete { passed }
        }
    }

    pub fn forward_points(&self) -> u8 {
        self.forward.points
    }

    pub fn backward_points(&self) -> u8 {
        self.backward.points
    }

    /// Combined score, capped at 4.
    pub fn score(&self) -> u8 {
        (self.forward.points + self.backward.points).min(Subtest::DigitSpan.max_score())
    }

    pub fn display(&self) -> String {
        score_display(self.score(), Subtest::DigitSpan.max_score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn sequences() -> DigitSequences {
        DigitSequences::new(vec![1, 2, 3, 8, 5], vec![4, 7, 2, 9])
    }

    #[test]
    fn generate_draws_nine_digits_in_order() {
        let mut rng = ScriptedRandom::new([1, 2, 3, 4, 5, 6, 7, 8, 9], []);
        let seq = DigitSequences::generate(&mut rng);
        assert_eq!(seq.forward(), [1, 2, 3, 4, 5]);
        assert_eq!(seq.backward(), [6, 7, 8, 9]);
    }

    #[test]
    fn forward_check_uses_prefix_in_order() {
        let seq = sequences();
        assert!(seq.check_forward("1 2 3", 3));
        assert!(seq.check_forward("1-2,3", 3));
        assert!(!seq.check_forward("3 2 1", 3));
        assert!(!seq.check_forward("1 2", 3));
        assert!(!seq.check_forward("123", 3));
        assert!(seq.check_forward("1 2 3 8", 4));
    }

    #[test]
    fn backward_check_expects_reversed_prefix() {
        let seq = sequences();
        assert_eq!(seq.expected(Direction::Backward, 2), vec![7, 4]);
        assert!(seq.check_backward("7 4", 2));
        assert!(!seq.check_backward("4 7", 2));
        assert!(seq.check_backward("2, 7, 4", 3));
    }

    #[test]
    fn non_numeric_tokens_are_ignored() {
        let seq = sequences();
        assert!(!seq.check_forward("one 1 two 2 3!", 3));
        assert!(seq.check_forward("x 1 y 2 z 3", 3));
        assert!(!seq.check_forward("", 3));
    }

    #[test]
    fn prompt_formatting() {
        let span = DigitSpan::new(sequences());
        assert_eq!(span.prompt(Direction::Forward), "1 - 2 - 3");
        assert_eq!(span.prompt(Direction::Backward), "4 - 7");
    }

    #[test]
    fn perfect_ladder_scores_four() {
        let mut span = DigitSpan::new(sequences());
        assert_eq!(span.submit(Direction::Forward, "1 2 3"), SpanStep::NextLevel(4));
        assert_eq!(span.prompt(Direction::Forward), "1 - 2 - 3 - 8");
        assert_eq!(
            span.submit(Direction::Forward, "1 2 3 8"),
            SpanStep::PhaseComplete { passed: true }
        );
        assert_eq!(span.submit(Direction::Backward, "7 4"), SpanStep::NextLevel(3));
        assert_eq!(
            span.submit(Direction::Backward, "2 7 4"),
            SpanStep::PhaseComplete { passed: true }
        );
        assert_eq!(span.forward_points(), 2);
        assert_eq!(span.backward_points(), 2);
        assert_eq!(span.display(), "4/4");
    }

    #[test]
    fn failure_ends_phase() {
        let mut span = DigitSpan::new(sequences());
        assert_eq!(
            span.submit(Direction::Forward, "9 9 9"),
            SpanStep::PhaseComplete { passed: false }
        );
        assert!(span.is_finished(Direction::Forward));
        // No retries once the phase is over.
        assert_eq!(
            span.submit(Direction::Forward, "1 2 3"),
            SpanStep::PhaseComplete { passed: false }
        );
        assert_eq!(span.forward_points(), 0);

        assert_eq!(span.submit(Direction::Backward, "7 4"), SpanStep::NextLevel(3));
        assert_eq!(
            span.submit(Direction::Backward, "4 7 2"),
            SpanStep::PhaseComplete { passed: false }
        );
        assert_eq!(span.score(), 1);
    }
}
