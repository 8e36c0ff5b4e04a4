//! Core data model types for cogscreen.
//!
//! Stages of the assessment, the subtests that produce partial scores, and
//! the bounded score record that feeds the result aggregator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// One step of the assessment, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Title,
    Description,
    OrientationIntro,
    Orientation,
    OrientationScore,
    FiveWordsIntro,
    FiveWords,
    ImmediateRecall,
    ImmediateRecallScore,
    Serial7sIntro,
    Serial7s,
    Serial7sScore,
    DigitSpanIntro,
    DigitSpanForward,
    DigitSpanBackward,
    DigitSpanScore,
    FluencyIntro,
    Fluency,
    FluencyScore,
    StroopIntro,
    Stroop,
    StroopScore,
    DelayedRecallIntro,
    DelayedRecall,
    DelayedRecallScore,
    Results,
}

impl Stage {
    /// Every stage in order.
    pub const ALL: [Stage; 26] = [
        Stage::Title,
        Stage::Description,
        Stage::OrientationIntro,
        Stage::Orientation,
        Stage::OrientationScore,
        Stage::FiveWordsIntro,
        Stage::FiveWords,
        Stage::ImmediateRecall,
        Stage::ImmediateRecallScore,
        Stage::Serial7sIntro,
        Stage::Serial7s,
        Stage::Serial7sScore,
        Stage::DigitSpanIntro,
        Stage::DigitSpanForward,
        Stage::DigitSpanBackward,
        Stage::DigitSpanScore,
        Stage::FluencyIntro,
        Stage::Fluency,
        Stage::FluencyScore,
        Stage::StroopIntro,
        Stage::Stroop,
        Stage::StroopScore,
        Stage::DelayedRecallIntro,
        Stage::DelayedRecall,
        Stage::DelayedRecallScore,
        Stage::Results,
    ];

    /// The stage that follows this one, or `None` at the results stage.
    pub fn next(self) -> Option<Stage> {
        let index = Stage::ALL.iter().position(|s| *s == self)?;
        Stage::ALL.get(index + 1).copied()
    }

    /// Stages bounded by a countdown.
    pub fn is_timed(self) -> bool {
        matches!(self, Stage::FiveWords | Stage::Fluency | Stage::Stroop)
    }

    /// Stages that take free-text answers rather than a plain "continue".
    pub fn accepts_input(self) -> bool {
        matches!(
            self,
            Stage::Orientation
                | Stage::ImmediateRecall
                | Stage::Serial7s
                | Stage::DigitSpanForward
                | Stage::DigitSpanBackward
                | Stage::Fluency
                | Stage::Stroop
                | Stage::DelayedRecall
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Title => "title",
            Stage::Description => "description",
            Stage::OrientationIntro => "orientation intro",
            Stage::Orientation => "orientation",
            Stage::OrientationScore => "orientation score",
            Stage::FiveWordsIntro => "five words intro",
            Stage::FiveWords => "five words",
            Stage::ImmediateRecall => "immediate recall",
            Stage::ImmediateRecallScore => "immediate recall score",
            Stage::Serial7sIntro => "serial 7s intro",
            Stage::Serial7s => "serial 7s",
            Stage::Serial7sScore => "serial 7s score",
            Stage::DigitSpanIntro => "digit span intro",
            Stage::DigitSpanForward => "digit span forward",
            Stage::DigitSpanBackward => "digit span backward",
            Stage::DigitSpanScore => "digit span score",
            Stage::FluencyIntro => "category fluency intro",
            Stage::Fluency => "category fluency",
            Stage::FluencyScore => "category fluency score",
            Stage::StroopIntro => "stroop intro",
            Stage::Stroop => "stroop",
            Stage::StroopScore => "stroop score",
            Stage::DelayedRecallIntro => "delayed recall intro",
            Stage::DelayedRecall => "delayed recall",
            Stage::DelayedRecallScore => "delayed recall score",
            Stage::Results => "results",
        };
        f.write_str(name)
    }
}

/// The seven scored tasks. Digit span combines its forward and backward
/// phases into one partial score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subtest {
    Orientation,
    ImmediateRecall,
    Serial7s,
    DigitSpan,
    Fluency,
    Stroop,
    DelayedRecall,
}

impl Subtest {
    pub const ALL: [Subtest; 7] = [
        Subtest::Orientation,
        Subtest::ImmediateRecall,
        Subtest::Serial7s,
        Subtest::DigitSpan,
        Subtest::Fluency,
        Subtest::Stroop,
        Subtest::DelayedRecall,
    ];

    /// Maximum partial score.
    pub fn max_score(self) -> u8 {
        match self {
            Subtest::Orientation
            | Subtest::ImmediateRecall
            | Subtest::Serial7s
            | Subtest::Stroop
            | Subtest::DelayedRecall => 5,
            Subtest::DigitSpan => 4,
            Subtest::Fluency => 3,
        }
    }

    /// Label used in score breakdowns.
    pub fn label(self) -> &'static str {
        match self {
            Subtest::Orientation => "Orientation",
            Subtest::ImmediateRecall => "Immediate Recall",
            Subtest::Serial7s => "Serial 7s",
            Subtest::DigitSpan => "Digit Span",
            Subtest::Fluency => "Category Fluency",
            Subtest::Stroop => "Stroop Test",
            Subtest::DelayedRecall => "Delayed Recall",
        }
    }
}

impl fmt::Display for Subtest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Format a partial score as "N/Max".
pub fn score_display(score: u8, max: u8) -> String {
    format!("{score}/{max}")
}

/// The eight partial scores of a session.
///
/// Digit span is kept as its two phases; [`PartialScores::digit_span`] gives
/// the capped combined value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialScores {
    pub orientation: u8,
    pub immediate_recall: u8,
    pub serial7s: u8,
    pub digit_forward: u8,
    pub digit_backward: u8,
    pub fluency: u8,
    pub stroop: u8,
    pub delayed_recall: u8,
}

/// Highest possible raw total.
pub const MAX_RAW_SCORE: u8 = 32;

impl PartialScores {
    /// Forward plus backward digit span, capped at 4.
    pub fn digit_span(&self) -> u8 {
        (self.digit_forward + self.digit_backward).min(Subtest::DigitSpan.max_score())
    }

    /// Score for one subtest.
    pub fn get(&self, subtest: Subtest) -> u8 {
        match subtest {
            Subtest::Orientation => self.orientation,
            Subtest::ImmediateRecall => self.immediate_recall,
            Subtest::Serial7s => self.serial7s,
            Subtest::DigitSpan => self.digit_span(),
            Subtest::Fluency => self.fluency,
            Subtest::Stroop => self.stroop,
            Subtest::DelayedRecall => self.delayed_recall,
        }
    }

    /// Sum of all subtests out of [`MAX_RAW_SCORE`].
    pub fn raw_total(&self) -> u8 {
        Subtest::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// Check every score against its bound. Digit span phases are checked
    /// individually against their two-level ladders.
    pub fn validate(&self) -> Result<(), ScoreError> {
        let checks = [
            (Subtest::Orientation, self.orientation, 5),
            (Subtest::ImmediateRecall, self.immediate_recall, 5),
            (Subtest::Serial7s, self.serial7s, 5),
            (Subtest::DigitSpan, self.digit_forward, 2),
            (Subtest::DigitSpan, self.digit_backward, 2),
            (Subtest::Fluency, self.fluency, 3),
            (Subtest::Stroop, self.stroop, 5),
            (Subtest::DelayedRecall, self.delayed_recall, 5),
        ];
        for (subtest, value, max) in checks {
            if value > max {
                return Err(ScoreError::OutOfRange {
                    subtest,
                    value,
                    max,
                });
            }
        }
        Ok(())
    }

    /// One "Label: N/Max" line per subtest.
    pub fn breakdown(&self) -> Vec<String> {
        Subtest::ALL
            .iter()
            .map(|s| format!("{}: {}", s.label(), score_display(self.get(*s), s.max_score())))
            .collect()
    }
}
