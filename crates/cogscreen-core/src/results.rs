//! Aggregation of partial scores into a normalized result.
//!
//! The raw 32-point total is rescaled to a 30-point reference scale and
//! mapped onto four interpretation bands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{PartialScores, MAX_RAW_SCORE};

/// Points on the reference scale.
pub const NORMALIZED_MAX: u8 = 30;

/// Interpretation band of a normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Normal,
    MildImpairment,
    ModerateImpairment,
    SevereImpairment,
}

impl Category {
    /// Band for a normalized score: 26+ normal, 18–25 mild, 10–17 moderate,
    /// below 10 severe.
    pub fn for_score(normalized: u8) -> Self {
        match normalized {
            26.. => Category::Normal,
            18..=25 => Category::MildImpairment,
            10..=17 => Category::ModerateImpairment,
            _ => Category::SevereImpairment,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Normal => "Normal Cognition",
            Category::MildImpairment => "Mild Cognitive Impairment",
            Category::ModerateImpairment => "Moderate Cognitive Impairment",
            Category::SevereImpairment => "Severe Cognitive Impairment",
        }
    }

    pub fn interpretation(self) -> &'static str {
        match self {
            Category::Normal => concat!(
                "Your cognitive assessment results fall within the normal range. ",
                "This suggests that your cognitive functions, including memory, attention, ",
                "and executive function, are performing as expected for a healthy individual. ",
                "Continue maintaining a healthy lifestyle with regular physical activity, ",
                "mental stimulation, social engagement, and adequate sleep."
            ),
            Category::MildImpairment => concat!(
                "Your results suggest possible mild cognitive impairment (MCI). ",
                "MCI represents a stage between normal age-related cognitive changes and ",
                "more serious decline. Not everyone with MCI develops dementia. ",
                "We strongly recommend consulting with a healthcare provider for a ",
                "comprehensive clinical evaluation. Early intervention and lifestyle ",
                "modifications may help maintain cognitive function."
            ),
            Category::ModerateImpairment => concat!(
                "Your results indicate moderate cognitive difficulties across several domains. ",
                "This level of impairment typically affects daily functioning and independence. ",
                "It is important to seek medical evaluation promptly. A healthcare professional ",
                "can conduct additional testing, identify potential causes, and discuss ",
                "treatment options and support services."
            ),
            Category::SevereImpairment => concat!(
                "Your results suggest significant cognitive impairment. ",
                "This level of difficulty typically has substantial impact on daily activities ",
                "and may require assistance with various tasks. ",
                "Please seek immediate medical evaluation. A healthcare team can provide ",
                "comprehensive assessment, determine underlying causes, and develop an ",
                "appropriate care plan."
            ),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final outcome of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub raw: u8,
    pub normalized: u8,
    pub category: Category,
}

impl AssessmentResult {
    /// "N/30".
    pub fn total_display(&self) -> String {
        format!("{}/{}", self.normalized, NORMALIZED_MAX)
    }

    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    pub fn interpretation(&self) -> &'static str {
        self.category.interpretation()
    }
}

/// Rescale a raw total to the 30-point scale, rounding half to even.
///
/// Exact halves occur at raw 8 (7.5 → 8) and raw 24 (22.5 → 22).
pub fn normalize(raw: u8) -> u8 {
    let raw = u32::from(raw.min(MAX_RAW_SCORE));
    let numerator = raw * u32::from(NORMALIZED_MAX);
    let denominator = u32::from(MAX_RAW_SCORE);
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let rounded = match (remainder * 2).cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + quotient % 2,
    };
    rounded as u8
}

/// Combine partial scores into the final result.
pub fn compute_results(scores: &PartialScores) -> AssessmentResult {
    let raw = scores.raw_total();
    let normalized = normalize(raw);
    AssessmentResult {
        raw,
        normalized,
        category: Category::for_score(normalized),
    }
}
