//! Orientation: five questions about the current date.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{score_display, Subtest};

/// Questions asked, in order.
pub const QUESTIONS: [&str; 5] = [
    "What year is it?",
    "What month is it?",
    "What day of the week is it?",
    "What is today's date (day number)?",
    "What season is it?",
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Meteorological season by quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Season for a month number (1 = January).
    pub fn for_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected answers for one session, fixed at setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientationFacts {
    answers: [String; 5],
}

impl OrientationFacts {
    pub fn from_date(date: NaiveDate) -> Self {
        let month_name = MONTHS[date.month0() as usize];
        let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
        Self {
            answers: [
                date.year().to_string(),
                month_name.to_string(),
                weekday.to_string(),
                date.day().to_string(),
                Season::for_month(date.month()).name().to_string(),
            ],
        }
    }

    pub fn answers(&self) -> &[String; 5] {
        &self.answers
    }
}

/// Lenient answer comparison: exact, substring in either direction, or
/// equal integers. Blank answers never match.
pub fn answers_match(expected: &str, given: &str) -> bool {
    let expected = expected.trim().to_lowercase();
    let given = given.trim().to_lowercase();
    if given.is_empty() {
        return false;
    }
    if given == expected || expected.contains(&given) || given.contains(&expected) {
        return true;
    }
    match (given.parse::<i64>(), expected.parse::<i64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Orientation subtest state.
#[derive(Debug, Clone)]
pub struct Orientation {
    facts: OrientationFacts,
    index: usize,
    score: u8,
}

impl Orientation {
    pub fn new(facts: OrientationFacts) -> Self {
        Self {
            facts,
            index: 0,
            score: 0,
        }
    }

    pub fn facts(&self) -> &OrientationFacts {
        &self.facts
    }

    /// The question awaiting an answer, if any remain.
    pub fn current_question(&self) -> Option<&'static str> {
        QUESTIONS.get(self.index).copied()
    }

    /// 1-based number of the current question.
    pub fn question_number(&self) -> usize {
        self.index + 1
    }

    pub fn question_count(&self) -> usize {
        QUESTIONS.len()
    }

    pub fn is_complete(&self) -> bool {
        self.index >= QUESTIONS.len()
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn display(&self) -> String {
        score_display(self.score, Subtest::Orientation.max_score())
    }

    /// Score an answer to the current question and move on.
    ///
    /// Returns whether more questions remain. Once all five are answered,
    /// further calls change nothing and return `false`.
    pub fn submit(&mut self, answer: &str) -> bool {
        let Some(expected) = self.facts.answers.get(self.index) else {
            return false;
        };
        if answers_match(expected, answer) {
            self.score += 1;
        }
        self.index += 1;
        !self.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn seasons_by_quarter() {
        assert_eq!(Season::for_month(12), Season::Winter);
        assert_eq!(Season::for_month(2), Season::Winter);
        assert_eq!(Season::for_month(3), Season::Spring);
        assert_eq!(Season::for_month(5), Season::Spring);
        assert_eq!(Season::for_month(6), Season::Summer);
        assert_eq!(Season::for_month(8), Season::Summer);
        assert_eq!(Season::for_month(9), Season::Fall);
        assert_eq!(Season::for_month(11), Season::Fall);
    }

    #[test]
    fn facts_from_date() {
        // 2024-03-05 was a Tuesday.
        let facts = OrientationFacts::from_date(date(2024, 3, 5));
        assert_eq!(
            facts.answers(),
            &["2024", "march", "tuesday", "5", "spring"].map(String::from)
        );
    }

    #[test]
    fn lenient_matching() {
        assert!(answers_match("march", "March"));
        assert!(answers_match("march", "  mar "));
        assert!(answers_match("tuesday", "it is tuesday"));
        assert!(answers_match("5", "05"));
        assert!(answers_match("may", "mayonnaise"));
        assert!(!answers_match("2024", "2023"));
        assert!(!answers_match("winter", "summer"));
        assert!(!answers_match("2024", ""));
        assert!(!answers_match("2024", "   "));
    }

    #[test]
    fn full_round() {
        let mut test = Orientation::new(OrientationFacts::from_date(date(2024, 12, 25)));
        assert_eq!(test.current_question(), Some("What year is it?"));

        assert!(test.submit("2024"));
        assert!(test.submit("november"));
        assert!(test.submit("wednesday"));
        assert_eq!(test.question_number(), 4);
        assert!(test.submit("25th"));
        assert!(!test.submit("winter"));

        assert!(test.is_complete());
        assert_eq!(test.score(), 4);
        assert_eq!(test.display(), "4/5");
        assert_eq!(test.current_question(), None);

        assert!(!test.submit("2024"));
        assert_eq!(test.score(), 4);
    }
}
