//! Category fluency: name as many animals as possible before time runs out.

use crate::model::{score_display, Subtest};

/// How many recent entries the running display shows.
const RECENT: usize = 5;

/// Outcome of adding a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddAnimal {
    Added { count: usize, recent: String },
    /// Blank or a single character.
    TooShort,
    Duplicate,
    /// The subtest has already been scored.
    Closed,
}

/// Fluency subtest state.
#[derive(Debug, Clone, Default)]
pub struct Fluency {
    animals: Vec<String>,
    score: Option<u8>,
}

/// Points for a number of distinct animals.
pub fn fluency_points(count: usize) -> u8 {
    match count {
        15.. => 3,
        10..=14 => 2,
        5..=9 => 1,
        _ => 0,
    }
}

impl Fluency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and record a name.
    pub fn add(&mut self, name: &str) -> AddAnimal {
        if self.score.is_some() {
            return AddAnimal::Closed;
        }
        let name = name.trim().to_lowercase();
        if name.chars().count() <= 1 {
            return AddAnimal::TooShort;
        }
        if self.animals.contains(&name) {
            return AddAnimal::Duplicate;
        }
        self.animals.push(name);
        AddAnimal::Added {
            count: self.animals.len(),
            recent: self.recent(),
        }
    }

    /// The last five names in the order they were entered, or "None yet".
    pub fn recent(&self) -> String {
        if self.animals.is_empty() {
            return "None yet".to_string();
        }
        let start = self.animals.len().saturating_sub(RECENT);
        self.animals[start..].join(", ")
    }

    pub fn count(&self) -> usize {
        self.animals.len()
    }

    pub fn animals(&self) -> &[String] {
        &self.animals
    }

    /// Close the subtest and fix its score. Later calls return the score
    /// fixed by the first.
    pub fn finish(&mut self) -> u8 {
        *self.score.get_or_insert_with(|| fluency_points(self.animals.len()))
    }

    pub fn is_closed(&self) -> bool {
        self.score.is_some()
    }

    pub fn points(&self) -> u8 {
        self.score.unwrap_or(0)
    }

    pub fn display(&self) -> String {
        score_display(self.points(), Subtest::Fluency.max_score())
    }
}
