//! Injectable source of the current time.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of "now" for orientation questions.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Local wall-clock time.
    #[default]
    System,
    /// A pinned instant, for reproducible sessions.
    Fixed(NaiveDateTime),
}

impl Clock {
    /// Returns a clock pinned at the given local date-time.
    pub fn fixed(at: NaiveDateTime) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current local date-time according to the clock.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Returns today's date according to the clock.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_stable() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let clock = Clock::fixed(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.today(), at.date());
    }
}
