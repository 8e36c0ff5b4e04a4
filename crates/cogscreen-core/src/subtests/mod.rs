//! The individual subtests.
//!
//! Each subtest owns its working state and partial score; the session
//! orchestrator decides when each one runs.

pub mod digit_span;
pub mod fluency;
pub mod orientation;
pub mod recall;
pub mod serial7s;
pub mod stroop;

pub use digit_span::{DigitSequences, DigitSpan, Direction, SpanStep};
pub use fluency::{AddAnimal, Fluency};
pub use orientation::{Orientation, OrientationFacts, Season};
pub use recall::RecallTest;
pub use serial7s::SerialSevens;
pub use stroop::{InkColor, Stroop, StroopTrial};

/// Split free text on whitespace and any of `separators`, dropping empties.
pub(crate) fn tokens<'a>(input: &'a str, separators: &'a [char]) -> impl Iterator<Item = &'a str> {
    input
        .split(move |c: char| c.is_whitespace() || separators.contains(&c))
        .filter(|t| !t.is_empty())
}
