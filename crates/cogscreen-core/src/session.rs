//! The session orchestrator.
//!
//! A [`Session`] owns all per-session state and walks the fixed stage
//! sequence from [`Stage::Title`] to [`Stage::Results`]. State changes only
//! through explicit calls: user actions ([`Session::advance`],
//! [`Session::submit`] and the named subtest operations) and countdown ticks
//! ([`Session::tick`]). Every call is one synchronous step, and entering a
//! stage cancels whatever countdown was running, so a manual advance and a
//! timer expiry can never both fire for the same transition.

use std::fmt;

use chrono::NaiveDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::{AssessmentConfig, TimingConfig};
use crate::error::SessionError;
use crate::model::{score_display, PartialScores, Stage, Subtest};
use crate::random::RandomSource;
use crate::report::AssessmentReport;
use crate::results::{self, AssessmentResult};
use crate::subtests::stroop::{generate_trials, TRIAL_COUNT};
use crate::subtests::{
    AddAnimal, DigitSequences, DigitSpan, Direction, Fluency, Orientation, OrientationFacts,
    RecallTest, SerialSevens, SpanStep, Stroop,
};
use crate::timer::{Countdown, TickOutcome};
use crate::wordbank::{select_words, WordSet, WordSource};

/// What a submission did, for the presentation layer to echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// An orientation answer was recorded.
    Orientation { more: bool },
    /// A recall or serial 7s answer was scored; carries "N/5".
    Score(String),
    DigitSpan(SpanStep),
    Animal(AddAnimal),
    /// A Stroop answer was recorded.
    Stroop { more: bool },
}

/// Everything the presentation layer needs to draw the current stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub heading: String,
    pub lines: Vec<String>,
    /// Seconds left on the stage countdown.
    pub countdown: Option<u32>,
    /// Ink of the Stroop word on screen.
    pub ink: Option<[f32; 4]>,
}

struct SessionState {
    id: Uuid,
    started_at: NaiveDateTime,
    completed_at: Option<NaiveDateTime>,
    stage: Stage,
    words: WordSet,
    orientation: Orientation,
    immediate: RecallTest,
    serial7s: SerialSevens,
    digit_span: DigitSpan,
    fluency: Fluency,
    stroop: Stroop,
    delayed: RecallTest,
    countdown: Option<u32>,
    result: Option<AssessmentResult>,
}

impl SessionState {
    /// Fresh data for a new session. Draw order: words, digits, Stroop trials.
    fn initialize(words: &dyn WordSource, rng: &mut dyn RandomSource, clock: &Clock) -> Self {
        let started_at = clock.now();
        let word_set = select_words(words, rng);
        let facts = OrientationFacts::from_date(started_at.date());
        let sequences = DigitSequences::generate(rng);
        let trials = generate_trials(rng, TRIAL_COUNT);

        let id = Uuid::new_v4();
        info!(session = %id, words = ?word_set.words(), "session initialized");

        Self {
            id,
            started_at,
            completed_at: None,
            stage: Stage::Title,
            words: word_set,
            orientation: Orientation::new(facts),
            immediate: RecallTest::new(),
            serial7s: SerialSevens::new(),
            digit_span: DigitSpan::new(sequences),
            fluency: Fluency::new(),
            stroop: Stroop::new(trials),
            delayed: RecallTest::new(),
            countdown: None,
            result: None,
        }
    }

    fn set_stage(&mut self, stage: Stage) {
        debug!(from = %self.stage, to = %stage, "stage transition");
        self.stage = stage;
    }
}

fn expire_word_display(state: &mut SessionState) {
    state.set_stage(Stage::ImmediateRecall);
}

fn expire_fluency(state: &mut SessionState) {
    let points = state.fluency.finish();
    debug!(animals = state.fluency.count(), points, "fluency closed by timer");
    state.set_stage(Stage::FluencyScore);
}

fn expire_stroop(state: &mut SessionState) {
    let points = state.stroop.finish();
    debug!(correct = state.stroop.correct(), points, "stroop closed by timer");
    state.set_stage(Stage::StroopScore);
}

/// One assessment session.
pub struct Session {
    state: SessionState,
    timer: Countdown<SessionState>,
    words: Box<dyn WordSource>,
    rng: Box<dyn RandomSource>,
    clock: Clock,
    timing: TimingConfig,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.state.id)
            .field("stage", &self.state.stage)
            .field("timer", &self.timer)
            .finish()
    }
}

impl Session {
    /// A new session at the title stage.
    pub fn new(
        words: Box<dyn WordSource>,
        mut rng: Box<dyn RandomSource>,
        clock: Clock,
        timing: TimingConfig,
    ) -> Self {
        let state = SessionState::initialize(words.as_ref(), rng.as_mut(), &clock);
        Self {
            state,
            timer: Countdown::new(),
            words,
            rng,
            clock,
            timing,
        }
    }

    /// A session using the configured word bank, seed and timings and the
    /// system clock.
    pub fn from_config(config: &AssessmentConfig) -> Self {
        Self::new(
            config.word_source(),
            config.random_source(),
            Clock::System,
            config.timing.clone(),
        )
    }

    // --- accessors ---

    pub fn id(&self) -> Uuid {
        self.state.id
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.state.started_at
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn words(&self) -> &WordSet {
        &self.state.words
    }

    pub fn orientation(&self) -> &Orientation {
        &self.state.orientation
    }

    pub fn immediate_recall(&self) -> &RecallTest {
        &self.state.immediate
    }

    pub fn serial7s(&self) -> &SerialSevens {
        &self.state.serial7s
    }

    pub fn digit_span(&self) -> &DigitSpan {
        &self.state.digit_span
    }

    pub fn fluency(&self) -> &Fluency {
        &self.state.fluency
    }

    pub fn stroop(&self) -> &Stroop {
        &self.state.stroop
    }

    pub fn delayed_recall(&self) -> &RecallTest {
        &self.state.delayed
    }

    /// Seconds left on the running countdown.
    pub fn countdown(&self) -> Option<u32> {
        self.state.countdown
    }

    /// The final result, once the results stage is reached.
    pub fn result(&self) -> Option<&AssessmentResult> {
        self.state.result.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.state.stage == Stage::Results
    }

    /// The eight partial scores as they stand.
    pub fn scores(&self) -> PartialScores {
        let s = &self.state;
        PartialScores {
            orientation: s.orientation.score(),
            immediate_recall: s.immediate.points(),
            serial7s: s.serial7s.points(),
            digit_forward: s.digit_span.forward_points(),
            digit_backward: s.digit_span.backward_points(),
            fluency: s.fluency.points(),
            stroop: s.stroop.points(),
            delayed_recall: s.delayed.points(),
        }
    }

    pub fn report(&self) -> AssessmentReport {
        let scores = self.scores();
        AssessmentReport {
            id: self.state.id,
            started_at: self.state.started_at,
            completed_at: self.state.completed_at,
            words: self.state.words.words().to_vec(),
            animals: self.state.fluency.animals().to_vec(),
            scores,
            breakdown: scores.breakdown(),
            result: self.state.result,
        }
    }

    // --- transitions ---

    fn require(&self, operation: &'static str, stage: Stage) -> Result<(), SessionError> {
        if self.state.stage == stage {
            Ok(())
        } else {
            Err(SessionError::wrong_stage(operation, self.state.stage))
        }
    }

    fn enter(&mut self, stage: Stage) {
        self.timer.cancel();
        self.state.countdown = None;
        self.state.set_stage(stage);

        let timing = &self.timing;
        let (word_secs, fluency_secs, stroop_secs) = (
            timing.word_display_secs,
            timing.fluency_secs,
            timing.stroop_secs,
        );
        match stage {
            Stage::FiveWords => self.start_countdown(word_secs, expire_word_display),
            Stage::Fluency => self.start_countdown(fluency_secs, expire_fluency),
            Stage::Stroop => self.start_countdown(stroop_secs, expire_stroop),
            Stage::Results => self.finalize(),
            _ => {}
        }
    }

    fn start_countdown(&mut self, seconds: u32, on_expire: fn(&mut SessionState)) {
        let stage = self.state.stage;
        self.state.countdown = Some(seconds);
        debug!(%stage, seconds, "countdown started");
        self.timer.start(
            seconds,
            |state: &mut SessionState, remaining| state.countdown = Some(remaining),
            move |state: &mut SessionState| {
                state.countdown = None;
                if state.stage == stage {
                    on_expire(state);
                }
            },
        );
    }

    fn finalize(&mut self) {
        let result = results::compute_results(&self.scores());
        info!(
            session = %self.state.id,
            raw = result.raw,
            normalized = result.normalized,
            category = %result.category,
            "assessment complete"
        );
        self.state.completed_at = Some(self.clock.now());
        self.state.result = Some(result);
    }

    /// Deliver one countdown tick. Expiry of a timed stage moves the session
    /// on exactly as its explicit action would.
    pub fn tick(&mut self) -> TickOutcome {
        self.timer.tick(&mut self.state)
    }

    /// Continue past the current stage.
    ///
    /// Valid on intro, score and display stages, and on the fluency stage
    /// (where it closes the subtest early). Answer stages only move on
    /// through their submissions. Returns the new stage.
    pub fn advance(&mut self) -> Result<Stage, SessionError> {
        let stage = self.state.stage;
        match stage {
            Stage::Results => return Err(SessionError::AlreadyComplete),
            Stage::Fluency => {
                self.finish_fluency()?;
            }
            s if s.accepts_input() => return Err(SessionError::wrong_stage("advance", s)),
            _ => {
                if let Some(next) = stage.next() {
                    self.enter(next);
                }
            }
        }
        Ok(self.state.stage)
    }

    /// Route raw text to the current stage's answer operation.
    pub fn submit(&mut self, input: &str) -> Result<Feedback, SessionError> {
        match self.state.stage {
            Stage::Orientation => self
                .submit_orientation_answer(input)
                .map(|more| Feedback::Orientation { more }),
            Stage::ImmediateRecall => self.score_immediate_recall(input).map(Feedback::Score),
            Stage::Serial7s => self.score_serial7s(input).map(Feedback::Score),
            Stage::DigitSpanForward => self.submit_forward_digits(input).map(Feedback::DigitSpan),
            Stage::DigitSpanBackward => {
                self.submit_backward_digits(input).map(Feedback::DigitSpan)
            }
            Stage::Fluency => self.add_animal(input).map(Feedback::Animal),
            Stage::Stroop => self
                .submit_stroop_answer(input)
                .map(|more| Feedback::Stroop { more }),
            Stage::DelayedRecall => self.score_delayed_recall(input).map(Feedback::Score),
            stage => Err(SessionError::wrong_stage("submit", stage)),
        }
    }

    /// Score an orientation answer. After the fifth the session moves to
    /// the orientation score. Returns whether more questions remain.
    pub fn submit_orientation_answer(&mut self, answer: &str) -> Result<bool, SessionError> {
        self.require("submit_orientation_answer", Stage::Orientation)?;
        let more = self.state.orientation.submit(answer);
        if !more {
            self.enter(Stage::OrientationScore);
        }
        Ok(more)
    }

    /// Score the immediate recall answer and close the subtest.
    pub fn score_immediate_recall(&mut self, input: &str) -> Result<String, SessionError> {
        self.require("score_immediate_recall", Stage::ImmediateRecall)?;
        let score = self.state.immediate.score(&self.state.words, input);
        self.enter(Stage::ImmediateRecallScore);
        Ok(score)
    }

    pub fn score_serial7s(&mut self, input: &str) -> Result<String, SessionError> {
        self.require("score_serial7s", Stage::Serial7s)?;
        let score = self.state.serial7s.score(input);
        self.enter(Stage::Serial7sScore);
        Ok(score)
    }

    pub fn score_delayed_recall(&mut self, input: &str) -> Result<String, SessionError> {
        self.require("score_delayed_recall", Stage::DelayedRecall)?;
        let score = self.state.delayed.score(&self.state.words, input);
        self.enter(Stage::DelayedRecallScore);
        Ok(score)
    }

    /// Check a forward digit span answer; the end of the phase moves on to
    /// the backward phase.
    pub fn submit_forward_digits(&mut self, input: &str) -> Result<SpanStep, SessionError> {
        self.require("submit_forward_digits", Stage::DigitSpanForward)?;
        let step = self.state.digit_span.submit(Direction::Forward, input);
        if let SpanStep::PhaseComplete { passed } = step {
            debug!(passed, points = self.state.digit_span.forward_points(), "forward span done");
            self.enter(Stage::DigitSpanBackward);
        }
        Ok(step)
    }

    pub fn submit_backward_digits(&mut self, input: &str) -> Result<SpanStep, SessionError> {
        self.require("submit_backward_digits", Stage::DigitSpanBackward)?;
        let step = self.state.digit_span.submit(Direction::Backward, input);
        if let SpanStep::PhaseComplete { passed } = step {
            debug!(passed, points = self.state.digit_span.backward_points(), "backward span done");
            self.enter(Stage::DigitSpanScore);
        }
        Ok(step)
    }

    pub fn add_animal(&mut self, name: &str) -> Result<AddAnimal, SessionError> {
        self.require("add_animal", Stage::Fluency)?;
        Ok(self.state.fluency.add(name))
    }

    /// Close fluency and fix its score. Once closed, returns the fixed score
    /// from any stage.
    pub fn finish_fluency(&mut self) -> Result<u8, SessionError> {
        if self.state.fluency.is_closed() {
            return Ok(self.state.fluency.points());
        }
        self.require("finish_fluency", Stage::Fluency)?;
        let points = self.state.fluency.finish();
        self.enter(Stage::FluencyScore);
        Ok(points)
    }

    /// Answer the current Stroop trial. After the last trial the countdown
    /// is cancelled and the subtest scored. Returns whether more trials remain.
    pub fn submit_stroop_answer(&mut self, answer: &str) -> Result<bool, SessionError> {
        self.require("submit_stroop_answer", Stage::Stroop)?;
        let more = self.state.stroop.submit(answer);
        if !more {
            self.finish_stroop()?;
        }
        Ok(more)
    }

    /// Close Stroop and fix its score. Once closed, returns the fixed score
    /// from any stage.
    pub fn finish_stroop(&mut self) -> Result<u8, SessionError> {
        if self.state.stroop.is_closed() {
            return Ok(self.state.stroop.points());
        }
        self.require("finish_stroop", Stage::Stroop)?;
        let points = self.state.stroop.finish();
        self.enter(Stage::StroopScore);
        Ok(points)
    }

    /// The aggregated result. Only available at the results stage.
    pub fn compute_results(&mut self) -> Result<AssessmentResult, SessionError> {
        self.require("compute_results", Stage::Results)?;
        let scores = self.scores();
        Ok(*self
            .state
            .result
            .get_or_insert_with(|| results::compute_results(&scores)))
    }

    /// Cancel any countdown, regenerate all session data and return to the
    /// title stage.
    pub fn restart(&mut self) {
        self.timer.cancel();
        self.state = SessionState::initialize(self.words.as_ref(), self.rng.as_mut(), &self.clock);
        info!(session = %self.state.id, "session restarted");
    }

    // --- presentation ---

    /// Text for the current stage.
    pub fn prompt(&self) -> Prompt {
        let s = &self.state;
        let t = &self.timing;
        let mut ink = None;

        let (heading, lines): (&str, Vec<String>) = match s.stage {
            Stage::Title => (
                "Cognitive Assessment Tool",
                vec![
                    "A short self-administered cognitive screening.".into(),
                    "Press Enter to begin.".into(),
                ],
            ),
            Stage::Description => (
                "About this assessment",
                vec![
                    "You will complete eight short tasks covering orientation, memory,".into(),
                    "attention, working memory, language and executive function.".into(),
                    "This is a screening aid, not a diagnosis.".into(),
                ],
            ),
            Stage::OrientationIntro => (
                "Orientation",
                vec!["You will be asked five questions about today's date.".into()],
            ),
            Stage::Orientation => (
                "Orientation",
                vec![
                    format!(
                        "Question {} of {}",
                        s.orientation.question_number(),
                        s.orientation.question_count()
                    ),
                    s.orientation.current_question().unwrap_or_default().into(),
                ],
            ),
            Stage::FiveWordsIntro => (
                "Word Recall",
                vec![
                    format!(
                        "Five words will be shown for {} seconds.",
                        t.word_display_secs
                    ),
                    "Try to remember them; you will be asked for them now and later.".into(),
                ],
            ),
            Stage::FiveWords => ("Remember these words", vec![s.words.display_words().join("   ")]),
            Stage::ImmediateRecall | Stage::DelayedRecall => (
                "Word Recall",
                vec!["Type the five words you remember, separated by spaces or commas.".into()],
            ),
            Stage::Serial7sIntro => (
                "Serial 7s",
                vec!["Starting at 100, subtract 7 five times.".into()],
            ),
            Stage::Serial7s => (
                "Serial 7s",
                vec!["Enter your five answers, separated by spaces or commas.".into()],
            ),
            Stage::DigitSpanIntro => (
                "Digit Span",
                vec![
                    "You will see a series of digits.".into(),
                    "First repeat them in order, then in reverse order.".into(),
                ],
            ),
            Stage::DigitSpanForward => (
                "Digit Span: Forward",
                vec![
                    format!("Level {}", s.digit_span.level(Direction::Forward)),
                    s.digit_span.prompt(Direction::Forward),
                    "Repeat the digits in the same order.".into(),
                ],
            ),
            Stage::DigitSpanBackward => (
                "Digit Span: Backward",
                vec![
                    format!("Level {}", s.digit_span.level(Direction::Backward)),
                    s.digit_span.prompt(Direction::Backward),
                    "Repeat the digits in reverse order.".into(),
                ],
            ),
            Stage::FluencyIntro => (
                "Category Fluency",
                vec![format!(
                    "Name as many animals as you can in {} seconds, one per line.",
                    t.fluency_secs
                )],
            ),
            Stage::Fluency => (
                "Category Fluency",
                vec![
                    format!("Animals named: {}", s.fluency.count()),
                    format!("Recent: {}", s.fluency.recent()),
                ],
            ),
            Stage::StroopIntro => (
                "Stroop Test",
                vec![
                    "Name the INK color of each word, not the word itself.".into(),
                    format!(
                        "{} words, {} seconds. Colors: red, blue, green, yellow.",
                        s.stroop.trial_count(),
                        t.stroop_secs
                    ),
                ],
            ),
            Stage::Stroop => match s.stroop.current_trial() {
                Some(trial) => {
                    ink = Some(trial.ink_rgba());
                    (
                        "Stroop Test",
                        vec![
                            format!(
                                "Trial {} of {}",
                                s.stroop.trial_number(),
                                s.stroop.trial_count()
                            ),
                            trial.word_text(),
                        ],
                    )
                }
                None => ("Stroop Test", Vec::new()),
            },
            Stage::DelayedRecallIntro => (
                "Delayed Recall",
                vec!["Earlier you were shown five words. Try to recall them now.".into()],
            ),
            Stage::OrientationScore => score_screen(Subtest::Orientation, s.orientation.score()),
            Stage::ImmediateRecallScore => {
                score_screen(Subtest::ImmediateRecall, s.immediate.points())
            }
            Stage::Serial7sScore => score_screen(Subtest::Serial7s, s.serial7s.points()),
            Stage::DigitSpanScore => score_screen(Subtest::DigitSpan, s.digit_span.score()),
            Stage::FluencyScore => {
                let (heading, mut lines) = score_screen(Subtest::Fluency, s.fluency.points());
                lines.push(format!("Animals named: {}", s.fluency.count()));
                (heading, lines)
            }
            Stage::StroopScore => score_screen(Subtest::Stroop, s.stroop.points()),
            Stage::DelayedRecallScore => score_screen(Subtest::DelayedRecall, s.delayed.points()),
            Stage::Results => {
                let mut lines = Vec::new();
                if let Some(result) = &s.result {
                    lines.push(format!("Total score: {}", result.total_display()));
                    lines.push(result.label().to_string());
                    lines.push(String::new());
                    lines.push(result.interpretation().to_string());
                    lines.push(String::new());
                }
                lines.extend(self.scores().breakdown());
                ("Results", lines)
            }
        };

        Prompt {
            heading: heading.to_string(),
            lines,
            countdown: s.countdown,
            ink,
        }
    }
}

fn score_screen(subtest: Subtest, points: u8) -> (&'static str, Vec<String>) {
    (
        subtest.label(),
        vec![format!("Score: {}", score_display(points, subtest.max_score()))],
    )
}
