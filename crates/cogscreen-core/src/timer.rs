//! Cancellable one-second countdown.
//!
//! The countdown does not own a clock. Whoever drives the session calls
//! [`Countdown::tick`] once per second and hands in the context the callbacks
//! operate on, so tick handlers and expiry mutate the same state the rest of
//! the session does, one step at a time.

/// Called after each tick with the seconds remaining.
pub type TickFn<C> = Box<dyn FnMut(&mut C, u32) + Send>;

/// Called once when the countdown reaches zero.
pub type ExpireFn<C> = Box<dyn FnOnce(&mut C) + Send>;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown is running.
    Idle,
    /// Time remains.
    Ticked { remaining: u32 },
    /// The countdown reached zero and its expiry callback ran.
    Expired,
}

struct Active<C> {
    remaining: u32,
    on_tick: TickFn<C>,
    on_expire: ExpireFn<C>,
}

/// A countdown over a context `C`.
pub struct Countdown<C> {
    active: Option<Active<C>>,
}

impl<C> Default for Countdown<C> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<C> std::fmt::Debug for Countdown<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl<C> Countdown<C> {
    /// An idle countdown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down from `seconds`, replacing any running countdown.
    ///
    /// Each tick decrements the remaining time and calls `on_tick`; the tick
    /// that reaches zero then stops the countdown and calls `on_expire`.
    /// Starting at `n` therefore yields exactly `n` tick callbacks before
    /// expiry.
    pub fn start(
        &mut self,
        seconds: u32,
        on_tick: impl FnMut(&mut C, u32) + Send + 'static,
        on_expire: impl FnOnce(&mut C) + Send + 'static,
    ) {
        if self.active.is_some() {
            tracing::debug!("replacing running countdown");
        }
        self.active = Some(Active {
            remaining: seconds,
            on_tick: Box::new(on_tick),
            on_expire: Box::new(on_expire),
        });
    }

    /// Advance by one second.
    pub fn tick(&mut self, ctx: &mut C) -> TickOutcome {
        let Some(active) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };

        if active.remaining > 0 {
            active.remaining -= 1;
            let remaining = active.remaining;
            (active.on_tick)(ctx, remaining);
        }

        if active.remaining > 0 {
            return TickOutcome::Ticked {
                remaining: active.remaining,
            };
        }

        match self.active.take() {
            Some(expired) => {
                (expired.on_expire)(ctx);
                TickOutcome::Expired
            }
            None => TickOutcome::Idle,
        }
    }

    /// Stop without firing the expiry callback. Safe to call at any time.
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            tracing::debug!("countdown cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Seconds left, if running.
    pub fn remaining(&self) -> Option<u32> {
        self.active.as_ref().map(|a| a.remaining)
    }
}
