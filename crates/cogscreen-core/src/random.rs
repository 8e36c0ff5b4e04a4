//! Injectable randomness.
//!
//! Word selection, digit sequences and Stroop trials all draw from a
//! [`RandomSource`], so a session can be made fully deterministic by handing
//! it a seeded or scripted source.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random primitives used by the engine.
pub trait RandomSource: Send {
    /// Uniform integer in `min..=max`.
    fn random_int(&mut self, min: u32, max: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn random_float(&mut self) -> f64;

    /// Shuffle a word list in place.
    fn shuffle(&mut self, items: &mut [String]) {
        for i in (1..items.len()).rev() {
            let j = self.random_int(0, i as u32) as usize;
            items.swap(i, j);
        }
    }

    /// Index of a uniformly chosen element of a collection of length `len`.
    ///
    /// `len` must be non-zero.
    fn random_choice(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "random_choice on an empty collection");
        self.random_int(0, len.saturating_sub(1) as u32) as usize
    }
}

/// Pick one element of a non-empty slice.
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    &items[rng.random_choice(items.len())]
}

/// [`RandomSource`] backed by the standard RNG.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn random_int(&mut self, min: u32, max: u32) -> u32 {
        self.rng.random_range(min..=max)
    }

    fn random_float(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn shuffle(&mut self, items: &mut [String]) {
        items.shuffle(&mut self.rng);
    }
}

/// Replays fixed sequences of integers and floats.
///
/// Integers are clamped into the requested range; an exhausted queue yields
/// the range minimum (and `0.0` for floats). Shuffling leaves the order
/// untouched so word selection picks the first candidates.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<u32>,
    floats: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(ints: impl IntoIterator<Item = u32>, floats: impl IntoIterator<Item = f64>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            floats: floats.into_iter().collect(),
        }
    }

    /// Queue more integers.
    pub fn push_ints(&mut self, ints: impl IntoIterator<Item = u32>) {
        self.ints.extend(ints);
    }

    /// Queue more floats.
    pub fn push_floats(&mut self, floats: impl IntoIterator<Item = f64>) {
        self.floats.extend(floats);
    }
}

impl RandomSource for ScriptedRandom {
    fn random_int(&mut self, min: u32, max: u32) -> u32 {
        self.ints.pop_front().unwrap_or(min).clamp(min, max)
    }

    fn random_float(&mut self) -> f64 {
        self.floats.pop_front().unwrap_or(0.0)
    }

    fn shuffle(&mut self, _items: &mut [String]) {}
}
