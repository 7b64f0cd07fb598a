//! Random number sources for dice, deck shuffles and robber steals.
//!
//! The engine never reaches for a global RNG. Every random choice goes
//! through a `RandomSource`, so a host can run games on entropy while tests
//! script the exact dice they need.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Randomness port used by the engine.
pub trait RandomSource: Send + Sync {
    /// Roll one six-sided die (1-6)
    fn roll_die(&mut self) -> u8;

    /// Uniform integer in `0..upper`; `upper` is never 0
    fn below(&mut self, upper: usize) -> usize;
}

/// Fisher-Yates shuffle driven by `RandomSource::below`
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

/// Production source backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct StdRandom {
    inner: StdRng,
}

impl StdRandom {
    /// Seeded from OS entropy
    pub fn new() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Same seed, same game
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    fn below(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper.max(1))
    }
}

/// Replays queued values before falling back to a seeded generator.
///
/// ```
/// use settlers_core::rng::{RandomSource, ScriptedRandom};
///
/// let mut rng = ScriptedRandom::new(7).with_dice([3, 4]);
/// assert_eq!(rng.roll_die() + rng.roll_die(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    dice: VecDeque<u8>,
    picks: VecDeque<usize>,
    fallback: StdRandom,
}

impl ScriptedRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            dice: VecDeque::new(),
            picks: VecDeque::new(),
            fallback: StdRandom::seeded(seed),
        }
    }

    /// Queue individual die faces
    pub fn with_dice(mut self, dice: impl IntoIterator<Item = u8>) -> Self {
        self.dice.extend(dice);
        self
    }

    /// Queue a two-dice roll adding up to `total` (2-12)
    pub fn push_roll(&mut self, total: u8) {
        let first = total.saturating_sub(1).clamp(1, 6);
        self.dice.push_back(first);
        self.dice.push_back(total.saturating_sub(first).clamp(1, 6));
    }

    /// Queue results for `below`; each is reduced modulo the requested bound
    pub fn push_pick(&mut self, index: usize) {
        self.picks.push_back(index);
    }
}

impl RandomSource for ScriptedRandom {
    fn roll_die(&mut self) -> u8 {
        match self.dice.pop_front() {
            Some(face) => face,
            None => self.fallback.roll_die(),
        }
    }

    fn below(&mut self, upper: usize) -> usize {
        match self.picks.pop_front() {
            Some(index) => index % upper.max(1),
            None => self.fallback.below(upper),
        }
    }
}
