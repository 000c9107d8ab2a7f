use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of the randomness used for mine placement, the reward token and
/// first-click relocation.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, bound)`, `bound` must be non-zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Adapter from any [`rand::Rng`] to a [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RngSource<R = SmallRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<SmallRng> {
    /// Same seed, same boards.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "next_index needs a non-empty range");
        self.rng.random_range(0..bound)
    }
}

/// Replays fixed draws, used to pin exact layouts in tests.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedRandom {
    floats: std::collections::VecDeque<f64>,
    indices: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(floats: &[f64], indices: &[usize]) -> Self {
        Self {
            floats: floats.iter().copied().collect(),
            indices: indices.iter().copied().collect(),
        }
    }

    pub(crate) fn remaining_indices(&self) -> usize {
        self.indices.len()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        // exhausted scripts draw "almost one": safe unless difficulty is 1
        self.floats.pop_front().unwrap_or(1.0 - f64::EPSILON)
    }

    fn next_index(&mut self, bound: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % bound
    }
}
