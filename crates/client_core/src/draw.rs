//! Random prompt selection with the no-immediate-repeat rule.

use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{catalog::PromptCatalog, domain::Prompt};

pub trait RandomSource {
    /// Uniform index in `0..upper`. Callers never pass zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, upper: usize) -> usize {
        (**self).next_index(upper)
    }
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        rand::rng().random_range(0..upper)
    }
}

/// Reproducible generator for scripted sessions.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub prompt: Prompt,
    /// Candidates drawn, including the accepted one.
    pub attempts: usize,
}

/// Rejection-samples the catalog until the pick differs from `last_shown`.
/// A catalog without two distinct prompts accepts its first pick.
pub fn draw_prompt<R>(catalog: &PromptCatalog, last_shown: Option<&Prompt>, random: &mut R) -> Draw
where
    R: RandomSource + ?Sized,
{
    let len = catalog.len();
    let mut attempts = 0;
    loop {
        attempts += 1;
        let candidate = catalog.nth_wrapping(random.next_index(len));
        if !catalog.has_alternatives() || Some(candidate) != last_shown {
            return Draw {
                prompt: candidate.clone(),
                attempts,
            };
        }
    }
}

#[cfg(test)]
#[path = "tests/draw_tests.rs"]
mod tests;
