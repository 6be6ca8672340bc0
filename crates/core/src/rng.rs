//! Seeded sequence generator used to order questions.
//!
//! The generator is a 31-bit linear congruential generator:
//! `state = (1103515245 * state + 12345) mod 2^31`, yielding `state / 2^31`.
//! Each step runs in IEEE-754 double precision. Once `a * state` passes 2^53
//! the product rounds, and the resulting streams are the ones quiz orders have
//! always been built from, so the rounding is part of the contract.

use crate::model::Seed;

/// LCG multiplier.
pub const LCG_MULTIPLIER: f64 = 1_103_515_245.0;
/// LCG increment.
pub const LCG_INCREMENT: f64 = 12_345.0;
/// LCG modulus (2^31).
pub const LCG_MODULUS: f64 = 2_147_483_648.0;

const DJB2_INIT: u32 = 5381;

/// Anything that yields floats in `[0, 1)`.
///
/// Closures implement it, which lets tests hand a fixed stub to the shuffler.
pub trait RandomSource {
    fn next_random(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_random(&mut self) -> f64 {
        self()
    }
}

/// djb2 string hash (`h = h * 33 + unit`) over UTF-16 code units, kept in 32 bits.
#[must_use]
pub fn hash_str(s: &str) -> u32 {
    s.encode_utf16().fold(DJB2_INIT, |h, unit| {
        h.wrapping_shl(5).wrapping_add(h).wrapping_add(u32::from(unit))
    })
}

/// Initial generator state for a seed.
///
/// Numbers are used as-is, fractions and infinities included; text is hashed.
#[must_use]
pub fn derive_seed_state(seed: &Seed) -> f64 {
    match seed {
        Seed::Number(n) => *n,
        Seed::Text(text) => f64::from(hash_str(text)),
    }
}

/// Reproducible 31-bit linear congruential generator.
///
/// `%` keeps the sign of the dividend, so a negative seed yields negative
/// states and draws in `(-1, 0]`; an infinite seed turns the state into NaN.
/// [`shuffle`] clamps both to index 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lcg {
    state: f64,
}

impl Lcg {
    #[must_use]
    pub fn new(state: f64) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn from_seed(seed: &Seed) -> Self {
        Self::new(derive_seed_state(seed))
    }

    #[must_use]
    pub fn state(&self) -> f64 {
        self.state
    }

    /// Advance the generator and return the new state.
    pub fn next_state(&mut self) -> f64 {
        self.state = (LCG_MULTIPLIER * self.state + LCG_INCREMENT) % LCG_MODULUS;
        self.state
    }
}

impl RandomSource for Lcg {
    fn next_random(&mut self) -> f64 {
        self.next_state() / LCG_MODULUS
    }
}

/// Copy-based Fisher–Yates shuffle.
///
/// Walks from the last index down to 1, swapping each slot with one drawn from
/// `[0, i]`. The input is left untouched.
#[must_use]
pub fn shuffle<T: Clone>(items: &[T], source: &mut dyn RandomSource) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = pick_index(source.next_random(), i);
        out.swap(i, j);
    }
    out
}

// floor(r * (i + 1)), clamped into [0, i]; NaN lands on 0.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn pick_index(r: f64, i: usize) -> usize {
    let scaled = (r * (i as f64 + 1.0)).floor();
    if scaled <= 0.0 {
        0
    } else {
        (scaled as usize).min(i)
    }
}
