use rand::Rng;

use quiz_core::model::Seed;
use quiz_core::rng::{Lcg, RandomSource, shuffle};

/// Pick the random source for a new session.
///
/// A seed yields the reproducible LCG; no seed falls back to the thread RNG, so
/// the order is different on every run.
#[must_use]
pub fn random_source_for(seed: Option<&Seed>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(Lcg::from_seed(seed)),
        None => {
            let mut rng = rand::rng();
            Box::new(move || rng.random::<f64>())
        }
    }
}

/// Shuffle the identity permutation `0..len` into a question order.
#[must_use]
pub fn shuffled_order(len: usize, source: &mut dyn RandomSource) -> Vec<usize> {
    let identity: Vec<usize> = (0..len).collect();
    shuffle(&identity, source)
}
