use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::faker::{Faker, LocaleKey};

/// Randomness and fake-data source threaded through one generator run.
#[derive(Debug, Clone)]
pub struct GeneratorContext {
    pub rng: ChaCha8Rng,
    pub faker: Faker,
    seed: Option<u64>,
}

impl GeneratorContext {
    /// A fixed seed makes every generator byte-for-byte reproducible.
    pub fn new(seed: Option<u64>, locale: LocaleKey) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self {
            rng,
            faker: Faker::new(locale),
            seed,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
