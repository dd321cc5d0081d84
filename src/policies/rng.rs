use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Randomness handle owned by a policy or by the simulation environment.
///
/// A seeded handle produces the same stream on every run, and so do all the
/// handles derived from it.
#[derive(Clone, Debug)]
pub struct MaybeSeededRng {
    seed: Option<u64>,
    rng: SmallRng,
}

impl MaybeSeededRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_os_rng()
        };

        Self { seed, rng }
    }

    /// Child handle with an independent stream, seeded from this one when
    /// this one is seeded.
    pub fn derive(&mut self) -> Self {
        let seed = self.seed.map(|_| self.rng.random::<u64>());
        Self::new(seed)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}
