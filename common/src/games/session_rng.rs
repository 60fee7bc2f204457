use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded random source handed to a game so food placement is reproducible.
#[derive(Clone, Debug)]
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(42);
        let mut b = SessionRng::new(42);
        for _ in 0..32 {
            assert_eq!(a.random_range(0..1000u32), b.random_range(0..1000u32));
        }
        assert_eq!(a.seed(), 42);
    }
}
