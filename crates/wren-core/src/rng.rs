// Random sources
//
// Wren never owns a global generator. Anything that needs randomness (weight
// initialization, Tensor::random) takes `&mut R where R: rand::Rng`, so the
// caller decides the seeding policy:
//
//   let mut rng = wren_core::rng::seeded(42);   // reproducible
//   let mut rng = wren_core::rng::from_entropy(); // fresh every run
//
// Tests use `seeded` so every run draws the same weights regardless of the
// order in which tests execute.

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use rand::Rng;

/// A deterministic generator seeded from `seed`.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A generator seeded from operating-system entropy.
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = seeded(7);
        let mut b = seeded(7);
        let xs: Vec<u32> = (0..8).map(|_| a.gen()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = seeded(1);
        let mut b = seeded(2);
        let xs: Vec<u64> = (0..4).map(|_| a.gen()).collect();
        let ys: Vec<u64> = (0..4).map(|_| b.gen()).collect();
        assert_ne!(xs, ys);
    }
}
