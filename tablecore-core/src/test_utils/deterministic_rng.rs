/*!
    Deterministic RNG helpers for reproducible tests

    Random payloads (binary cells, strings) come from a seeded generator so
    that a failing test fails the same way on every run.
*/

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default seed for deterministic tests
pub const DEFAULT_TEST_SEED: u64 = 42;

/// Create a deterministic RNG with the default seed
pub fn test_rng() -> StdRng {
    test_rng_with_seed(DEFAULT_TEST_SEED)
}

/// Create a deterministic RNG with a custom seed
pub fn test_rng_with_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generate `size` random bytes
pub fn random_bytes(rng: &mut StdRng, size: usize) -> Vec<u8> {
    (0..size).map(|_| rng.random()).collect()
}

/// Generate a random alphanumeric string of `len` characters
pub fn random_string(rng: &mut StdRng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_is_deterministic() {
        let mut rng1 = test_rng();
        let mut rng2 = test_rng();

        for _ in 0..100 {
            assert_eq!(rng1.random::<u64>(), rng2.random::<u64>());
        }
    }

    #[test]
    fn test_random_bytes_length_and_repeatability() {
        let first = random_bytes(&mut test_rng(), 64);
        let second = random_bytes(&mut test_rng(), 64);
        assert_eq!(first.len(), 64);
        assert_eq!(first, second);
        assert_ne!(first, random_bytes(&mut test_rng_with_seed(7), 64));
    }

    #[test]
    fn test_random_string() {
        let s = random_string(&mut test_rng(), 12);
        assert_eq!(s.len(), 12);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
