//! The two sources of randomness used by the engine.
//!
//! [`SecureRandom`] drives everything a querent can see as "chance": deck
//! draws, orientations, and reading ids. It is a cryptographically secure
//! generator seeded from the operating system and there is no fallback when
//! the entropy source is missing. [`OrdinaryRandom`] serves ancillary paths
//! with no fairness requirement, such as sampling from a filtered pool.

use std::sync::{Mutex, PoisonError};

use rand::rngs::{SmallRng, StdRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::card::Orientation;
use crate::error::{TarotError, TarotResult};

/// Cryptographically secure randomness for deck draws.
#[derive(Debug)]
pub struct SecureRandom {
    rng: Mutex<StdRng>,
}

impl SecureRandom {
    /// Seed from the operating system entropy source.
    pub fn from_os() -> TarotResult<Self> {
        let rng = StdRng::try_from_os_rng()
            .map_err(|e| TarotError::SecureRandomUnavailable(e.to_string()))?;
        Ok(Self {
            rng: Mutex::new(rng),
        })
    }

    /// A reproducible generator. Only meant for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// A uniform value in `[0, 1)`.
    pub fn unit(&self) -> f64 {
        self.with(|rng| rng.random::<f64>())
    }

    /// A uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&self, len: usize) -> usize {
        self.with(|rng| rng.random_range(0..len))
    }

    /// Shuffle in place (Fisher-Yates).
    pub fn shuffle<T>(&self, items: &mut [T]) {
        self.with(|rng| items.shuffle(rng));
    }

    /// Upright when a unit draw falls below one half, reversed otherwise.
    pub fn orientation(&self) -> Orientation {
        if self.unit() < 0.5 {
            Orientation::Upright
        } else {
            Orientation::Reversed
        }
    }

    /// A base-36 token below 10^9, used as an id suffix.
    pub fn token(&self) -> String {
        to_base36((self.unit() * 1_000_000_000.0) as u64)
    }

    fn with<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }
}

/// Fast, non-cryptographic randomness for ancillary sampling.
#[derive(Debug)]
pub struct OrdinaryRandom {
    rng: Mutex<SmallRng>,
}

impl Default for OrdinaryRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl OrdinaryRandom {
    /// Seed from the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_rng(&mut rand::rng())),
        }
    }

    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Shuffle in place.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        items.shuffle(&mut *rng);
    }

    /// A nine-character base-36 token, used for session ids.
    pub fn token(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..9)
            .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
            .collect()
    }
}

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Render a number in lowercase base 36.
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_rendering() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(999_999_999), "gjdgxr");
    }

    #[test]
    fn secure_from_os_is_available() {
        let rng = SecureRandom::from_os().unwrap();
        let v = rng.unit();
        assert!((0.0..1.0).contains(&v));
    }

    #[test]
    fn seeded_secure_is_reproducible() {
        let a = SecureRandom::seeded(7);
        let b = SecureRandom::seeded(7);
        for _ in 0..10 {
            assert_eq!(a.index(78), b.index(78));
        }
    }

    #[test]
    fn shuffle_keeps_elements() {
        let rng = SecureRandom::seeded(1);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn orientation_is_roughly_balanced() {
        let rng = SecureRandom::seeded(42);
        let upright = (0..10_000)
            .filter(|_| rng.orientation().is_upright())
            .count();
        assert!((4_700..=5_300).contains(&upright), "upright = {upright}");
    }

    #[test]
    fn tokens_are_base36() {
        let secure = SecureRandom::seeded(3);
        let ordinary = OrdinaryRandom::seeded(3);
        let t = secure.token();
        assert!(!t.is_empty() && t.len() <= 6);
        let s = ordinary.token();
        assert_eq!(s.len(), 9);
        assert!(s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
