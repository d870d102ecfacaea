//! Level RNG
//!
//! A seed from the page URL selects Mulberry32, which reproduces the browser
//! game's random stream for that seed. Without a seed, levels come from an
//! entropy-seeded PCG stream.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// 2^32, maps a `u32` draw onto `[0, 1)`
const UNIT_SCALE: f64 = 4_294_967_296.0;

/// Mulberry32: 32-bit state, one add and two multiply-xorshift rounds per draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// Random source for one level build
#[derive(Debug, Clone)]
pub enum LevelRng {
    /// Reproducible stream from an explicit seed
    Seeded { seed: u32, rng: Mulberry32 },
    /// Non-deterministic stream
    Entropy(Pcg32),
}

impl LevelRng {
    pub fn seeded(seed: u32) -> Self {
        LevelRng::Seeded {
            seed,
            rng: Mulberry32::new(seed),
        }
    }

    pub fn from_entropy() -> Self {
        LevelRng::Entropy(Pcg32::from_os_rng())
    }

    /// Seeded mode when a seed was supplied, entropy otherwise
    pub fn from_seed_input(seed: Option<u32>) -> Self {
        match seed {
            Some(seed) => {
                log::info!("Using seeded RNG with seed: {}", seed);
                Self::seeded(seed)
            }
            None => Self::from_entropy(),
        }
    }

    /// The seed in use, if deterministic
    pub fn seed(&self) -> Option<u32> {
        match self {
            LevelRng::Seeded { seed, .. } => Some(*seed),
            LevelRng::Entropy(_) => None,
        }
    }

    fn unit(&mut self) -> f64 {
        let bits = match self {
            LevelRng::Seeded { rng, .. } => rng.next_u32(),
            LevelRng::Entropy(rng) => rng.next_u32(),
        };
        bits as f64 / UNIT_SCALE
    }

    /// Uniform integer in the inclusive range `[min, max]`.
    ///
    /// Reversed bounds are swapped. Each call consumes exactly one draw.
    pub fn random_int(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = hi as f64 - lo as f64 + 1.0;
        // floor(f * span) < span since f < 1
        (self.unit() * span).floor() as i32 + lo
    }

    /// `true` for roughly half of all draws (`random_int(0, 10) < 5`)
    pub fn coin_flip(&mut self) -> bool {
        self.random_int(0, 10) < 5
    }

    /// Integer in `[min, max]` for float bounds, truncated toward zero
    pub fn random_between(&mut self, min: f32, max: f32) -> f32 {
        self.random_int(min as i32, max as i32) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mulberry32_known_sequence() {
        // Same values as the browser generator (`t >>> 0` before scaling)
        let mut rng = Mulberry32::new(42);
        let first: Vec<u32> = (0..3).map(|_| rng.next_u32()).collect();
        assert_eq!(first, vec![2581720956, 1925393290, 3661312704]);

        let mut rng = Mulberry32::new(0);
        let first: Vec<u32> = (0..3).map(|_| rng.next_u32()).collect();
        assert_eq!(first, vec![1144304738, 1416247, 958946056]);

        let mut level = LevelRng::seeded(42);
        let rolls: Vec<i32> = (0..5).map(|_| level.random_int(0, 100)).collect();
        assert_eq!(rolls, vec![60, 45, 86, 67, 17]);

        let mut a = Mulberry32::seed_from_u64(42);
        let mut b = Mulberry32::from_seed(42u32.to_le_bytes());
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_seeded_streams_are_identical() {
        let mut a = LevelRng::seeded(1234);
        let mut b = LevelRng::seeded(1234);
        for _ in 0..1000 {
            assert_eq!(a.random_int(0, 100), b.random_int(0, 100));
        }
        assert_eq!(a.seed(), Some(1234));
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = LevelRng::seeded(1);
        let mut b = LevelRng::seeded(2);
        let xs: Vec<i32> = (0..32).map(|_| a.random_int(0, 1_000_000)).collect();
        let ys: Vec<i32> = (0..32).map(|_| b.random_int(0, 1_000_000)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_entropy_mode_has_no_seed() {
        let mut rng = LevelRng::from_seed_input(None);
        assert_eq!(rng.seed(), None);
        let v = rng.random_int(3, 7);
        assert!((3..=7).contains(&v));
    }

    #[test]
    fn test_random_int_covers_endpoints() {
        let mut rng = LevelRng::seeded(7);
        let mut seen = [false; 4];
        for _ in 0..2000 {
            let v = rng.random_int(0, 3);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_coin_flip_is_roughly_fair() {
        let mut rng = LevelRng::seeded(99);
        let heads = (0..10_000).filter(|_| rng.coin_flip()).count();
        // 5 of 11 outcomes
        assert!((4000..5100).contains(&heads), "heads = {}", heads);
    }

    proptest! {
        #[test]
        fn prop_random_int_in_range(seed in any::<u32>(), a in -10_000i32..10_000, b in -10_000i32..10_000) {
            let mut rng = LevelRng::seeded(seed);
            let v = rng.random_int(a, b);
            prop_assert!(v >= a.min(b) && v <= a.max(b));
        }
    }
}
