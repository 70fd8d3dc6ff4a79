use chrono::Utc;

/// xorshift64* generator, reproducible from a seed. Not for anything that needs
/// real randomness.
#[derive(Copy, Clone, Debug)]
pub struct Prng {
    state: u64,
}

impl Default for Prng {
    fn default() -> Self {
        Self::init(Self::FALLBACK_SEED)
    }
}

impl Prng {
    // xorshift never leaves the all-zero state
    const FALLBACK_SEED: u64 = 0x9E3779B97F4A7C15;

    pub fn init(seed: u64) -> Self {
        let state = if seed == 0 { Self::FALLBACK_SEED } else { seed };
        Self { state }
    }

    /// Seeded from the wall clock, different on every run.
    pub fn from_clock() -> Self {
        let now = Utc::now();
        let nanos = now.timestamp_subsec_nanos() as u64;
        Self::init((now.timestamp() as u64).rotate_left(32) ^ nanos)
    }

    pub fn rand(&mut self) -> u64 {
        self.next_u64()
    }

    /// Roughly one bit in eight set.
    pub fn sparse_rand(&mut self) -> u64 {
        self.next_u64() & self.next_u64() & self.next_u64()
    }

    pub fn singular_bit(&mut self) -> u64 {
        let random_shift = self.rand() % 64;
        1u64 << random_shift
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545F4914F6CDD1D)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ROUNDS: u32 = 100;
    const MUTS: u32 = 1000;

    #[test]
    fn check_bit_displacement() {
        let mut seeder = Prng::init(10300014);
        let mut acc = [0u32; 64];
        for _ in 0..ROUNDS {
            let mut prng = Prng::init(seeder.rand());
            for _ in 0..MUTS {
                add_to_bit_counts(prng.singular_bit(), &mut acc);
            }
        }

        if acc.contains(&0u32) {
            panic!("There was a bit that was choosen 0 times.")
        }
    }

    #[test]
    fn zero_seed_still_moves() {
        let mut prng = Prng::init(0);
        assert_ne!(prng.rand(), 0);
        assert_ne!(prng.rand(), prng.rand());
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Prng::init(7);
        let mut b = Prng::init(7);
        for _ in 0..16 {
            assert_eq!(a.rand(), b.rand());
        }
    }

    fn add_to_bit_counts(mut num: u64, acc: &mut [u32; 64]) {
        while num != 0 {
            let i = num.trailing_zeros();
            acc[i as usize] += 1;
            num &= !((1u64) << i);
        }
    }
}
