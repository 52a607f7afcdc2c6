//! Seedable pseudorandom stream used to drive the sampler.
//!
//! The sampler only needs uniform indices in `[0, n)`, and any `rand::Rng`
//! provides them.  This module adds a compact deterministic generator backed
//! by domain-separated BLAKE2b-256 expansions: every output chunk is derived
//! from a keyed hash of the seed and an invocation counter.  Because streams
//! are derived from `(seed, stream_id)` rather than from shared state, each
//! run of a parallel simulation gets its own independent sequence and the
//! overall result does not depend on scheduling.

use blake2::digest::{consts::U32, Digest};
use rand::{RngCore, SeedableRng};

type Blake2b256 = blake2::Blake2b<U32>;

const PRNG_DOMAIN: &[u8] = b"MONTE_MAJORITY_PRNG";
const STREAM_DOMAIN: &[u8] = b"MONTE_MAJORITY_STREAM";

/// A deterministic stream generator derived from BLAKE2b-256.
#[derive(Debug, Clone)]
pub struct SimplePrng {
    seed: [u8; 32],
    counter: u64,
    buffer: [u8; 32],
    offset: usize,
}

impl SimplePrng {
    /// Creates a new PRNG seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(PRNG_DOMAIN);
        hasher.update(seed.to_be_bytes());
        let mut base = [0u8; 32];
        base.copy_from_slice(&hasher.finalize());
        Self::from_seed_bytes(base)
    }

    /// Creates the `stream_id`-th independent stream under a master `seed`.
    ///
    /// Distinct `stream_id` values produce unrelated sequences; the same pair
    /// always reproduces the same sequence.
    pub fn stream(seed: u64, stream_id: u64) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(STREAM_DOMAIN);
        hasher.update(seed.to_be_bytes());
        hasher.update(stream_id.to_be_bytes());
        let mut base = [0u8; 32];
        base.copy_from_slice(&hasher.finalize());
        Self::from_seed_bytes(base)
    }

    /// Creates a PRNG from a raw 32-byte seed.
    pub fn from_seed_bytes(seed: [u8; 32]) -> Self {
        Self {
            seed,
            counter: 0,
            buffer: [0u8; 32],
            offset: 32,
        }
    }

    fn refill(&mut self) {
        let mut hasher = Blake2b256::new();
        hasher.update(PRNG_DOMAIN);
        hasher.update(self.seed);
        hasher.update(self.counter.to_be_bytes());
        self.buffer.copy_from_slice(&hasher.finalize());
        self.counter = self.counter.wrapping_add(1);
        self.offset = 0;
    }

    fn next_word(&mut self) -> u64 {
        if self.offset >= self.buffer.len() {
            self.refill();
        }
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&self.buffer[self.offset..self.offset + 8]);
        self.offset += 8;
        u64::from_be_bytes(chunk)
    }
}

impl RngCore for SimplePrng {
    fn next_u32(&mut self) -> u32 {
        (self.next_word() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = self.next_word().to_be_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SimplePrng {
    type Seed = [u8; 32];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_seed_bytes(seed)
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
