//! Reference tile-set generator.
//!
//! Tile generation is a collaborator concern, not part of the engine
//! contract; this generator is bundled as a convenience for the reference
//! configuration (ten tiles, operands 1–9, uniform random operator). Tests
//! inject fixed tile sets or seed the generator instead of relying on
//! entropy.

use serde::{Deserialize, Serialize};

use crate::{Operator, Tile};

/// Configuration for tile-set generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of tiles per round
    pub tile_count: usize,
    /// Inclusive lower operand bound
    pub min_operand: u8,
    /// Inclusive upper operand bound
    pub max_operand: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tile_count: 10,
            min_operand: 1,
            max_operand: 9,
        }
    }
}

/// Random tile-set generator
pub struct TileGenerator {
    config: GeneratorConfig,
    rng: SimpleRng,
}

impl Default for TileGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TileGenerator {
    /// Create a generator with the reference configuration
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Generate a tile set: sequential ids from 1, uniform operator and
    /// operand, and stable letter labels (`A`–`Z`, then `AA`, …).
    pub fn generate(&mut self) -> Vec<Tile> {
        let span = (self.config.max_operand - self.config.min_operand) as usize + 1;
        (0..self.config.tile_count)
            .map(|i| {
                let operator = Operator::ALL[self.rng.next_usize(Operator::ALL.len())];
                let operand = self.config.min_operand + self.rng.next_usize(span) as u8;
                Tile::named(i as u32 + 1, operator, operand, tile_label(i))
            })
            .collect()
    }
}

/// Spreadsheet-style label for a zero-based tile index.
fn tile_label(mut index: usize) -> String {
    let mut label = String::new();
    loop {
        label.insert(0, (b'A' + (index % 26) as u8) as char);
        index /= 26;
        if index == 0 {
            break;
        }
        index -= 1;
    }
    label
}

/// Simple PRNG for no-std compatibility
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        // Use getrandom for WASM-compatible random seeding
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: use a static counter if getrandom fails
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        let seed = u64::from_le_bytes(seed_bytes);
        Self::with_seed(seed)
    }

    fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        // PCG-like PRNG
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }
}
