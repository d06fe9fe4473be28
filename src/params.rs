//! Codec parameters shared by the encoder, decoder and repair search.

/// Bit-width parameters that must stay identical across one encode/decode/
/// repair triple. Defaults match Press et al.'s HEDGES scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecParams {
    /// Width of the salt window applied to the strand index.
    pub salt_bits: u32,
    /// Width of the previous-message-bits register.
    pub prev_bits: u32,
    /// Width of the bit-position register fed to the hash.
    pub low_order_bits: u32,
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            salt_bits: 46,
            prev_bits: 8,
            low_order_bits: 10,
        }
    }
}

impl CodecParams {
    /// Masks a strand index down to `salt_bits`, matching `i mod 2^salt_bits`.
    pub fn salt(&self, strand_idx: u64) -> u64 {
        mask(strand_idx, self.salt_bits)
    }

    /// Masks a bit-position cursor down to `low_order_bits`, matching
    /// `bit_loc mod 2^low_order_bits`.
    pub fn low_order(&self, bit_loc: usize) -> u64 {
        mask(bit_loc as u64, self.low_order_bits)
    }

    /// Masks a rolling previous-bits accumulator down to `prev_bits`.
    pub fn mask_prev(&self, prev: u64) -> u64 {
        mask(prev, self.prev_bits)
    }
}

fn mask(value: u64, bits: u32) -> u64 {
    debug_assert!(bits < 64, "field width must fit in a u64");
    if bits >= 64 {
        value
    } else {
        value & ((1u64 << bits) - 1)
    }
}

/// The four A* edit penalties. Lower (more negative) is preferred; a
/// negative `correct` penalty is the admissibility relaxation that rewards
/// agreement with the received symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penalties {
    pub correct: f64,
    pub insert: f64,
    pub delete: f64,
    pub mutate: f64,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            correct: -0.035,
            insert: 1.0,
            delete: 1.0,
            mutate: 1.0,
        }
    }
}
