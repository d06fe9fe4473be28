//! The forward bit-to-nucleotide state walk.

use bitvec::prelude::*;
use rayon::prelude::*;
use tracing::{instrument, trace};

use crate::constraint::{available_nucleotides, ConstraintOracle};
use crate::error::EncodeError;
use crate::hash::{hash_input, mix_mod2, mix_mod4};
use crate::nucleotide::{Mapping, Nucleotide};
use crate::params::CodecParams;

/// Encodes `bits` into a nucleotide string under `mapping`/`oracle`/`params`,
/// salted by `strand_idx`.
///
/// Fails with [`EncodeError::ConstraintBlocked`] if at any step the
/// available-nucleotide set is empty.
#[instrument(skip(bits, mapping, oracle, params), fields(strand_idx, bit_len = bits.len()))]
pub fn encode(
    bits: &BitSlice<u8, Msb0>,
    strand_idx: u64,
    mapping: &Mapping,
    oracle: &dyn ConstraintOracle,
    params: &CodecParams,
) -> Result<Vec<Nucleotide>, EncodeError> {
    let len = bits.len();
    let salt = params.salt(strand_idx);

    let mut strand: Vec<Nucleotide> = Vec::with_capacity(len / 2 + 1);
    let mut available = mapping.to_vec();
    let mut bit_loc = 0usize;

    while bit_loc < len {
        let bit_idx = params.low_order(bit_loc);
        let prev = previous_window(bits, bit_loc, params);

        let k = available.len();
        let emitted = match k {
            0 => return Err(EncodeError::ConstraintBlocked { strand: strand_idx }),
            1 => {
                available[0]
            }
            2 | 3 => {
                let h = mix_mod2(hash_input(bit_idx, prev, salt));
                let b = bits[bit_loc] as u64;
                let n = available[((h + b) % 2) as usize];
                bit_loc += 1;
                n
            }
            _ => {
                let h = mix_mod4(hash_input(bit_idx, prev, salt));
                let b = if bit_loc + 2 <= len {
                    2 * bits[bit_loc] as u64 + bits[bit_loc + 1] as u64
                } else {
                    bits[bit_loc] as u64
                };
                let n = available[((h + b) % 4) as usize];
                bit_loc += if bit_loc + 2 <= len { 2 } else { 1 };
                n
            }
        };

        strand.push(emitted);
        available = available_nucleotides(&strand, mapping, oracle);
        // Checked unconditionally after every emission, even the last one.
        if available.is_empty() {
            trace!(strand_idx, nucleotides = strand.len(), "constraint blocked encoding");
            return Err(EncodeError::ConstraintBlocked { strand: strand_idx });
        }
    }

    trace!(strand_idx, nucleotides = strand.len(), "encode finished");
    Ok(strand)
}

/// Reads the most-recently-emitted `prev_bits` window of the message,
/// MSB-first, as an integer. Returns 0 if fewer than `prev_bits` bits have
/// been consumed yet.
pub(crate) fn previous_window(bits: &BitSlice<u8, Msb0>, bit_loc: usize, params: &CodecParams) -> u64 {
    let prev_bits = params.prev_bits as usize;
    if bit_loc < prev_bits {
        return 0;
    }
    let window = &bits[bit_loc - prev_bits..bit_loc];
    let mut value = 0u64;
    for bit in window {
        value = (value << 1) | (*bit as u64);
    }
    params.mask_prev(value)
}

/// Encodes many independent strands in parallel with `rayon`. Each strand
/// is encoded as a pure function of its own arguments, so no state is
/// shared across threads beyond the (assumed `Sync`) oracle.
pub fn encode_many<O>(
    messages: &[(u64, BitVec<u8, Msb0>)],
    mapping: &Mapping,
    oracle: &O,
    params: &CodecParams,
) -> Vec<Result<Vec<Nucleotide>, EncodeError>>
where
    O: ConstraintOracle + Sync,
{
    messages
        .par_iter()
        .map(|(strand_idx, bits)| encode(bits.as_bitslice(), *strand_idx, mapping, oracle, params))
        .collect()
}
