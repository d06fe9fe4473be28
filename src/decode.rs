//! The inverse bit-to-nucleotide state walk: recovers a message from a
//! clean nucleotide string by reconstructing the same state machine the
//! encoder drove forward.

use bitvec::prelude::*;
use rayon::prelude::*;
use tracing::{instrument, trace};

use crate::constraint::{available_nucleotides, ConstraintOracle};
use crate::error::DecodeError;
use crate::hash::{hash_input, mix_mod2, mix_mod4};
use crate::nucleotide::{Mapping, Nucleotide};
use crate::params::CodecParams;

/// Decodes `nucleotides` back into a `bit_length`-bit message, under the
/// same `mapping`/`oracle`/`params`/`strand_idx` the encoder used.
///
/// Fails with [`DecodeError::ConstraintViolation`] if the available set
/// empties before every nucleotide has been consumed.
#[instrument(skip(nucleotides, mapping, oracle, params), fields(strand_idx, bit_length))]
pub fn decode(
    nucleotides: &[Nucleotide],
    strand_idx: u64,
    bit_length: usize,
    mapping: &Mapping,
    oracle: &dyn ConstraintOracle,
    params: &CodecParams,
) -> Result<BitVec<u8, Msb0>, DecodeError> {
    let salt = params.salt(strand_idx);

    let mut decoded: BitVec<u8, Msb0> = BitVec::with_capacity(bit_length + 2);
    let mut strand: Vec<Nucleotide> = Vec::with_capacity(nucleotides.len());
    let mut available = mapping.to_vec();

    for (position, &n) in nucleotides.iter().enumerate() {
        let bit_idx = params.low_order(decoded.len());
        let prev = previous_window(&decoded, params);

        match available.len() {
            0 => {
                trace!(strand_idx, position, "constraint violated during decode");
                return Err(DecodeError::ConstraintViolation { strand: strand_idx, at: position });
            }
            1 => {
                // forced, consumes no bits
            }
            2 | 3 => {
                let h = mix_mod2(hash_input(bit_idx, prev, salt));
                let b = if available[(h % 2) as usize] == n { 0u8 } else { 1u8 };
                decoded.push(b != 0);
            }
            _ => {
                let h = mix_mod4(hash_input(bit_idx, prev, salt));
                let mut found = None;
                for b in 0u64..4 {
                    if available[((h + b) % 4) as usize] == n {
                        found = Some(b);
                        break;
                    }
                }
                let b = found.ok_or_else(|| {
                    trace!(strand_idx, position, "no candidate nucleotide matched the hash fan-out");
                    DecodeError::ConstraintViolation { strand: strand_idx, at: position }
                })?;
                if decoded.len() + 2 > bit_length {
                    decoded.push((b % 2) != 0);
                } else {
                    decoded.push((b / 2) != 0);
                    decoded.push((b % 2) != 0);
                }
            }
        }

        strand.push(n);
        available = available_nucleotides(&strand, mapping, oracle);
    }

    decoded.truncate(bit_length);
    trace!(strand_idx, nucleotides = strand.len(), "decode finished");
    Ok(decoded)
}

/// Reads the most-recently-decoded `prev_bits` window, MSB-first, matching
/// the encoder's [`crate::encode::previous_window`].
fn previous_window(decoded: &BitSlice<u8, Msb0>, params: &CodecParams) -> u64 {
    let prev_bits = params.prev_bits as usize;
    let len = decoded.len();
    if len < prev_bits {
        return 0;
    }
    let window = &decoded[len - prev_bits..len];
    let mut value = 0u64;
    for bit in window {
        value = (value << 1) | (*bit as u64);
    }
    params.mask_prev(value)
}

/// Decodes many independent strands in parallel with `rayon`.
pub fn decode_many<O>(
    strands: &[(u64, usize, Vec<Nucleotide>)],
    mapping: &Mapping,
    oracle: &O,
    params: &CodecParams,
) -> Vec<Result<BitVec<u8, Msb0>, DecodeError>>
where
    O: ConstraintOracle + Sync,
{
    strands
        .par_iter()
        .map(|(strand_idx, bit_length, nucleotides)| {
            decode(nucleotides, *strand_idx, *bit_length, mapping, oracle, params)
        })
        .collect()
}
