//! The 64-bit avalanche mixer shared by the encoder, decoder and repair
//! search. Pure, stateless, bit-exact across implementations by contract
//! (see the hash-determinism test below).

const M1: u64 = 0x369DEA0F31A53F85;
const A1: u64 = 0x25584FA4FF82E38B;
const M2: u64 = 0x422EB4BE0BE98727;

/// Scrambles a 64-bit integer. All arithmetic wraps (two's complement); the
/// constants and shift amounts are preserved exactly for compatibility.
#[inline]
pub fn mix(x: u64) -> u64 {
    let mut y = x.wrapping_mul(M1);
    y = y.wrapping_add(A1);
    y ^= y >> 21;
    y ^= y << 37;
    y ^= y >> 4;
    y = y.wrapping_mul(M2);
    y ^= y << 20;
    y ^= y >> 41;
    y ^= y << 5;
    y
}

/// `mix(x) mod 2`, used at branch points with a two-way available set.
#[inline]
pub fn mix_mod2(x: u64) -> u64 {
    mix(x) % 2
}

/// `mix(x) mod 4`, used at branch points with a four-way available set.
#[inline]
pub fn mix_mod4(x: u64) -> u64 {
    mix(x) % 4
}

/// Builds the mixer's input: the bitwise OR of the low-order bit-position
/// register, the previous-bits register and the salt. This is a bitwise OR,
/// not a concatenation: the three fields overlap in bit position, so the
/// result is not a lossless encoding of its inputs. Preserved verbatim for
/// compatibility; do not replace with a disjoint packing.
#[inline]
pub fn hash_input(bit_idx: u64, prev: u64, salt: u64) -> u64 {
    bit_idx | prev | salt
}
