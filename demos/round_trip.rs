//! Encodes a synthetic message under a homopolymer/GC-content oracle, then
//! decodes the result back and checks it matches. A small runnable
//! walkthrough of the public surface, not a test.

use bitvec::prelude::*;
use hedges_codec::{canonical_mapping, decode, encode, nucleotide, CodecParams, ConstraintOracle, Nucleotide};

struct DemoFilter {
    window: usize,
}

impl ConstraintOracle for DemoFilter {
    fn valid(&self, prefix: &[Nucleotide], _only_last: bool) -> bool {
        let start = prefix.len().saturating_sub(self.window);
        let tail = &prefix[start..];
        let no_triple_run = !tail.windows(3).any(|w| w[0] == w[1] && w[1] == w[2]);
        let gc_ok = if tail.len() < self.window {
            true
        } else {
            let gc = tail.iter().filter(|n| matches!(n, Nucleotide::G | Nucleotide::C)).count();
            let frac = gc as f64 / tail.len() as f64;
            (0.3..=0.7).contains(&frac)
        };
        no_triple_run && gc_ok
    }
}

fn main() {
    let mapping = canonical_mapping();
    let params = CodecParams::default();
    let oracle = DemoFilter { window: 10 };

    let bits: BitVec<u8, Msb0> = (0..200).map(|i| (i * 7 + 3) % 5 < 2).collect();

    let strand = encode(&bits, 42, &mapping, &oracle, &params).expect("encode should succeed under this oracle");
    println!("encoded {} bits into {} nucleotides:", bits.len(), strand.len());
    println!("{}", nucleotide::to_string(&strand));

    let decoded = decode(&strand, 42, bits.len(), &mapping, &oracle, &params).expect("decode should succeed on a clean strand");
    println!("round-trip matches original bits: {}", decoded == bits);
}
